//! Season archive listing client
//!
//! Pages through one uploader season of the video site's listing API and
//! maps each archive item onto a [`RawRecord`]. Requests are spaced by the
//! configured politeness delay using a token-bucket rate limiter.

use crate::config::SourceConfig;
use crate::error::{SyncError, SyncResult};
use crate::sources::{ArchivePage, CatalogSource, QueryParams, Signer};
use crate::sources::signer::NoSigning;
use crate::types::RawRecord;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

// ----------------------------------------------------------------------------
// Wire format
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<SeasonData>,
}

#[derive(Debug, Deserialize)]
struct SeasonData {
    page: PageInfo,
    #[serde(default)]
    archives: Vec<Archive>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct Archive {
    aid: i64,
    bvid: String,
    title: String,
    #[serde(default)]
    pic: String,
    #[serde(default)]
    duration: u32,
    #[serde(default)]
    pubdate: i64,
    #[serde(default)]
    stat: ArchiveStat,
}

#[derive(Debug, Default, Deserialize)]
struct ArchiveStat {
    #[serde(default)]
    view: u64,
}

impl From<Archive> for RawRecord {
    fn from(archive: Archive) -> Self {
        RawRecord {
            aid: archive.aid,
            external_id: archive.bvid,
            raw_title: archive.title,
            cover_image_url: (!archive.pic.is_empty()).then_some(archive.pic),
            duration_seconds: archive.duration,
            created_at: archive.pubdate,
            view_count: archive.stat.view,
        }
    }
}

fn into_page(envelope: ApiEnvelope) -> SyncResult<ArchivePage> {
    if envelope.code != 0 {
        return Err(SyncError::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| SyncError::Source("listing response has no data".to_string()))?;

    Ok(ArchivePage {
        total_count: data.page.total,
        records: data.archives.into_iter().map(RawRecord::from).collect(),
    })
}

// ----------------------------------------------------------------------------
// Client
// ----------------------------------------------------------------------------

/// HTTP [`CatalogSource`] for one season listing
pub struct ArchiveClient<S: Signer = NoSigning> {
    client: Client,
    config: SourceConfig,
    signer: S,
    /// None when the politeness delay is zero
    rate_limiter: Option<DefaultDirectRateLimiter>,
}

impl<S: Signer> ArchiveClient<S> {
    pub fn new(config: SourceConfig, user_agent: &str, signer: S) -> SyncResult<Self> {
        let mut headers = HeaderMap::new();
        let referer = HeaderValue::from_str(&config.referer)
            .map_err(|e| SyncError::Source(format!("invalid referer header: {}", e)))?;
        headers.insert(REFERER, referer);

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let rate_limiter = Quota::with_period(Duration::from_millis(config.politeness_ms))
            .map(RateLimiter::direct);

        Ok(Self {
            client,
            config,
            signer,
            rate_limiter,
        })
    }

    /// Unsigned query for one page
    fn query_params(&self, page_num: u32) -> QueryParams {
        vec![
            ("mid".to_string(), self.config.mid.clone()),
            ("season_id".to_string(), self.config.season_id.clone()),
            ("sort_reverse".to_string(), "false".to_string()),
            ("page_size".to_string(), self.config.page_size.to_string()),
            ("page_num".to_string(), page_num.to_string()),
            ("web_location".to_string(), self.config.web_location.clone()),
        ]
    }
}

#[async_trait]
impl<S: Signer> CatalogSource for ArchiveClient<S> {
    fn page_size(&self) -> u32 {
        self.config.page_size
    }

    async fn fetch_page(&self, page_num: u32) -> SyncResult<ArchivePage> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let params = self.signer.sign(self.query_params(page_num))?;
        debug!(page = page_num, season_id = %self.config.season_id, "Requesting archive page");

        let envelope: ApiEnvelope = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        into_page(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "code": 0,
        "message": "0",
        "ttl": 1,
        "data": {
            "aids": [101, 102],
            "archives": [
                {
                    "aid": 101,
                    "bvid": "BV1xx411c7mD",
                    "title": "【世界计划】ロキ【鏡音リン×鏡音レン】",
                    "pic": "http://i0.hdslb.com/a.jpg",
                    "duration": 215,
                    "pubdate": 1700000000,
                    "stat": { "view": 12345 }
                },
                {
                    "aid": 102,
                    "bvid": "BV1yy411c7mE",
                    "title": "【3DMV】ロキ",
                    "pic": "",
                    "duration": 216,
                    "pubdate": 1700000500,
                    "stat": { "view": 10 }
                }
            ],
            "meta": { "season_id": 1547037 },
            "page": { "page_num": 1, "page_size": 30, "total": 57 }
        }
    }"#;

    #[test]
    fn test_parse_listing_page() {
        let envelope: ApiEnvelope = serde_json::from_str(SAMPLE).unwrap();
        let page = into_page(envelope).unwrap();

        assert_eq!(page.total_count, 57);
        assert_eq!(page.records.len(), 2);

        let first = &page.records[0];
        assert_eq!(first.aid, 101);
        assert_eq!(first.external_id, "BV1xx411c7mD");
        assert_eq!(first.cover_image_url.as_deref(), Some("http://i0.hdslb.com/a.jpg"));
        assert_eq!(first.duration_seconds, 215);
        assert_eq!(first.created_at, 1700000000);
        assert_eq!(first.view_count, 12345);

        // Empty pic maps to no cover
        assert_eq!(page.records[1].cover_image_url, None);
    }

    #[test]
    fn test_nonzero_code_is_api_error() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"code": -352, "message": "风控校验失败", "data": null}"#)
                .unwrap();
        match into_page(envelope) {
            Err(SyncError::Api { code, message }) => {
                assert_eq!(code, -352);
                assert_eq!(message, "风控校验失败");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_is_source_error() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"code": 0}"#).unwrap();
        assert!(matches!(into_page(envelope), Err(SyncError::Source(_))));
    }

    #[test]
    fn test_query_params() {
        let config = SourceConfig {
            page_size: 20,
            ..SourceConfig::default()
        };
        let client = ArchiveClient::new(config, "SekaiCatalog/test", NoSigning).unwrap();
        let params = client.query_params(3);

        let get = |k: &str| {
            params
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("mid"), Some("13148307"));
        assert_eq!(get("season_id"), Some("1547037"));
        assert_eq!(get("sort_reverse"), Some("false"));
        assert_eq!(get("page_size"), Some("20"));
        assert_eq!(get("page_num"), Some("3"));
        assert_eq!(client.page_size(), 20);
    }

    #[test]
    fn test_zero_politeness_disables_limiter() {
        let config = SourceConfig {
            politeness_ms: 0,
            ..SourceConfig::default()
        };
        let client = ArchiveClient::new(config, "SekaiCatalog/test", NoSigning).unwrap();
        assert!(client.rate_limiter.is_none());

        let client =
            ArchiveClient::new(SourceConfig::default(), "SekaiCatalog/test", NoSigning).unwrap();
        assert!(client.rate_limiter.is_some());
    }
}
