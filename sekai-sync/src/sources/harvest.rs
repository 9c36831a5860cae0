// Harvest loop
//
// Pulls pages 1, 2, ... from a CatalogSource while (page - 1) * page_size is
// below the total the source reports, folding each record into the
// consolidator before the next one. An empty page ends the run early.
// A source error is returned as-is; whatever was folded before it stays in
// the consolidator's catalog.

use crate::catalog::Consolidator;
use crate::error::SyncResult;
use crate::sources::CatalogSource;
use tracing::{info, warn};

/// Counters for one harvest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Pages fetched successfully
    pub pages: u32,
    /// Records folded into the catalog
    pub records: usize,
    /// Distinct catalog entries after the run
    pub entries: usize,
}

pub async fn harvest<S>(source: &S, consolidator: &mut Consolidator) -> SyncResult<HarvestReport>
where
    S: CatalogSource + ?Sized,
{
    let page_size = u64::from(source.page_size().max(1));
    let mut report = HarvestReport::default();
    let mut page_num: u32 = 1;

    loop {
        let page = source.fetch_page(page_num).await?;
        report.pages += 1;

        if page.records.is_empty() {
            warn!(
                page = page_num,
                total = page.total_count,
                "Source returned an empty page, stopping"
            );
            break;
        }

        consolidator.consolidate(&page.records);
        report.records += page.records.len();

        info!(
            page = page_num,
            fetched = page.records.len(),
            total = page.total_count,
            entries = consolidator.catalog().len(),
            "Processed archive page"
        );

        if u64::from(page_num) * page_size >= page.total_count {
            break;
        }
        page_num += 1;
    }

    report.entries = consolidator.catalog().len();
    Ok(report)
}
