//! # Collaborators
//!
//! I/O boundaries around the consolidation engine. Each is a trait so the
//! engine and the harvest loop can be exercised with in-memory stand-ins.
//!
//! - [`CatalogSource`] - paginated archive listing (`archive_client`)
//! - [`Signer`] - request parameter signing (`signer`)
//! - [`MetadataSource`] - metadata table loader (`crate::metadata::table`)
//! - [`Store`] - catalog persistence (`store`)
//!
//! `harvest` drives a catalog source page by page into a consolidator.

pub mod archive_client;
pub mod harvest;
pub mod signer;
pub mod store;

pub use archive_client::ArchiveClient;
pub use harvest::{harvest, HarvestReport};
pub use signer::NoSigning;
pub use store::JsonFileStore;

use crate::error::SyncResult;
use crate::metadata::MetadataTable;
use crate::types::{CatalogEntry, RawRecord};
use async_trait::async_trait;

/// One page of the archive listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchivePage {
    pub records: Vec<RawRecord>,
    /// Total number of archives across all pages
    pub total_count: u64,
}

/// Paginated source of raw records
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Records per page requested from the source
    fn page_size(&self) -> u32;

    /// Fetch one page (1-based)
    async fn fetch_page(&self, page_num: u32) -> SyncResult<ArchivePage>;
}

/// Query parameters as ordered key/value pairs
pub type QueryParams = Vec<(String, String)>;

/// Signs outgoing query parameters
pub trait Signer: Send + Sync {
    fn sign(&self, params: QueryParams) -> SyncResult<QueryParams>;
}

/// Loads the metadata table once per run
pub trait MetadataSource {
    fn load_metadata_table(&self) -> SyncResult<MetadataTable>;
}

/// Persists the finished catalog (entries in creation order)
pub trait Store {
    fn write(&self, entries: &[CatalogEntry]) -> SyncResult<()>;
}
