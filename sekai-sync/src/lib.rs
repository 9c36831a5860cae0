//! sekai-sync library interface
//!
//! Title parsing and catalog consolidation for the music-video archive, plus
//! the collaborators a sync run needs (listing client, metadata file, store).
//! Exposed as a library for the binary and for integration testing.

pub mod catalog;
pub mod config;
pub mod error;
pub mod metadata;
pub mod parse;
pub mod sources;
pub mod types;

pub use crate::catalog::{ApplyOutcome, Catalog, Consolidator};
pub use crate::config::SyncConfig;
pub use crate::error::{SyncError, SyncResult};
pub use crate::metadata::{AliasTable, MetadataMatcher, MetadataTable};
pub use crate::parse::{ReferenceTables, TitleParser};
pub use crate::types::{CatalogEntry, ParsedIdentity, RawRecord, Rendition};
