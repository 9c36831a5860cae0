//! Request signing
//!
//! The season listing endpoint currently answers unsigned requests, so the
//! default signer passes parameters through unchanged. A signing scheme plugs
//! in by implementing [`Signer`] and handing it to `ArchiveClient::new`.

use crate::error::SyncResult;
use crate::sources::{QueryParams, Signer};

/// Pass-through signer
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSigning;

impl Signer for NoSigning {
    fn sign(&self, params: QueryParams) -> SyncResult<QueryParams> {
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_keeps_order() {
        let params = vec![
            ("mid".to_string(), "1".to_string()),
            ("page_num".to_string(), "2".to_string()),
        ];
        assert_eq!(NoSigning.sign(params.clone()).unwrap(), params);
    }
}
