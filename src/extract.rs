//! Bare identifier extraction for `ipfs://` URIs

/// Scheme prefix used by metadata documents to point at pinned content.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Strip a leading `ipfs://` from `uri`.
///
/// Anything without the prefix is returned as-is. The remainder is not
/// validated as a CID.
pub fn extract_bare_identifier(uri: &str) -> &str {
    uri.strip_prefix(IPFS_SCHEME).unwrap_or(uri)
}
