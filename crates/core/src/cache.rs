/// Decide whether a cached download is still current.
///
/// A hit needs a local file and a known remote `Content-Length` of the same
/// size. An unknown remote size always forces a download.
pub fn is_cache_hit(local_size: Option<u64>, remote_size: Option<u64>) -> bool {
    matches!((local_size, remote_size), (Some(local), Some(remote)) if local == remote)
}

/// Parse a `Content-Length` header value.
pub fn parse_content_length(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
