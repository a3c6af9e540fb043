//! Time helpers

use chrono::{DateTime, Utc};

/// Query value that defeats caching of AJAX GETs.
///
/// The site's own client sends unix seconds followed by `999`, which reads
/// like a millisecond timestamp.
pub fn cache_buster() -> String {
    cache_buster_at(Utc::now())
}

/// [`cache_buster`] for a fixed instant
pub fn cache_buster_at(now: DateTime<Utc>) -> String {
    format!("{}999", now.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_buster_at() {
        let instant = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(cache_buster_at(instant), "1700000000999");
    }

    #[test]
    fn test_cache_buster_looks_like_millis() {
        let value = cache_buster();
        assert!(value.ends_with("999"));
        assert!(value.parse::<u64>().is_ok());
        assert_eq!(value.len(), 13);
    }
}
