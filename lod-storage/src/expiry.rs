//! Optional time-to-live, measured from `created_at`.

use chrono::{DateTime, Duration, Utc};
use lod_core::CacheEntry;

/// Convert configured seconds into a TTL. `None` or zero disables expiry.
pub fn ttl_from_secs(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|&s| s > 0).map(|s| {
        let capped = i64::try_from(s).unwrap_or(i64::MAX).min(i64::MAX / 1000);
        Duration::seconds(capped)
    })
}

pub fn is_expired(entry: &CacheEntry, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
    match ttl {
        Some(ttl) => now - entry.created_at >= ttl,
        None => false,
    }
}
