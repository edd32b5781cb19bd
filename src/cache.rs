use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use lru::LruCache;
use parking_lot::RwLock;

pub const SUN_DATA: &str = "moonphase-app--sun";
pub const WEATHER_DATA: &str = "moonphase-app--weather";

const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    Sun,
    Weather,
}

impl CacheKind {
    pub fn ttl(&self) -> Duration {
        match self {
            CacheKind::Sun => Duration::hours(12),
            CacheKind::Weather => Duration::hours(1),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    expires_at: DateTime<Utc>,
}

/// Raw API responses keyed by name, each with its own expiry.
///
/// An entry expires after its kind's TTL or at the first local midnight after it was
/// stored, whichever comes first.
pub struct ResponseCache {
    entries: LruCache<String, CacheEntry>,
}

pub type SharedCache = Arc<RwLock<ResponseCache>>;

impl ResponseCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn shared() -> SharedCache {
        Arc::new(RwLock::new(Self::default()))
    }

    pub fn put(&mut self, key: impl Into<String>, data: impl Into<String>, kind: CacheKind) {
        self.put_at(key, data, kind, &Local::now());
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        self.get_at(key, &Local::now())
    }

    pub fn put_at<Tz: TimeZone>(
        &mut self,
        key: impl Into<String>,
        data: impl Into<String>,
        kind: CacheKind,
        now: &DateTime<Tz>,
    ) {
        let ttl_expiry = now.with_timezone(&Utc) + kind.ttl();
        let expires_at = match next_midnight(now) {
            Some(midnight) if midnight < ttl_expiry => midnight,
            _ => ttl_expiry,
        };
        let key = key.into();
        tracing::debug!(target: "cache", %key, %expires_at, "stored response");
        self.entries.put(
            key,
            CacheEntry {
                data: data.into(),
                expires_at,
            },
        );
    }

    /// `None` for a missing or expired key; expired entries are evicted.
    pub fn get_at<Tz: TimeZone>(&mut self, key: &str, now: &DateTime<Tz>) -> Option<String> {
        let now = now.with_timezone(&Utc);
        let expires_at = self.entries.peek(key)?.expires_at;
        if now >= expires_at {
            self.entries.pop(key);
            tracing::debug!(target: "cache", key, "expired");
            return None;
        }
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

fn next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let midnight = now.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)?;
    now.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Cache key for sun times of one calendar date.
pub fn sun_key(date: chrono::NaiveDate) -> String {
    format!("{SUN_DATA}--{date}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn local(h: u32, m: u32) -> DateTime<FixedOffset> {
        offset().with_ymd_and_hms(2024, 6, 21, h, m, 0).unwrap()
    }

    #[test]
    fn test_missing_key_is_absent() {
        let mut cache = ResponseCache::default();
        assert_eq!(cache.get_at("nothing", &local(8, 0)), None);
    }

    #[test]
    fn test_weather_expires_after_one_hour() {
        let mut cache = ResponseCache::default();
        cache.put_at(WEATHER_DATA, "{}", CacheKind::Weather, &local(8, 0));
        assert_eq!(cache.get_at(WEATHER_DATA, &local(8, 59)).as_deref(), Some("{}"));
        assert_eq!(cache.get_at(WEATHER_DATA, &local(9, 0)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_sun_data_lives_twelve_hours() {
        let mut cache = ResponseCache::default();
        cache.put_at(SUN_DATA, "sun", CacheKind::Sun, &local(6, 0));
        assert!(cache.get_at(SUN_DATA, &local(17, 59)).is_some());
        assert!(cache.get_at(SUN_DATA, &local(18, 0)).is_none());
    }

    #[test]
    fn test_entries_expire_at_local_midnight() {
        let mut cache = ResponseCache::default();
        cache.put_at(SUN_DATA, "sun", CacheKind::Sun, &local(20, 0));
        assert!(cache.get_at(SUN_DATA, &local(23, 59)).is_some());
        let after_midnight = offset().with_ymd_and_hms(2024, 6, 22, 0, 0, 1).unwrap();
        assert!(cache.get_at(SUN_DATA, &after_midnight).is_none());
    }

    #[test]
    fn test_overwrite_refreshes_entry() {
        let mut cache = ResponseCache::default();
        cache.put_at(WEATHER_DATA, "old", CacheKind::Weather, &local(8, 0));
        cache.put_at(WEATHER_DATA, "new", CacheKind::Weather, &local(8, 30));
        assert_eq!(cache.get_at(WEATHER_DATA, &local(9, 15)).as_deref(), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sun_key_includes_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        assert_eq!(sun_key(date), "moonphase-app--sun--2024-06-21");
    }
}
