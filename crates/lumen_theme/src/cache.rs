//! Composed theme cache
//!
//! LRU with a per-entry TTL. Keys are `"{variant}:{hash}"` where the hash is
//! a 32-bit fold over the canonical JSON of the caller's overrides. The fold
//! is for bucketing only and must not be used for identity or security.

use crate::sync::MutexExt;
use crate::theme::ComposedTheme;
use crate::tokens::TokenOverrides;
use lru::LruCache;
use serde::Serialize;
use serde_json::{Map, Value};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Capacity and lifetime of cached themes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheSettings {
    pub capacity: NonZeroUsize,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::MIN.saturating_add(49),
            ttl: Duration::from_secs(300),
        }
    }
}

/// Snapshot of cache counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub size: usize,
    pub capacity: usize,
    /// `hits / (hits + misses)`, 0.0 before the first lookup
    pub hit_rate: f64,
}

impl CacheMetrics {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

struct Entry {
    theme: Arc<ComposedTheme>,
    inserted: Instant,
}

struct Inner {
    entries: LruCache<String, Entry>,
    hits: u64,
    misses: u64,
    evictions: u64,
    expirations: u64,
}

/// Thread-safe TTL + LRU cache of composed themes
pub struct ThemeCache {
    inner: Mutex<Inner>,
    ttl: Duration,
}

impl ThemeCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(settings.capacity),
                hits: 0,
                misses: 0,
                evictions: 0,
                expirations: 0,
            }),
            ttl: settings.ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up `key`, promoting it to most recently used.
    ///
    /// Expired entries are dropped and count as a miss.
    pub fn get(&self, key: &str) -> Option<Arc<ComposedTheme>> {
        let mut inner = self.inner.guard();
        let found = inner
            .entries
            .get(key)
            .map(|entry| (Arc::clone(&entry.theme), entry.inserted.elapsed() < self.ttl));
        let expired = match found {
            Some((theme, true)) => {
                inner.hits += 1;
                trace!(key, "theme cache hit");
                return Some(theme);
            }
            Some((_, false)) => true,
            None => false,
        };
        if expired {
            inner.entries.pop(key);
            inner.expirations += 1;
        }
        inner.misses += 1;
        trace!(key, expired, "theme cache miss");
        None
    }

    pub fn insert(&self, key: String, theme: Arc<ComposedTheme>) {
        let mut inner = self.inner.guard();
        let entry = Entry {
            theme,
            inserted: Instant::now(),
        };
        // `push` hands back the replaced entry for the same key too
        if let Some((evicted, _)) = inner.entries.push(key.clone(), entry) {
            if evicted != key {
                inner.evictions += 1;
                debug!(evicted = %evicted, "evicted least recently used theme");
            }
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.guard();
        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.inserted.elapsed() >= self.ttl)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            inner.entries.pop(key);
        }
        inner.expirations += expired.len() as u64;
        if !expired.is_empty() {
            debug!(count = expired.len(), "purged expired themes");
        }
        expired.len()
    }

    /// Remove all entries. Counters are kept.
    pub fn clear(&self) {
        self.inner.guard().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.guard().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> CacheMetrics {
        let inner = self.inner.guard();
        let lookups = inner.hits + inner.misses;
        CacheMetrics {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            expirations: inner.expirations,
            size: inner.entries.len(),
            capacity: inner.entries.cap().get(),
            hit_rate: if lookups == 0 {
                0.0
            } else {
                inner.hits as f64 / lookups as f64
            },
        }
    }

    /// Purge expired entries every `interval` on the current tokio runtime.
    ///
    /// The task holds a weak reference and exits once the cache is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    debug!("theme cache dropped; sweeper exiting");
                    break;
                };
                cache.purge_expired();
            }
        })
    }
}

impl Default for ThemeCache {
    fn default() -> Self {
        Self::new(CacheSettings::default())
    }
}

/// Cache key for `variant` composed with `overrides`
pub fn cache_key(variant: &str, overrides: &TokenOverrides) -> Result<String, serde_json::Error> {
    let canonical = canonicalize(serde_json::to_value(overrides)?);
    let json = serde_json::to_string(&canonical)?;
    Ok(format!("{variant}:{}", fold_hash(&json)))
}

/// Rebuild objects with their keys in sorted order
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// `h = h * 31 + unit` over UTF-16 code units, wrapping at 32 bits
pub fn fold_hash(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeConfig;
    use crate::ThemeComposer;

    fn theme(name: &str) -> Arc<ComposedTheme> {
        let composer = ThemeComposer::new();
        composer.register_theme(ThemeConfig::new(name)).unwrap();
        Arc::new(composer.compose(name, &TokenOverrides::default()).unwrap())
    }

    fn cache(capacity: usize, ttl: Duration) -> ThemeCache {
        ThemeCache::new(CacheSettings {
            capacity: NonZeroUsize::new(capacity).unwrap(),
            ttl,
        })
    }

    #[test]
    fn fold_hash_matches_known_values() {
        assert_eq!(fold_hash(""), 0);
        assert_eq!(fold_hash("a"), 97);
        assert_eq!(fold_hash("ab"), 97 * 31 + 98);
        assert_eq!(fold_hash("{}"), 123 * 31 + 125);
    }

    #[test]
    fn fold_hash_wraps() {
        let long = "z".repeat(64);
        // must not panic on overflow
        let _ = fold_hash(&long);
    }

    #[test]
    fn key_is_stable_for_equal_overrides() {
        let mut a = TokenOverrides::default();
        a.set_path("spacing.4", "18").unwrap();
        a.set_path("colors.primary", "#ff0066").unwrap();
        let mut b = TokenOverrides::default();
        b.set_path("colors.primary", "#ff0066").unwrap();
        b.set_path("spacing.4", "18").unwrap();

        assert_eq!(cache_key("light", &a).unwrap(), cache_key("light", &b).unwrap());
        assert_ne!(
            cache_key("light", &a).unwrap(),
            cache_key("light", &TokenOverrides::default()).unwrap()
        );
        assert!(cache_key("dark", &a).unwrap().starts_with("dark:"));
    }

    #[test]
    fn empty_overrides_key() {
        let key = cache_key("light", &TokenOverrides::default()).unwrap();
        assert_eq!(key, format!("light:{}", fold_hash("{}")));
    }

    #[test]
    fn hits_and_misses_are_counted() {
        let cache = cache(4, Duration::from_secs(60));
        assert!(cache.get("light:0").is_none());
        cache.insert("light:0".into(), theme("light"));
        assert!(cache.get("light:0").is_some());
        assert!(cache.get("light:0").is_some());

        let metrics = cache.metrics();
        assert_eq!(metrics.hits, 2);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.size, 1);
        assert!((metrics.hit_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let cache = cache(2, Duration::from_secs(60));
        cache.insert("a".into(), theme("a"));
        cache.insert("b".into(), theme("b"));
        cache.get("a");
        cache.insert("c".into(), theme("c"));

        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert_eq!(cache.metrics().evictions, 1);
    }

    #[test]
    fn replacing_a_key_is_not_an_eviction() {
        let cache = cache(2, Duration::from_secs(60));
        cache.insert("a".into(), theme("a"));
        cache.insert("a".into(), theme("a"));
        assert_eq!(cache.metrics().evictions, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entries_miss_and_purge() {
        let cache = cache(4, Duration::ZERO);
        cache.insert("a".into(), theme("a"));
        cache.insert("b".into(), theme("b"));
        assert!(cache.get("a").is_none());
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.metrics().expirations, 2);
    }

    #[test]
    fn clear_keeps_counters() {
        let cache = cache(4, Duration::from_secs(60));
        cache.insert("a".into(), theme("a"));
        cache.get("a");
        cache.clear();
        let metrics = cache.metrics();
        assert_eq!(metrics.size, 0);
        assert_eq!(metrics.hits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_purges_and_stops_when_dropped() {
        let cache = Arc::new(cache(4, Duration::from_millis(10)));
        cache.insert("a".into(), theme("a"));
        let handle = cache.spawn_sweeper(Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.is_empty());

        drop(cache);
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(handle.is_finished());
    }
}
