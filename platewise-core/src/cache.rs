//! Image cache over an optional redis collaborator.
//!
//! The cache is strictly an optimization: every failure path (no redis
//! configured, connection refused, command error) degrades to a cache miss or
//! a skipped write, never to a request failure.

use redis::AsyncCommands;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// TTL for cached recipe images.
pub const IMAGE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Bound on the recent-generation list.
const RECENT_LIST_LEN: isize = 20;

const RECENT_LIST_KEY: &str = "img:recent";

/// Derive the cache key for a (recipe name, ingredients) pair.
///
/// Determinism contract: lower-case and trim the name and every ingredient,
/// sort the ingredients, hash the concatenation. Identical normalized inputs
/// always yield the identical key, which is what makes cross-request reuse
/// work. Hash collisions are accepted as a cache-correctness tradeoff.
pub fn recipe_image_key(name: &str, ingredients: &[String]) -> String {
    let mut normalized: Vec<String> = ingredients
        .iter()
        .map(|i| i.trim().to_lowercase())
        .collect();
    normalized.sort();

    let mut hasher = Sha256::new();
    hasher.update(name.trim().to_lowercase().as_bytes());
    for ingredient in &normalized {
        hasher.update(b"\n");
        hasher.update(ingredient.as_bytes());
    }
    let digest = hasher.finalize();

    // First 16 bytes (32 hex chars) keeps keys short without meaningful
    // collision risk at this scale.
    format!("img:{}", hex::encode(&digest[..16]))
}

enum CacheBackend {
    /// No store configured; every lookup is a miss.
    Disabled,
    /// Process-local map, for dev and tests.
    Memory(std::sync::Mutex<std::collections::HashMap<String, String>>),
    Redis(redis::Client),
}

/// Image URI cache.
///
/// Backed by redis when a URL is configured, by nothing otherwise.
/// Constructed once at startup and shared via application state.
pub struct ImageCache {
    backend: CacheBackend,
}

impl ImageCache {
    /// Create a cache from an optional redis URL.
    ///
    /// An invalid URL is logged and treated as "no cache" rather than failing
    /// startup.
    pub fn new(redis_url: Option<&str>) -> Self {
        let backend = match redis_url {
            Some(url) => match redis::Client::open(url) {
                Ok(c) => CacheBackend::Redis(c),
                Err(e) => {
                    tracing::warn!("Invalid redis URL, image cache disabled: {}", e);
                    CacheBackend::Disabled
                }
            },
            None => CacheBackend::Disabled,
        };

        Self { backend }
    }

    /// Create a cache from the `REDIS_URL` environment variable.
    pub fn from_env() -> Self {
        Self::new(std::env::var("REDIS_URL").ok().as_deref())
    }

    /// Create a process-local cache. No TTL enforcement; dev and test use only.
    pub fn in_memory() -> Self {
        Self {
            backend: CacheBackend::Memory(std::sync::Mutex::new(Default::default())),
        }
    }

    /// Whether a store is configured.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.backend, CacheBackend::Disabled)
    }

    /// Look up a cached image URI. Any failure is a miss.
    pub async fn get(&self, key: &str) -> Option<String> {
        match &self.backend {
            CacheBackend::Disabled => None,
            CacheBackend::Memory(map) => map.lock().unwrap().get(key).cloned(),
            CacheBackend::Redis(client) => {
                let mut conn = match client.get_multiplexed_async_connection().await {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::debug!("Image cache unreachable, treating as miss: {}", e);
                        return None;
                    }
                };

                match conn.get::<_, Option<String>>(key).await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::debug!(key = key, "Image cache read failed: {}", e);
                        None
                    }
                }
            }
        }
    }

    /// Store an image URI with the standard TTL. Best-effort: failures are
    /// logged and swallowed.
    pub async fn set(&self, key: &str, uri: &str) {
        match &self.backend {
            CacheBackend::Disabled => {}
            CacheBackend::Memory(map) => {
                map.lock().unwrap().insert(key.to_string(), uri.to_string());
            }
            CacheBackend::Redis(client) => {
                let mut conn = match client.get_multiplexed_async_connection().await {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::debug!("Image cache unreachable, skipping write: {}", e);
                        return;
                    }
                };

                if let Err(e) = conn
                    .set_ex::<_, _, ()>(key, uri, IMAGE_TTL.as_secs())
                    .await
                {
                    tracing::warn!(key = key, "Image cache write failed: {}", e);
                    return;
                }

                // Bounded recent-generation list. Same best-effort policy.
                if let Err(e) = conn.lpush::<_, _, ()>(RECENT_LIST_KEY, uri).await {
                    tracing::debug!("Failed to push recent image: {}", e);
                    return;
                }
                if let Err(e) = conn
                    .ltrim::<_, ()>(RECENT_LIST_KEY, 0, RECENT_LIST_LEN - 1)
                    .await
                {
                    tracing::debug!("Failed to trim recent image list: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_is_order_independent() {
        let a = recipe_image_key("Pad Thai", &strings(&["noodles", "peanuts", "lime"]));
        let b = recipe_image_key("Pad Thai", &strings(&["lime", "noodles", "peanuts"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_is_case_independent() {
        let a = recipe_image_key("Pad Thai", &strings(&["Noodles", "Peanuts"]));
        let b = recipe_image_key("PAD THAI", &strings(&["noodles", "peanuts"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_trims_whitespace() {
        let a = recipe_image_key("  Pad Thai ", &strings(&[" noodles", "peanuts "]));
        let b = recipe_image_key("Pad Thai", &strings(&["noodles", "peanuts"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_differs_for_different_recipes() {
        let a = recipe_image_key("Pad Thai", &strings(&["noodles"]));
        let b = recipe_image_key("Pad See Ew", &strings(&["noodles"]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_is_fixed_width() {
        let key = recipe_image_key("Pad Thai", &strings(&["noodles"]));
        assert!(key.starts_with("img:"));
        assert_eq!(key.len(), "img:".len() + 32);
    }

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = ImageCache::in_memory();
        let key = recipe_image_key("Pad Thai", &strings(&["noodles"]));
        assert_eq!(cache.get(&key).await, None);
        cache.set(&key, "static/images/x.png").await;
        assert_eq!(cache.get(&key).await, Some("static/images/x.png".to_string()));
    }

    #[tokio::test]
    async fn test_disabled_cache_is_a_miss() {
        let cache = ImageCache::new(None);
        assert!(!cache.is_enabled());
        assert_eq!(cache.get("img:deadbeef").await, None);
        // set() on a disabled cache is a no-op, not a panic
        cache.set("img:deadbeef", "static/images/x.png").await;
    }
}
