//! Fake image provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{ImageError, ImageProvider};

/// A fake image provider for testing the enrichment scheduler.
///
/// Counts dispatched generations and can simulate slow or failing providers.
#[derive(Debug, Default)]
pub struct FakeImageProvider {
    calls: AtomicUsize,
    delay: Option<Duration>,
    fail: bool,
}

impl FakeImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a provider that takes `delay` per generation.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    /// Simulate a provider where every generation fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Number of generations dispatched so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for FakeImageProvider {
    async fn generate(
        &self,
        recipe_name: &str,
        _ingredients: &[String],
    ) -> Result<String, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(ImageError::Upstream("fake failure".to_string()));
        }

        Ok(format!(
            "static/images/fake-{}.png",
            recipe_name.to_lowercase().replace(' ', "-")
        ))
    }
}
