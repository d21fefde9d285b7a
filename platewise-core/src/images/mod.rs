//! Text-to-image provider abstraction.
//!
//! The provider generates a food photo for a recipe and persists it under the
//! server's static directory, returning the relative URI. The enrichment
//! scheduler only ever sees URIs; file and network ownership stays here.

mod fake;
mod stability;

pub use fake::FakeImageProvider;
pub use stability::{StabilityConfig, StabilityProvider};

use async_trait::async_trait;
use thiserror::Error;

/// Error type for image generation.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Provider unconfigured or unreachable.
    #[error("Image service unavailable: {0}")]
    Unavailable(String),

    /// Any other failure from the provider.
    #[error("Upstream image error: {0}")]
    Upstream(String),

    #[error("Failed to store generated image: {0}")]
    Storage(String),
}

/// Trait for image-generation providers.
///
/// `generate` performs the full round trip: prompt the provider, persist the
/// raster result, return the relative URI it is served under.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate and store an image for the given recipe, returning its URI.
    async fn generate(&self, recipe_name: &str, ingredients: &[String])
        -> Result<String, ImageError>;
}
