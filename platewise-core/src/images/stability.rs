//! Stability-style text-to-image provider.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use super::{ImageError, ImageProvider};

/// Default API endpoint (SDXL text-to-image).
pub const DEFAULT_API_URL: &str =
    "https://api.stability.ai/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image";

/// Negative prompt applied to every generation. Food photography fails in
/// predictable ways; this trims the worst of them.
const NEGATIVE_PROMPT: &str = "text, watermark, hands, cutlery in motion, blurry, cartoon";

const GUIDANCE_SCALE: f32 = 7.0;
const STEPS: u32 = 30;

/// Image provider configuration.
#[derive(Debug, Clone)]
pub struct StabilityConfig {
    /// API key for the image service.
    pub api_key: String,
    /// Endpoint URL.
    pub api_url: String,
    /// Directory generated images are written to.
    pub image_dir: PathBuf,
    /// URI prefix images are served under (e.g. "static/images").
    pub public_prefix: String,
}

impl StabilityConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `STABILITY_API_KEY`
    ///
    /// Optional:
    /// - `PLATEWISE_IMAGE_API_URL` (default: SDXL text-to-image)
    /// - `PLATEWISE_IMAGE_DIR` (default: "static/images")
    pub fn from_env() -> Result<Self, ImageError> {
        let api_key = std::env::var("STABILITY_API_KEY")
            .map_err(|_| ImageError::Unavailable("STABILITY_API_KEY not set".to_string()))?;

        let api_url = std::env::var("PLATEWISE_IMAGE_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let image_dir = std::env::var("PLATEWISE_IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static/images"));

        Ok(Self {
            api_key,
            api_url,
            image_dir,
            public_prefix: "static/images".to_string(),
        })
    }
}

/// Stability API provider.
pub struct StabilityProvider {
    config: StabilityConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
    weight: f32,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    text_prompts: Vec<TextPrompt<'a>>,
    cfg_scale: f32,
    steps: u32,
    samples: u32,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    base64: String,
}

impl StabilityProvider {
    /// Create a new provider with the given configuration.
    pub fn new(config: StabilityConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from environment configuration.
    pub fn from_env() -> Result<Self, ImageError> {
        Ok(Self::new(StabilityConfig::from_env()?))
    }

    fn build_prompt(recipe_name: &str, ingredients: &[String]) -> String {
        let highlight = ingredients
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Professional food photography of {}, featuring {}, plated on a ceramic dish, \
             natural light, shallow depth of field",
            recipe_name, highlight
        )
    }

    async fn store_png(&self, bytes: &[u8]) -> Result<String, ImageError> {
        tokio::fs::create_dir_all(&self.config.image_dir)
            .await
            .map_err(|e| ImageError::Storage(e.to_string()))?;

        let filename = format!("{}.png", Uuid::new_v4());
        let path = self.config.image_dir.join(&filename);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ImageError::Storage(e.to_string()))?;

        Ok(format!("{}/{}", self.config.public_prefix, filename))
    }
}

#[async_trait]
impl ImageProvider for StabilityProvider {
    async fn generate(
        &self,
        recipe_name: &str,
        ingredients: &[String],
    ) -> Result<String, ImageError> {
        let prompt = Self::build_prompt(recipe_name, ingredients);

        let request = GenerationRequest {
            text_prompts: vec![
                TextPrompt {
                    text: &prompt,
                    weight: 1.0,
                },
                TextPrompt {
                    text: NEGATIVE_PROMPT,
                    weight: -1.0,
                },
            ],
            cfg_scale: GUIDANCE_SCALE,
            steps: STEPS,
            samples: 1,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .header("accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ImageError::Unavailable(e.to_string())
                } else {
                    ImageError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Upstream(format!("{}: {}", status, body)));
        }

        let generation: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ImageError::Upstream(e.to_string()))?;

        let artifact = generation
            .artifacts
            .into_iter()
            .next()
            .ok_or_else(|| ImageError::Upstream("No artifacts in response".to_string()))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(artifact.base64)
            .map_err(|e| ImageError::Upstream(format!("Invalid artifact encoding: {}", e)))?;

        let uri = self.store_png(&bytes).await?;
        tracing::info!(recipe = recipe_name, uri = %uri, "Generated recipe image");

        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_recipe_and_ingredients() {
        let prompt = StabilityProvider::build_prompt(
            "Pad Thai",
            &["rice noodles".to_string(), "peanuts".to_string()],
        );
        assert!(prompt.contains("Pad Thai"));
        assert!(prompt.contains("rice noodles, peanuts"));
    }

    #[test]
    fn test_prompt_limits_highlighted_ingredients() {
        let ingredients: Vec<String> = (0..10).map(|i| format!("ingredient{}", i)).collect();
        let prompt = StabilityProvider::build_prompt("Stew", &ingredients);
        assert!(prompt.contains("ingredient4"));
        assert!(!prompt.contains("ingredient5"));
    }
}
