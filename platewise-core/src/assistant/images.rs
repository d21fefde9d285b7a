//! Bounded-concurrency image enrichment for recipe suggestions.
//!
//! For each parsed recipe without a cached image, a generation task is queued
//! behind a small worker pool, and the whole batch runs under one wall-clock
//! deadline. Slots still unresolved at the deadline keep the empty
//! placeholder; the overall response always succeeds.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::cache::{recipe_image_key, ImageCache};
use crate::images::ImageProvider;

use super::types::RecipeSuggestion;

/// Concurrent generation workers per batch.
pub const DEFAULT_WORKERS: usize = 3;

/// Wall-clock budget for one enrichment batch.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(12);

/// Per-slot result of image enrichment. Lets callers distinguish "no image,
/// by design" from "generation crashed".
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    /// Image came straight from the cache; no generation dispatched.
    CacheHit,
    /// Freshly generated and written back to the cache.
    Generated,
    /// The provider failed for this slot.
    Failed(String),
    /// The batch deadline elapsed before this slot resolved.
    TimedOut,
}

/// Fill in missing images for a batch of recipes.
///
/// Cache hits are assigned directly. Misses are generated under `workers`
/// concurrent tasks and an overall `deadline`; when the deadline elapses the
/// remaining tasks are aborted (not merely abandoned) and their slots stay
/// empty. Each successful generation is written back to the cache before
/// being attached, so concurrent requests for the same dish short-circuit.
///
/// Returns one outcome per recipe, index-aligned.
pub async fn enrich_images(
    recipes: &mut [RecipeSuggestion],
    provider: Arc<dyn ImageProvider>,
    cache: &ImageCache,
    workers: usize,
    deadline: Duration,
) -> Vec<ImageOutcome> {
    let mut outcomes = vec![ImageOutcome::TimedOut; recipes.len()];

    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks: JoinSet<(usize, String, Result<String, crate::images::ImageError>)> =
        JoinSet::new();
    let mut pending = 0usize;

    for (index, recipe) in recipes.iter_mut().enumerate() {
        if !recipe.image.is_empty() {
            // The model supplied an image reference; leave it alone.
            outcomes[index] = ImageOutcome::CacheHit;
            continue;
        }

        let key = recipe_image_key(&recipe.name, &recipe.ingredients);
        if let Some(uri) = cache.get(&key).await {
            recipe.image = uri;
            outcomes[index] = ImageOutcome::CacheHit;
            continue;
        }

        pending += 1;
        let provider = Arc::clone(&provider);
        let semaphore = Arc::clone(&semaphore);
        let name = recipe.name.clone();
        let ingredients = recipe.ingredients.clone();
        tasks.spawn(async move {
            // Semaphore closes only on drop, which cannot happen while the
            // JoinSet still owns this task.
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            let result = provider.generate(&name, &ingredients).await;
            (index, key, result)
        });
    }

    if pending == 0 {
        return outcomes;
    }

    let batch_deadline = Instant::now() + deadline;

    loop {
        let joined = match tokio::time::timeout_at(batch_deadline, tasks.join_next()).await {
            Ok(Some(joined)) => joined,
            Ok(None) => break,
            Err(_) => {
                let abandoned = tasks.len();
                tasks.abort_all();
                tracing::warn!(
                    abandoned = abandoned,
                    "Image enrichment deadline elapsed, cancelling remaining generations"
                );
                break;
            }
        };

        match joined {
            Ok((index, key, Ok(uri))) => {
                // Write-back before attachment so a concurrent request for
                // the same dish can reuse it.
                cache.set(&key, &uri).await;
                recipes[index].image = uri;
                outcomes[index] = ImageOutcome::Generated;
            }
            Ok((index, _key, Err(e))) => {
                tracing::warn!(recipe = %recipes[index].name, "Image generation failed: {}", e);
                outcomes[index] = ImageOutcome::Failed(e.to_string());
            }
            Err(join_error) => {
                // Panic in a generation task degrades that slot only.
                tracing::error!("Image generation task panicked: {}", join_error);
            }
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::FakeImageProvider;

    fn recipe(name: &str, ingredients: &[&str]) -> RecipeSuggestion {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "ingredients": ingredients,
        }))
        .unwrap()
    }

    fn batch() -> Vec<RecipeSuggestion> {
        vec![
            recipe("Veggie Omelette", &["eggs", "spinach"]),
            recipe("Fried Rice", &["rice", "egg"]),
            recipe("Pad Thai", &["noodles", "peanuts"]),
            recipe("Greek Salad", &["feta", "cucumber"]),
            recipe("Lentil Soup", &["lentils", "carrot"]),
        ]
    }

    #[tokio::test]
    async fn test_cache_hits_skip_generation() {
        let mut recipes = batch();
        let cache = ImageCache::in_memory();

        // Pre-seed two of the five
        for seeded in &recipes[..2] {
            let key = recipe_image_key(&seeded.name, &seeded.ingredients);
            cache.set(&key, "static/images/seeded.png").await;
        }

        let provider = Arc::new(FakeImageProvider::new());
        let outcomes = enrich_images(
            &mut recipes,
            provider.clone(),
            &cache,
            DEFAULT_WORKERS,
            DEFAULT_DEADLINE,
        )
        .await;

        // Exactly three generation tasks dispatched for the three misses
        assert_eq!(provider.call_count(), 3);
        assert_eq!(outcomes[0], ImageOutcome::CacheHit);
        assert_eq!(outcomes[1], ImageOutcome::CacheHit);
        for outcome in &outcomes[2..] {
            assert_eq!(*outcome, ImageOutcome::Generated);
        }
        assert!(recipes.iter().all(|r| !r.image.is_empty()));
    }

    #[tokio::test]
    async fn test_generated_images_are_written_back() {
        let mut recipes = vec![recipe("Pad Thai", &["noodles"])];
        let cache = ImageCache::in_memory();
        let provider = Arc::new(FakeImageProvider::new());

        enrich_images(&mut recipes, provider, &cache, 1, DEFAULT_DEADLINE).await;

        let key = recipe_image_key("Pad Thai", &["noodles".to_string()]);
        assert_eq!(cache.get(&key).await, Some(recipes[0].image.clone()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_leaves_placeholders() {
        let mut recipes = batch();
        let cache = ImageCache::in_memory();
        let provider = Arc::new(FakeImageProvider::with_delay(Duration::from_secs(60)));

        let outcomes = enrich_images(
            &mut recipes,
            provider.clone(),
            &cache,
            DEFAULT_WORKERS,
            Duration::from_millis(50),
        )
        .await;

        // Still a successful return: every slot keeps the empty placeholder
        assert!(recipes.iter().all(|r| r.image.is_empty()));
        assert!(outcomes.iter().all(|o| *o == ImageOutcome::TimedOut));
        // Only the worker-pool width ever started
        assert!(provider.call_count() <= DEFAULT_WORKERS);
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_single_slot() {
        let mut recipes = vec![recipe("Pad Thai", &["noodles"])];
        let cache = ImageCache::in_memory();
        let provider = Arc::new(FakeImageProvider::failing());

        let outcomes = enrich_images(&mut recipes, provider, &cache, 1, DEFAULT_DEADLINE).await;

        assert!(matches!(outcomes[0], ImageOutcome::Failed(_)));
        assert_eq!(recipes[0].image, "");
    }
}
