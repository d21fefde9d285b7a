//! End-to-end tests of the assistant flow with fake providers.

use std::sync::Arc;

use platewise_core::ai::FakeAiClient;
use platewise_core::assistant::ImageOutcome;
use platewise_core::cache::{recipe_image_key, ImageCache};
use platewise_core::images::FakeImageProvider;
use platewise_core::{Assistant, AssistantConfig};

const RECIPES_REPLY: &str = r#"Here are two ideas:
[
    {"name": "Veggie Omelette", "ingredients": ["eggs", "spinach"], "instructions": "Whisk and fry.",
     "nutrition": {"calories": 300, "protein": 20, "carbs": 4, "fat": 22},
     "prep_time": "5 min", "cook_time": "10 min"},
    {"name": "Fried Rice", "ingredients": ["rice", "egg"], "instructions": "Fry everything.",
     "nutrition": {"calories": 450, "protein": 12, "carbs": 70, "fat": 12},
     "prep_time": "10 min", "cook_time": "15 min"}
]
Want me to scale these for two people?"#;

fn assistant_with(ai: FakeAiClient, provider: Arc<FakeImageProvider>, cache: ImageCache) -> Assistant {
    Assistant::new(Box::new(ai), provider, cache, AssistantConfig::default())
}

#[tokio::test]
async fn test_full_turn_with_recipes() {
    let ai = FakeAiClient::with_response("omelette", RECIPES_REPLY);
    let provider = Arc::new(FakeImageProvider::new());
    let assistant = assistant_with(ai, provider.clone(), ImageCache::in_memory());

    let reply = assistant
        .respond("Pantry:\n- eggs", Vec::new(), "What can I make with an omelette pan?")
        .await
        .unwrap();

    assert_eq!(reply.answer, "Here are two ideas:");
    assert_eq!(
        reply.follow_up.as_deref(),
        Some("Want me to scale these for two people?")
    );

    let recipes = reply.recipes.unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, 1);
    assert_eq!(recipes[1].id, 2);
    assert!(recipes.iter().all(|r| !r.image.is_empty()));

    assert_eq!(provider.call_count(), 2);
    assert!(reply
        .image_outcomes
        .iter()
        .all(|o| *o == ImageOutcome::Generated));
}

#[tokio::test]
async fn test_cached_image_skips_generation() {
    let cache = ImageCache::in_memory();
    let key = recipe_image_key(
        "Veggie Omelette",
        &["eggs".to_string(), "spinach".to_string()],
    );
    cache.set(&key, "static/images/cached.png").await;

    let ai = FakeAiClient::with_response("omelette", RECIPES_REPLY);
    let provider = Arc::new(FakeImageProvider::new());
    let assistant = assistant_with(ai, provider.clone(), cache);

    let reply = assistant
        .respond("", Vec::new(), "omelette ideas please")
        .await
        .unwrap();

    let recipes = reply.recipes.unwrap();
    assert_eq!(recipes[0].image, "static/images/cached.png");
    assert_eq!(reply.image_outcomes[0], ImageOutcome::CacheHit);
    // Only the miss was dispatched
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_plain_answer_has_no_recipes() {
    let ai = FakeAiClient::with_response(
        "substitute",
        "You can swap butter for olive oil in most savory dishes.",
    );
    let provider = Arc::new(FakeImageProvider::new());
    let assistant = assistant_with(ai, provider.clone(), ImageCache::in_memory());

    let reply = assistant
        .respond("", Vec::new(), "What can I substitute for butter?")
        .await
        .unwrap();

    assert!(reply.recipes.is_none());
    assert!(reply.answer.contains("olive oil"));
    // No recipes means no image work at all
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_dispatch_failure_surfaces() {
    // No responses and no default: every completion errors
    let ai = FakeAiClient::new();
    let provider = Arc::new(FakeImageProvider::new());
    let assistant = assistant_with(ai, provider, ImageCache::in_memory());

    let result = assistant.respond("", Vec::new(), "hello").await;
    assert!(result.is_err());
}
