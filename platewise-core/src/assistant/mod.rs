//! The request-scoped assistant orchestration flow.
//!
//! One call to [`Assistant::respond`] covers the whole pipeline: dispatch the
//! assembled prompt, parse the structured reply, enrich missing recipe images
//! under a bounded worker pool and deadline. Context assembly and history
//! persistence are the server's job; this type only sees their results.

pub mod images;
pub mod parse;
mod types;

pub use images::{ImageOutcome, DEFAULT_DEADLINE, DEFAULT_WORKERS};
pub use types::{Nutrition, RecipeSuggestion};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest};
use crate::cache::ImageCache;
use crate::images::ImageProvider;

/// Base system prompt. The per-user context block is appended to this.
const SYSTEM_PROMPT: &str = "\
You are an AI chef assistant for a meal-planning app. Help with recipes, meal \
planning, and cooking technique.

When the user asks for recipe suggestions, respond with a JSON object of the \
shape {\"answer\": string, \"recipes\": [...], \"follow_up\": string or null}. \
Each recipe has: name, ingredients (array of strings), instructions, nutrition \
{calories, protein, carbs, fat}, prep_time, cook_time. Suggest dishes the user \
can actually cook with the pantry and utensils listed below, and never include \
an ingredient the user is allergic to.

For questions that do not call for recipes, reply with {\"answer\": string} \
containing a concise conversational answer.";

/// Shown when the model returned recipes with no conversational text.
const DEFAULT_RECIPES_ANSWER: &str = "Here are some recipes you can try!";

/// Assistant tuning knobs. Defaults match production behavior.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub image_workers: usize,
    pub image_deadline: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            image_workers: DEFAULT_WORKERS,
            image_deadline: DEFAULT_DEADLINE,
        }
    }
}

/// Error type for the assistant flow.
///
/// Only dispatch failures surface; parsing and image problems degrade into
/// the reply instead.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// A completed assistant turn.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub answer: String,
    pub recipes: Option<Vec<RecipeSuggestion>>,
    pub follow_up: Option<String>,
    /// The raw model text, persisted verbatim to conversation history.
    pub raw: String,
    /// Per-recipe image enrichment outcomes, index-aligned with `recipes`.
    pub image_outcomes: Vec<ImageOutcome>,
}

/// The assistant orchestrator.
///
/// Holds explicitly constructed clients with lifecycle tied to the serving
/// process; nothing here is lazily initialized or global.
pub struct Assistant {
    ai: Box<dyn AiClient>,
    images: Arc<dyn ImageProvider>,
    cache: ImageCache,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(
        ai: Box<dyn AiClient>,
        images: Arc<dyn ImageProvider>,
        cache: ImageCache,
        config: AssistantConfig,
    ) -> Self {
        Self {
            ai,
            images,
            cache,
            config,
        }
    }

    /// Run one full turn: dispatch, parse, enrich.
    ///
    /// `context_block` is the assembled user context (pantry, diet, utensils,
    /// formatted history header); `history` is the trimmed list of prior
    /// turns; `question` is the new user message.
    pub async fn respond(
        &self,
        context_block: &str,
        history: Vec<ChatMessage>,
        question: &str,
    ) -> Result<AssistantReply, AssistantError> {
        let system = if context_block.is_empty() {
            SYSTEM_PROMPT.to_string()
        } else {
            format!("{}\n\n{}", SYSTEM_PROMPT, context_block)
        };

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system));
        messages.extend(history);
        messages.push(ChatMessage::user(question));

        let request = ChatRequest {
            messages,
            max_tokens: None,
            temperature: None,
            json_response: true,
        };

        let response = self.ai.complete(request).await?;
        let raw = response.content;

        let parsed = parse::parse_reply(&raw);

        let mut answer = parsed.answer;
        let mut image_outcomes = Vec::new();

        let recipes = match parsed.recipes {
            Some(mut recipes) => {
                parse::normalize_batch(&mut recipes);

                image_outcomes = images::enrich_images(
                    &mut recipes,
                    Arc::clone(&self.images),
                    &self.cache,
                    self.config.image_workers,
                    self.config.image_deadline,
                )
                .await;

                if answer.is_empty() {
                    answer = DEFAULT_RECIPES_ANSWER.to_string();
                }

                Some(recipes)
            }
            None => None,
        };

        Ok(AssistantReply {
            answer,
            recipes,
            follow_up: parsed.follow_up,
            raw,
            image_outcomes,
        })
    }
}
