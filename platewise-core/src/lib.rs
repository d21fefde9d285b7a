//! Core assistant orchestration for the Platewise meal-planning backend.
//!
//! This crate owns everything between "assembled prompt" and "enriched reply":
//! the chat-completion client, the structured-output parser, the image
//! enrichment scheduler, and the image cache. It has no database dependency;
//! context assembly and conversation persistence live in the server crate.

pub mod ai;
pub mod assistant;
pub mod cache;
pub mod images;

pub use assistant::{Assistant, AssistantConfig, AssistantError, AssistantReply};
pub use assistant::{Nutrition, RecipeSuggestion};
