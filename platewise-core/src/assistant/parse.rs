//! Structured-output parser for raw model responses.
//!
//! Models are asked for a constrained JSON shape but do not reliably produce
//! one. Two shapes are accepted: a bare JSON array of recipes (possibly
//! wrapped in prose), or a JSON object with a `recipes` array plus optional
//! answer/follow-up text. Anything else degrades to a plain conversational
//! answer; malformed JSON is a recognized fallback path, not an error.

use serde_json::Value;

use super::types::RecipeSuggestion;

/// Result of parsing a raw model response.
#[derive(Debug, Clone, Default)]
pub struct ParsedReply {
    /// Conversational text shown above any recipe cards.
    pub answer: String,
    /// Structured recipes, if any were extractable.
    pub recipes: Option<Vec<RecipeSuggestion>>,
    /// Prose trailing an extracted recipe array.
    pub follow_up: Option<String>,
}

/// Parse a raw model response into text plus optional recipes.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let trimmed = raw.trim();

    // Full-object shape: {"answer": ..., "recipes": [...], "follow_up": ...}
    if trimmed.starts_with('{') {
        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed) {
            return parse_object(object, raw);
        }
    }

    // Bare-array shape, possibly surrounded by prose.
    if let Some(reply) = parse_bracketed_array(raw) {
        return reply;
    }

    // No extractable JSON: the whole text is the answer.
    ParsedReply {
        answer: raw.trim().to_string(),
        recipes: None,
        follow_up: None,
    }
}

fn parse_object(mut object: serde_json::Map<String, Value>, raw: &str) -> ParsedReply {
    let recipes = object
        .remove("recipes")
        .and_then(|v| serde_json::from_value::<Vec<RecipeSuggestion>>(v).ok())
        .filter(|r| !r.is_empty());

    let answer = object
        .remove("answer")
        .or_else(|| object.remove("response"))
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if recipes.is_some() {
                String::new()
            } else {
                raw.trim().to_string()
            }
        });

    let follow_up = object
        .remove("follow_up")
        .and_then(|v| v.as_str().map(str::to_string))
        .filter(|s| !s.trim().is_empty());

    ParsedReply {
        answer,
        recipes,
        follow_up,
    }
}

/// Slice from the first `[` to the last `]` and try to parse that substring
/// as a recipe array. Prose before the array becomes the answer; prose after
/// it is captured as a follow-up message.
fn parse_bracketed_array(raw: &str) -> Option<ParsedReply> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end <= start {
        return None;
    }

    let recipes: Vec<RecipeSuggestion> = serde_json::from_str(&raw[start..=end]).ok()?;
    if recipes.is_empty() {
        return None;
    }

    let answer = raw[..start].trim().to_string();
    let follow_up = {
        let tail = raw[end + 1..].trim();
        if tail.is_empty() {
            None
        } else {
            Some(tail.to_string())
        }
    };

    Some(ParsedReply {
        answer,
        recipes: Some(recipes),
        follow_up,
    })
}

/// Assign batch-unique ids and ensure missing images are the empty
/// placeholder. Ids from the model are not trusted to be unique.
pub fn normalize_batch(recipes: &mut [RecipeSuggestion]) {
    for (index, recipe) in recipes.iter_mut().enumerate() {
        recipe.id = index as u32 + 1;
        if recipe.image.trim().is_empty() {
            recipe.image = String::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: &str = r#"[
        {"name": "Veggie Omelette", "ingredients": ["eggs", "spinach"], "instructions": "Whisk and fry."},
        {"name": "Fried Rice", "ingredients": ["rice", "egg"], "instructions": "Fry everything."}
    ]"#;

    #[test]
    fn test_bare_array() {
        let reply = parse_reply(ARRAY);
        let recipes = reply.recipes.unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name, "Veggie Omelette");
        assert_eq!(reply.answer, "");
        assert_eq!(reply.follow_up, None);
    }

    #[test]
    fn test_array_with_surrounding_prose() {
        let raw = format!(
            "Here are two ideas from your pantry:\n{}\nWant me to adjust portions?",
            ARRAY
        );
        let reply = parse_reply(&raw);
        let recipes = reply.recipes.unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(reply.answer, "Here are two ideas from your pantry:");
        assert_eq!(
            reply.follow_up.as_deref(),
            Some("Want me to adjust portions?")
        );
    }

    #[test]
    fn test_object_with_recipes() {
        let raw = format!(
            r#"{{"answer": "Two quick dinners.", "recipes": {}, "follow_up": "Need a dessert?"}}"#,
            ARRAY
        );
        let reply = parse_reply(&raw);
        assert_eq!(reply.answer, "Two quick dinners.");
        assert_eq!(reply.recipes.unwrap().len(), 2);
        assert_eq!(reply.follow_up.as_deref(), Some("Need a dessert?"));
    }

    #[test]
    fn test_object_without_recipes() {
        let reply = parse_reply(r#"{"answer": "Soak beans overnight."}"#);
        assert_eq!(reply.answer, "Soak beans overnight.");
        assert!(reply.recipes.is_none());
    }

    #[test]
    fn test_plain_text_fallback() {
        let raw = "You can substitute butter with olive oil in most cases.";
        let reply = parse_reply(raw);
        assert_eq!(reply.answer, raw);
        assert!(reply.recipes.is_none());
        assert!(reply.follow_up.is_none());
    }

    #[test]
    fn test_malformed_json_falls_back_to_text() {
        let raw = "Try this: [{\"name\": \"Broken";
        let reply = parse_reply(raw);
        assert!(reply.recipes.is_none());
        assert_eq!(reply.answer, raw);
    }

    #[test]
    fn test_brackets_without_recipes_fall_back() {
        let raw = "Markdown list [link](https://example.com) but no recipes here.";
        let reply = parse_reply(raw);
        assert!(reply.recipes.is_none());
        assert_eq!(reply.answer, raw);
    }

    #[test]
    fn test_normalize_assigns_sequential_ids() {
        let mut recipes: Vec<RecipeSuggestion> = serde_json::from_str(ARRAY).unwrap();
        recipes[0].id = 7;
        recipes[1].id = 7;
        normalize_batch(&mut recipes);
        assert_eq!(recipes[0].id, 1);
        assert_eq!(recipes[1].id, 2);
    }
}
