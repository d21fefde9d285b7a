//! Recipe suggestion types returned by the assistant flow.

use serde::{Deserialize, Deserializer, Serialize};

/// Nutrient estimate for a suggested recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f32,
    #[serde(default)]
    pub protein: f32,
    #[serde(default)]
    pub carbs: f32,
    #[serde(default)]
    pub fat: f32,
}

/// A single structured dish proposal.
///
/// Constructed fresh per model response; never persisted beyond the response
/// and the optional image cache entry. `id` is unique within one response
/// batch only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "string_or_lines")]
    pub instructions: String,
    #[serde(default, alias = "nutrients", alias = "nutrient_estimate")]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    /// Relative URI of the recipe image; empty when no image is available.
    #[serde(default)]
    pub image: String,
}

/// Models return instructions as either one string or an array of steps.
/// Accept both, joining steps with newlines.
fn string_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrLines {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrLines::deserialize(deserializer)? {
        StringOrLines::One(s) => s,
        StringOrLines::Many(lines) => lines.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_accepts_step_array() {
        let recipe: RecipeSuggestion = serde_json::from_str(
            r#"{"name": "Toast", "instructions": ["Slice bread", "Toast it"]}"#,
        )
        .unwrap();
        assert_eq!(recipe.instructions, "Slice bread\nToast it");
    }

    #[test]
    fn test_missing_fields_default() {
        let recipe: RecipeSuggestion = serde_json::from_str(r#"{"name": "Toast"}"#).unwrap();
        assert_eq!(recipe.id, 0);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.image, "");
        assert_eq!(recipe.nutrition, Nutrition::default());
    }

    #[test]
    fn test_nutrient_estimate_alias() {
        let recipe: RecipeSuggestion = serde_json::from_str(
            r#"{"name": "Toast", "nutrient_estimate": {"calories": 120, "protein": 4, "carbs": 20, "fat": 2}}"#,
        )
        .unwrap();
        assert_eq!(recipe.nutrition.calories, 120.0);
    }
}
