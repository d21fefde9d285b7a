//! Assembles the per-request user context block for the assistant.
//!
//! Fetching and formatting are split so the formatting stays a pure function
//! over a [`UserSnapshot`].

use crate::models::User;
use crate::schema::{pantry_items, utensils};
use diesel::prelude::*;

/// At most this many pantry items appear in the context block.
pub const PANTRY_LIMIT: usize = 30;
/// At most this many utensils appear in the context block.
pub const UTENSIL_LIMIT: usize = 25;

/// Everything the context block is built from, fetched in one place.
#[derive(Debug, Default)]
pub struct UserSnapshot {
    pub pantry: Vec<String>,
    pub utensils: Vec<String>,
    pub dietary_preferences: Option<String>,
    pub allergies: Option<String>,
    pub cuisine_preferences: Option<String>,
}

pub fn fetch_snapshot(conn: &mut PgConnection, user: &User) -> QueryResult<UserSnapshot> {
    let pantry: Vec<String> = pantry_items::table
        .filter(pantry_items::user_id.eq(user.id))
        .select(pantry_items::name)
        .order(pantry_items::created_at.asc())
        .load(conn)?;

    let utensils: Vec<String> = utensils::table
        .filter(utensils::user_id.eq(user.id))
        .select(utensils::name)
        .order(utensils::name.asc())
        .load(conn)?;

    Ok(UserSnapshot {
        pantry,
        utensils,
        dietary_preferences: user.dietary_preferences.clone(),
        allergies: user.allergies.clone(),
        cuisine_preferences: user.cuisine_preferences.clone(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Formats the snapshot into the system context block.
///
/// Pantry and utensil lists are clamped, the diet section is omitted entirely
/// when the profile has nothing in it, and allergies are stated as hard
/// constraints.
pub fn build_system_block(snapshot: &UserSnapshot) -> String {
    let mut block = String::new();

    if !snapshot.pantry.is_empty() {
        block.push_str("Pantry items on hand:\n");
        for name in snapshot.pantry.iter().take(PANTRY_LIMIT) {
            block.push_str("- ");
            block.push_str(name);
            block.push('\n');
        }
        if snapshot.pantry.len() > PANTRY_LIMIT {
            block.push_str(&format!(
                "(and {} more)\n",
                snapshot.pantry.len() - PANTRY_LIMIT
            ));
        }
    }

    if !snapshot.utensils.is_empty() {
        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str("Available utensils:\n");
        for name in snapshot.utensils.iter().take(UTENSIL_LIMIT) {
            block.push_str("- ");
            block.push_str(name);
            block.push('\n');
        }
    }

    let diet = non_empty(&snapshot.dietary_preferences);
    let allergies = non_empty(&snapshot.allergies);
    let cuisine = non_empty(&snapshot.cuisine_preferences);

    if diet.is_some() || allergies.is_some() || cuisine.is_some() {
        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str("Dietary profile:\n");
        if let Some(diet) = diet {
            block.push_str(&format!("- Preference: {}\n", diet));
        }
        if let Some(allergies) = allergies {
            block.push_str(&format!(
                "- Allergies (hard constraints, never use these): {}\n",
                allergies
            ));
        }
        if let Some(cuisine) = cuisine {
            block.push_str(&format!("- Favorite cuisines: {}\n", cuisine));
        }
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserSnapshot {
        UserSnapshot {
            pantry: vec!["eggs".to_string(), "flour".to_string()],
            utensils: vec!["whisk".to_string()],
            dietary_preferences: Some("vegetarian".to_string()),
            allergies: Some("peanuts".to_string()),
            cuisine_preferences: None,
        }
    }

    #[test]
    fn pantry_is_clamped() {
        let mut snap = snapshot();
        snap.pantry = (0..40).map(|i| format!("item-{}", i)).collect();
        let block = build_system_block(&snap);

        let pantry_lines = block
            .lines()
            .filter(|line| line.starts_with("- item-"))
            .count();
        assert_eq!(pantry_lines, PANTRY_LIMIT);
        assert!(block.contains("(and 10 more)"));
    }

    #[test]
    fn allergies_are_flagged_as_hard_constraints() {
        let block = build_system_block(&snapshot());
        assert!(block.contains("hard constraints"));
        assert!(block.contains("peanuts"));
    }

    #[test]
    fn empty_diet_profile_is_omitted() {
        let mut snap = snapshot();
        snap.dietary_preferences = Some("  ".to_string());
        snap.allergies = None;
        snap.cuisine_preferences = None;
        let block = build_system_block(&snap);
        assert!(!block.contains("Dietary profile"));
    }

    #[test]
    fn empty_snapshot_produces_empty_block() {
        let block = build_system_block(&UserSnapshot::default());
        assert!(block.is_empty());
    }
}
