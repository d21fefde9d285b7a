//! Conversation history persistence for the assistant.
//!
//! Reads feed the context window; writes are append-only and best-effort.

use crate::models::NewChatTurn;
use crate::schema::chat_turns;
use diesel::prelude::*;
use platewise_core::ai::{ChatMessage, Role};
use uuid::Uuid;

/// Number of prior turns included in the context window.
pub const HISTORY_TURNS: i64 = 5;
/// Each prior turn is clipped to this many characters.
pub const HISTORY_CLIP: usize = 1500;

fn clip(content: String) -> String {
    if content.chars().count() <= HISTORY_CLIP {
        content
    } else {
        content.chars().take(HISTORY_CLIP).collect()
    }
}

/// Fetches the last [`HISTORY_TURNS`] turns in chronological order, clipped.
pub fn recent_turns(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<Vec<ChatMessage>> {
    let mut rows: Vec<(String, String)> = chat_turns::table
        .filter(chat_turns::user_id.eq(user_id))
        .select((chat_turns::role, chat_turns::content))
        .order((chat_turns::created_at.desc(), chat_turns::role.asc()))
        .limit(HISTORY_TURNS)
        .load(conn)?;
    rows.reverse();

    Ok(rows
        .into_iter()
        .filter_map(|(role, content)| {
            let role = Role::from_str(&role)?;
            Some(ChatMessage {
                role,
                content: clip(content),
            })
        })
        .collect())
}

fn turn_pair<'a>(user_id: Uuid, question: &'a str, answer: &'a str) -> Vec<NewChatTurn<'a>> {
    vec![
        NewChatTurn {
            user_id,
            role: Role::User.as_str(),
            content: question,
        },
        NewChatTurn {
            user_id,
            role: Role::Assistant.as_str(),
            content: answer,
        },
    ]
}

/// Appends the completed turn pair. Failures are logged, never propagated;
/// losing a history row must not fail the response.
pub fn record_turn(conn: &mut PgConnection, user_id: Uuid, question: &str, answer: &str) {
    let turns = turn_pair(user_id, question, answer);

    if let Err(e) = diesel::insert_into(chat_turns::table)
        .values(&turns)
        .execute(conn)
    {
        tracing::warn!("Failed to record chat turn: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_leaves_short_content_alone() {
        assert_eq!(clip("hello".to_string()), "hello");
    }

    #[test]
    fn clip_truncates_long_content() {
        let long = "x".repeat(HISTORY_CLIP + 100);
        assert_eq!(clip(long).chars().count(), HISTORY_CLIP);
    }

    #[test]
    fn turn_pair_writes_user_before_assistant() {
        let user_id = Uuid::new_v4();
        let turns = turn_pair(user_id, "what's for dinner?", "pasta");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "user");
        assert_eq!(turns[0].content, "what's for dinner?");
        assert_eq!(turns[1].role, "assistant");
        assert_eq!(turns[1].content, "pasta");
    }
}
