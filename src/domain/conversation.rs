//! Append-only transcript of the edit conversation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    // Older clients labelled agent turns "ai".
    #[serde(alias = "ai")]
    Agent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
        }
    }
}

/// Ordered transcript; append is the only mutation, so chronological order
/// and display order coincide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order() {
        let mut log = ConversationLog::default();
        log.append(ConversationTurn::user("remove the last scene"));
        log.append(ConversationTurn::agent("Removed the final scene."));
        assert_eq!(log.len(), 2);
        assert_eq!(log.turns()[0].role, Role::User);
        assert_eq!(log.turns()[1].role, Role::Agent);
    }

    #[test]
    fn accepts_legacy_ai_role() {
        let turn: ConversationTurn =
            serde_json::from_str(r#"{"role": "ai", "text": "done"}"#).unwrap();
        assert_eq!(turn.role, Role::Agent);
    }
}
