// src/chat/transcript.rs
// Append-only conversation record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::review::has_code_fence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// User turn containing a fenced code block
    #[serde(default)]
    pub is_code: bool,
    #[serde(default)]
    pub is_error: bool,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            is_code: has_code_fence(&text),
            text,
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn assistant(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            is_code: false,
            is_error,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranscriptStats {
    pub total: usize,
    pub user: usize,
    pub assistant: usize,
    /// Mean time between a user turn and the reply that followed it
    pub avg_reply_ms: Option<i64>,
}

/// Ordered turns of one chat session. Turns are only ever appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn stats(&self) -> TranscriptStats {
        let user = self.turns.iter().filter(|t| t.role == Role::User).count();

        let latencies: Vec<i64> = self
            .turns
            .windows(2)
            .filter(|pair| pair[0].role == Role::User && pair[1].role == Role::Assistant)
            .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_milliseconds())
            .collect();
        let avg_reply_ms = (!latencies.is_empty()).then(|| latencies.iter().sum::<i64>() / latencies.len() as i64);

        TranscriptStats {
            total: self.turns.len(),
            user,
            assistant: self.turns.len() - user,
            avg_reply_ms,
        }
    }

    /// Pretty-printed JSON array of turns
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_user_turn_detects_code() {
        assert!(Turn::user("```let a = 1;```").is_code);
        assert!(!Turn::user("plain").is_code);
        assert!(!Turn::assistant("```x```", false).is_code);
    }

    #[test]
    fn test_push_returns_appended_turn() {
        let mut transcript = Transcript::new();
        let id = transcript.push(Turn::assistant("welcome", false)).id;
        transcript.push(Turn::user("hi"));
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].id, id);
        assert_eq!(transcript.last().unwrap().role, Role::User);
    }

    #[test]
    fn test_stats_counts_and_latency() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::assistant("welcome", false));

        let asked = Turn::user("q1");
        let mut answered = Turn::assistant("a1", false);
        answered.timestamp = asked.timestamp + Duration::milliseconds(400);
        transcript.push(asked);
        transcript.push(answered);

        let asked = Turn::user("q2");
        let mut answered = Turn::assistant("a2", true);
        answered.timestamp = asked.timestamp + Duration::milliseconds(600);
        transcript.push(asked);
        transcript.push(answered);

        let stats = transcript.stats();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.user, 2);
        assert_eq!(stats.assistant, 3);
        assert_eq!(stats.avg_reply_ms, Some(500));
    }

    #[test]
    fn test_stats_without_replies() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::assistant("welcome", false));
        assert_eq!(transcript.stats().avg_reply_ms, None);
    }

    #[test]
    fn test_export_json() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("```eval(x)```"));
        transcript.push(Turn::assistant("bad", true));

        let json = transcript.export_json().unwrap();
        let parsed: Vec<Turn> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, transcript.turns());
        assert!(json.contains("\"isCode\": true"));
        assert!(json.contains("\"role\": \"assistant\""));
    }
}
