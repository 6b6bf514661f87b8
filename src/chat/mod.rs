//! Chat module - rule-based PolkaForge assistant
//!
//! This module provides the chat functionality:
//! - `Assistant`: transfer commands, code review, topic answers, fallback
//! - `Widget`: the lightweight site-help responder
//! - `ChatSession`: transcript ownership and the simulated thinking delay
//!
//! Classification is pure and total: every input yields exactly one
//! `Response`, nothing raises.

pub mod assistant;
pub mod review;
pub mod rules;
pub mod session;
pub mod transcript;
pub mod transfer;
pub mod widget;

use serde::{Deserialize, Serialize};

use crate::wallet::WalletSnapshot;

pub use assistant::Assistant;
pub use review::{Finding, IssueTag, Review, detect_issues};
pub use session::{ChatSession, ThinkingDelay};
pub use transcript::{Role, Transcript, TranscriptStats, Turn};
pub use widget::Widget;

/// One reply from a responder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    /// The reply describes something needing the user's attention
    /// (no wallet, insufficient balance, critical or security findings)
    pub is_error: bool,
}

impl Response {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn attention(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Something that turns a user message into a reply
pub trait Responder: Send + Sync {
    /// Responder name for logging and the REPL banner
    fn name(&self) -> &'static str;

    /// Opening assistant turn of every transcript
    fn welcome(&self) -> &'static str;

    /// Thinking delay the chat surface waits before showing a reply
    fn default_delay(&self) -> ThinkingDelay;

    fn respond(&self, input: &str, wallet: &WalletSnapshot) -> Response;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_constructors() {
        assert!(!Response::ok("fine").is_error);
        assert!(Response::attention("look").is_error);
    }
}
