//! Chat session: a responder, its transcript and the thinking delay
//!
//! `submit` is the only way to add turns. It appends the user turn, waits
//! out the delay, then appends the reply. Dropping the future during the
//! delay drops the reply with it; there is no timeout and no retry.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use super::Responder;
use super::transcript::{Transcript, Turn};
use crate::wallet::WalletSnapshot;

/// Simulated "thinking" pause before a reply is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl ThinkingDelay {
    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub const fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    /// Bounds given in either order are accepted
    pub fn range(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }
}

pub struct ChatSession {
    responder: Arc<dyn Responder>,
    delay: ThinkingDelay,
    transcript: Transcript,
}

impl ChatSession {
    /// Start a session whose transcript opens with the responder's welcome
    pub fn new(responder: Arc<dyn Responder>, delay: ThinkingDelay) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(Turn::assistant(responder.welcome(), false));
        Self {
            responder,
            delay,
            transcript,
        }
    }

    /// Session using the responder's own delay
    pub fn with_default_delay(responder: Arc<dyn Responder>) -> Self {
        let delay = responder.default_delay();
        Self::new(responder, delay)
    }

    pub fn responder(&self) -> &dyn Responder {
        self.responder.as_ref()
    }

    pub fn delay(&self) -> ThinkingDelay {
        self.delay
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Fresh session with the same responder and delay
    pub fn restart(&self) -> Self {
        Self::new(Arc::clone(&self.responder), self.delay)
    }

    /// Send one message. Blank input is ignored and returns `None`;
    /// otherwise returns the appended reply.
    pub async fn submit(&mut self, input: &str, wallet: &WalletSnapshot) -> Option<&Turn> {
        if input.trim().is_empty() {
            return None;
        }

        self.transcript.push(Turn::user(input));

        let pause = self.delay.sample();
        debug!(responder = self.responder.name(), pause_ms = pause.as_millis() as u64, "thinking");
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let response = self.responder.respond(input, wallet);
        Some(self.transcript.push(Turn::assistant(response.text, response.is_error)))
    }
}
