use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, warn};
use rand::Rng;
use responder::ResponseSelector;
use soulguide_model::{ChatMessage, TurnId};

use super::ui_state::UiState;

/// Chat widget state: the input draft, the transcript and the turns still
/// waiting for a reply.
#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    draft: String,
    pending: BTreeMap<TurnId, String>,
    next_turn: TurnId,
    closed: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn update_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub fn quick_question(&mut self, question: String) {
        debug!("Quick question: {question}");
        self.draft = question;
    }

    pub fn send_enabled(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    pub fn typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Blank input, or any input after [`ChatSession::close`], is rejected
    /// with `None`. Accepted text is trimmed, shown in
    /// the transcript and waits for [`ChatSession::deliver_reply`].
    pub fn accept_message(&mut self, raw: &str) -> Option<TurnId> {
        if self.closed {
            return None;
        }
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let turn = self.next_turn;
        self.next_turn = turn.next();
        self.transcript.push(ChatMessage::user(text));
        self.pending.insert(turn, text.to_owned());
        self.draft.clear();
        debug!("Accepted message {turn}");
        Some(turn)
    }

    /// Answers a pending turn. Returns `false` without touching anything when
    /// the session is closed or the turn was already answered.
    pub fn deliver_reply(&mut self, turn: TurnId, selector: &ResponseSelector) -> bool {
        if self.closed {
            debug!("Session closed, dropping reply for {turn}");
            return false;
        }
        let Some(text) = self.pending.remove(&turn) else {
            warn!("No pending message {turn}");
            return false;
        };
        let reply = selector.select_response(&text);
        self.transcript.push(ChatMessage::assistant(reply));
        true
    }

    pub fn close(&mut self) {
        if !self.pending.is_empty() {
            debug!("Closing session with {} unanswered messages", self.pending.len());
        }
        self.closed = true;
        self.pending.clear();
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            transcript: self.transcript().to_vec(),
            draft: self.draft.clone(),
            send_enabled: self.send_enabled(),
            typing: self.typing(),
        }
    }
}

/// How long the typing indicator runs before a reply is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    min: Duration,
    max: Duration,
}

impl TypingDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min > max {
            warn!("Typing delay bounds reversed ({min:?} > {max:?}), swapping");
            return Self { min: max, max: min };
        }
        Self { min, max }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }
}
