//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc, Weekday};

use crate::chat::{ChatService, ChatTurn, CompletionError, CompletionFunction, CompletionOptions};
use crate::hours::{Clock, WindowSpec};
use crate::settings::{ResolvedSettings, SiteSettings};

pub const FALLBACK: &str = "I’m sorry, I couldn’t generate a response just now.";

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Completion function that records what it was sent.
pub struct StubCompletion {
    reply: Option<String>,
    calls: AtomicUsize,
    last_turns: Mutex<Vec<ChatTurn>>,
}

impl StubCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_turns: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_turns: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_turns(&self) -> Vec<ChatTurn> {
        self.last_turns.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionFunction for StubCompletion {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        _options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_turns.lock().unwrap() = turns.to_vec();
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(CompletionError::Status {
                status: 503,
                body: "upstream unavailable".into(),
            }),
        }
    }
}

/// Completion function whose call panics, as an unexpected handler bug would.
pub struct PanickingCompletion;

#[async_trait]
impl CompletionFunction for PanickingCompletion {
    async fn complete(
        &self,
        _turns: &[ChatTurn],
        _options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        panic!("completion backend exploded")
    }
}

/// Defaults with a plain Monday–Friday 9–5 schedule.
pub fn test_settings() -> ResolvedSettings {
    SiteSettings {
        schedule: vec![WindowSpec::new(Weekday::Mon, Weekday::Fri, "09:00", "17:00")],
        ..SiteSettings::default()
    }
    .resolve()
    .unwrap()
}

pub fn chat_service(stub: Arc<StubCompletion>, clock: FixedClock) -> ChatService {
    ChatService::from_settings(&test_settings(), stub, Arc::new(clock)).unwrap()
}
