use std::sync::Arc;

use chrono_tz::Tz;
use log::{debug, error, warn};
use serde::Serialize;
use thiserror::Error;

use super::canonicalize::PhoneCanonicalizer;
use super::completion::{CompletionFunction, CompletionOptions};
use super::prompt::{HoursSnapshot, PromptBuilder};
use super::turn::{latest_utterance, ChatTurn};
use crate::hours::{resolve_status, Clock, ClockReading, ScheduleRule};
use crate::intent::IntentRouter;
use crate::settings::ResolvedSettings;

/// Request problems reported to the caller. Upstream failures never surface
/// here; they become the fallback reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("No messages provided.")]
    NoMessages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// True when `reply` is the fixed fallback text.
    #[serde(skip)]
    pub fallback: bool,
}

/// Everything needed to answer one chat request. Shared read-only between
/// requests; nothing is cached across calls.
pub struct ChatService {
    completion: Arc<dyn CompletionFunction>,
    clock: Arc<dyn Clock>,
    router: IntentRouter,
    prompt: PromptBuilder,
    schedule: ScheduleRule,
    timezone: Tz,
    options: CompletionOptions,
    canonicalizer: Option<PhoneCanonicalizer>,
    fallback_reply: String,
}

impl ChatService {
    pub fn from_settings(
        settings: &ResolvedSettings,
        completion: Arc<dyn CompletionFunction>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, regex::Error> {
        let site = &settings.site;
        let canonicalizer = if site.canonicalize_phone_numbers {
            Some(PhoneCanonicalizer::new(site.canonical_phone.as_str()))
        } else {
            None
        };
        Ok(Self {
            completion,
            clock,
            router: IntentRouter::new()?,
            prompt: PromptBuilder::new(
                site.system_prompt.as_str(),
                settings.schedule.summary(),
                site.snippets.clone(),
            ),
            schedule: settings.schedule.clone(),
            timezone: settings.timezone,
            options: site.completion.options(),
            canonicalizer,
            fallback_reply: site.fallback_reply.clone(),
        })
    }

    /// Answers the conversation in `history`.
    ///
    /// An empty history is rejected before any upstream call. Otherwise the
    /// completion function is called exactly once and any failure or empty
    /// output is replaced by the fallback reply.
    pub async fn respond(&self, history: &[ChatTurn]) -> Result<ChatReply, ChatError> {
        if history.is_empty() {
            debug!("[chat] rejected request without messages");
            return Err(ChatError::NoMessages);
        }

        let intents = self.router.classify(latest_utterance(history));
        debug!("[chat] intents {:?}", intents);

        let hours = if intents.open_status {
            self.hours_snapshot()
        } else {
            None
        };

        let turns = self.prompt.build(history, &intents, hours.as_ref());

        match self.completion.complete(&turns, &self.options).await {
            Ok(text) if !text.trim().is_empty() => Ok(ChatReply {
                reply: self.canonicalize(text),
                fallback: false,
            }),
            Ok(_) => {
                warn!("[chat] completion returned no usable text; sending fallback reply");
                Ok(self.fallback())
            }
            Err(err) => {
                warn!("[chat] completion failed: {err}; sending fallback reply");
                Ok(self.fallback())
            }
        }
    }

    fn hours_snapshot(&self) -> Option<HoursSnapshot> {
        let reading = ClockReading::at(self.clock.now(), self.timezone);
        match resolve_status(&reading, &self.schedule) {
            Ok(status) => Some(HoursSnapshot { reading, status }),
            Err(err) => {
                // Startup validation rejects such schedules, so this is a bug.
                error!("[chat] office status unavailable: {err}");
                None
            }
        }
    }

    fn canonicalize(&self, text: String) -> String {
        match &self.canonicalizer {
            Some(canonicalizer) => canonicalizer.apply(&text),
            None => text,
        }
    }

    fn fallback(&self) -> ChatReply {
        ChatReply {
            reply: self.fallback_reply.clone(),
            fallback: true,
        }
    }
}
