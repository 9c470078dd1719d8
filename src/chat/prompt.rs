use serde::{Deserialize, Serialize};

use super::turn::ChatTurn;
use crate::hours::{format_duration, ClockReading, NextChange, OpenStatus};
use crate::intent::IntentMatch;
use crate::language::Language;

/// Canned context injected when a topic is detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snippets {
    pub insurance: String,
    pub providers: String,
    pub weight_management: String,
}

impl Default for Snippets {
    fn default() -> Self {
        Self {
            insurance: "Insurance plans the practice commonly works with: Aetna, Blue Cross \
                Blue Shield, Cigna, UnitedHealthcare, Medicare and Tricare. The list is not \
                exhaustive and may change; patients should confirm coverage with their insurer \
                or the office before scheduling. Out-of-pocket cost depends on the plan's \
                deductible, copay and coinsurance. Out-of-network patients can often receive a \
                superbill, and self-pay rates may be available."
                .into(),
            providers: "Providers at the practice: Dr. Sireesha Jalli, MD, FACP (primary care \
                physician, board-certified in internal medicine); Dr. Mythili Vancha, MD \
                (primary care physician, board-certified in internal medicine); Ntoge Penda, NP \
                (nurse practitioner). Do not speculate about availability of a specific \
                provider; ask the patient to call the office."
                .into(),
            weight_management: "The practice offers lifestyle and metabolic health visits, \
                including coaching on nutrition, activity and weight management, and InBody \
                body composition analysis interpreted in context with the patient's history. \
                Questions about specific medications must be discussed with a clinician at a \
                visit; do not give eligibility, dosing or prescribing information."
                .into(),
        }
    }
}

/// Live office status at the moment of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursSnapshot {
    pub reading: ClockReading,
    pub status: OpenStatus,
}

/// Assembles the ordered turn list sent to the completion function.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_text: String,
    schedule_summary: String,
    snippets: Snippets,
}

impl PromptBuilder {
    pub fn new(
        system_text: impl Into<String>,
        schedule_summary: impl Into<String>,
        snippets: Snippets,
    ) -> Self {
        Self {
            system_text: system_text.into(),
            schedule_summary: schedule_summary.into(),
            snippets,
        }
    }

    /// Fixed system turn, then one system turn per detected topic, then the
    /// caller's history untouched and in order.
    pub fn build(
        &self,
        history: &[ChatTurn],
        intents: &IntentMatch,
        hours: Option<&HoursSnapshot>,
    ) -> Vec<ChatTurn> {
        let mut turns = Vec::with_capacity(history.len() + 6);
        turns.push(ChatTurn::system(self.system_text.as_str()));

        if intents.open_status {
            turns.push(ChatTurn::system(hours_context(
                &self.schedule_summary,
                hours,
                intents.language(),
            )));
        }
        if intents.insurance {
            turns.push(ChatTurn::system(self.snippets.insurance.as_str()));
        }
        if intents.providers {
            turns.push(ChatTurn::system(self.snippets.providers.as_str()));
        }
        if intents.weight_management {
            turns.push(ChatTurn::system(self.snippets.weight_management.as_str()));
        }
        if intents.spanish {
            turns.push(ChatTurn::system(
                "The user appears to be writing in Spanish. Reply in Spanish.",
            ));
        }

        turns.extend_from_slice(history);
        turns
    }
}

pub fn hours_context(
    schedule_summary: &str,
    hours: Option<&HoursSnapshot>,
    language: Language,
) -> String {
    match hours {
        Some(snapshot) => format!(
            "Office hours: {}. Current local time: {}. {} Use this when answering questions \
             about hours or whether the office is open.",
            schedule_summary,
            snapshot.reading.label,
            status_sentence(&snapshot.status, language)
        ),
        None => format!(
            "Office hours: {}. The live open/closed status is unavailable; do not guess whether \
             the office is open right now.",
            schedule_summary
        ),
    }
}

pub fn status_sentence(status: &OpenStatus, language: Language) -> String {
    let wait = format_duration(status.minutes_to_change, language);
    match (language, status.next_change) {
        (Language::English, NextChange::Closes) => {
            format!("The office is currently open and closes in {wait}.")
        }
        (Language::English, NextChange::Opens) => {
            format!("The office is currently closed and opens in {wait}.")
        }
        (Language::Spanish, NextChange::Closes) => {
            format!("La oficina está abierta en este momento y cierra en {wait}.")
        }
        (Language::Spanish, NextChange::Opens) => {
            format!("La oficina está cerrada en este momento y abre en {wait}.")
        }
    }
}
