use regex::Regex;
use serde::Serialize;

use super::keywords::{
    KeywordSet, INSURANCE, OPEN_STATUS, PROVIDERS, SPANISH_MARKERS, WEIGHT_MANAGEMENT,
};
use crate::language::Language;

/// Topics detected in one user message. Computed per request, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentMatch {
    pub open_status: bool,
    pub insurance: bool,
    pub providers: bool,
    pub weight_management: bool,
    pub spanish: bool,
}

impl IntentMatch {
    pub fn language(&self) -> Language {
        if self.spanish {
            Language::Spanish
        } else {
            Language::English
        }
    }
}

/// Compiled keyword matchers. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct IntentRouter {
    open_status: Regex,
    insurance: Regex,
    providers: Regex,
    weight_management: Regex,
    spanish_words: Regex,
    spanish_marks: Regex,
}

impl IntentRouter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            open_status: compile_set(&OPEN_STATUS)?,
            insurance: compile_set(&INSURANCE)?,
            providers: compile_set(&PROVIDERS)?,
            weight_management: compile_set(&WEIGHT_MANAGEMENT)?,
            spanish_words: compile_words(SPANISH_MARKERS.iter().copied())?,
            spanish_marks: Regex::new(r"(?i)[¿¡áéíóúñ]")?,
        })
    }

    /// Each flag is an independent test; the language flag is a heuristic
    /// and short or mixed messages may be misread.
    pub fn classify(&self, utterance: &str) -> IntentMatch {
        IntentMatch {
            open_status: self.open_status.is_match(utterance),
            insurance: self.insurance.is_match(utterance),
            providers: self.providers.is_match(utterance),
            weight_management: self.weight_management.is_match(utterance),
            spanish: self.spanish_marks.is_match(utterance)
                || self.spanish_words.is_match(utterance),
        }
    }
}

fn compile_set(set: &KeywordSet) -> Result<Regex, regex::Error> {
    compile_words(set.english.iter().chain(set.spanish.iter()).copied())
}

fn compile_words<'a>(words: impl Iterator<Item = &'a str>) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = words
        .map(|word| {
            word.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(text: &str) -> IntentMatch {
        IntentRouter::new().unwrap().classify(text)
    }

    #[test]
    fn office_hours_question_only_sets_open_status() {
        assert_eq!(
            classify("What are your office hours?"),
            IntentMatch {
                open_status: true,
                ..IntentMatch::default()
            }
        );
    }

    #[test]
    fn spanish_open_question_sets_open_status_and_language() {
        let result = classify("¿Están abiertos ahora?");
        assert!(result.open_status);
        assert!(result.spanish);
        assert_eq!(result.language(), Language::Spanish);
        assert!(!result.insurance && !result.providers && !result.weight_management);
    }

    #[test]
    fn detects_insurance_by_carrier_or_noun() {
        assert!(classify("Do you take Blue Cross?").insurance);
        assert!(classify("is AETNA in-network").insurance);
        assert!(classify("¿Aceptan mi seguro?").insurance);
        assert!(!classify("Where do I park?").insurance);
    }

    #[test]
    fn detects_provider_questions() {
        assert!(classify("Who are the providers at your clinic?").providers);
        assert!(classify("Can I see a nurse   practitioner?").providers);
        assert!(classify("Quiero ver a un médico").providers);
        assert!(!classify("Where do I park?").providers);
    }

    #[test]
    fn detects_weight_management_terms() {
        assert!(classify("Do you do InBody scans?").weight_management);
        assert!(classify("Can I get Ozempic here").weight_management);
        assert!(classify("I want help with weight loss").weight_management);
        assert!(classify("información sobre composición corporal").weight_management);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let result = classify("I know the address already");
        assert!(!result.open_status, "`know` must not trigger `now`");
        assert!(!classify("Is parking reopened").open_status);
    }

    #[test]
    fn several_intents_can_fire_together() {
        let result = classify("Are you open today and do you accept Medicare?");
        assert!(result.open_status);
        assert!(result.insurance);
        assert!(!result.spanish);
    }

    #[test]
    fn spanish_markers_without_accents() {
        assert!(classify("hola, necesito una cita").spanish);
        assert!(!classify("hello, I need an appointment").spanish);
    }

    #[test]
    fn empty_message_matches_nothing() {
        assert_eq!(classify(""), IntentMatch::default());
    }
}
