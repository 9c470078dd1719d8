use anyhow::{anyhow, Context, Result};
use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use crate::announcements::AnnouncementConfig;
use crate::chat::{CompletionOptions, Snippets};
use crate::hours::{ScheduleRule, WindowSpec};

pub const SETTINGS_PATH_ENV: &str = "CLINIC_SETTINGS";
pub const BIND_ENV: &str = "CLINIC_HTTP_BIND";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const TIMEOUT_ENV: &str = "CLINIC_COMPLETION_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompletionSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Only ever taken from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        let options = CompletionOptions::default();
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: options.model,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl CompletionSettings {
    pub fn options(&self) -> CompletionOptions {
        CompletionOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub bind_address: String,
    /// IANA zone the office keeps its hours in.
    pub timezone: String,
    pub canonical_phone: String,
    pub canonicalize_phone_numbers: bool,
    pub system_prompt: String,
    pub fallback_reply: String,
    pub schedule: Vec<WindowSpec>,
    pub completion: CompletionSettings,
    pub snippets: Snippets,
    pub announcements: Option<AnnouncementConfig>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".into(),
            timezone: "America/New_York".into(),
            canonical_phone: "(301) 686-8554".into(),
            canonicalize_phone_numbers: true,
            system_prompt: "You are an AI assistant for a primary care clinic called Dr. Jalli \
                MD PC in Rockville, Maryland. You can answer general questions about the clinic, \
                services, scheduling, location, and logistics. You must not provide personal \
                medical advice, diagnoses, or treatment plans. Always remind users to call the \
                office or 911 for urgent or personal medical issues."
                .into(),
            fallback_reply: "I’m sorry, I couldn’t generate a response just now.".into(),
            schedule: vec![
                WindowSpec::new(Weekday::Mon, Weekday::Thu, "08:30", "16:30"),
                WindowSpec::new(Weekday::Fri, Weekday::Fri, "08:30", "13:00"),
            ],
            completion: CompletionSettings::default(),
            snippets: Snippets::default(),
            announcements: None,
        }
    }
}

/// Settings after startup validation. Holding one means the schedule has at
/// least one open day and the timezone exists.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub site: SiteSettings,
    pub schedule: ScheduleRule,
    pub timezone: Tz,
}

pub fn settings_path_from_env() -> PathBuf {
    env::var(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("settings.json"))
}

/// Reads settings from `path`. A missing file means defaults; a file that
/// exists but cannot be read or parsed is an error.
pub fn load(path: &Path) -> Result<SiteSettings> {
    if !path.exists() {
        log::info!(
            "[settings] {} not found, using built-in defaults",
            path.display()
        );
        return Ok(SiteSettings::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))
}

impl SiteSettings {
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.trim().is_empty()) {
            self.bind_address = bind;
        }
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.completion.api_key = Some(key);
        }
        if let Some(secs) = lookup(TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| (1..=300).contains(v))
        {
            self.completion.timeout_secs = secs;
        }
    }

    pub fn resolve(self) -> Result<ResolvedSettings> {
        let schedule = ScheduleRule::from_specs(&self.schedule).context("Invalid office schedule")?;
        schedule.validate().context("Invalid office schedule")?;
        let timezone: Tz = self
            .timezone
            .parse()
            .map_err(|err| anyhow!("Unknown timezone {:?}: {}", self.timezone, err))?;
        Ok(ResolvedSettings {
            site: self,
            schedule,
            timezone,
        })
    }
}
