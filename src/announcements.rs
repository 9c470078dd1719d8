//! Site-wide announcement banner content.
//!
//! Messages come from the settings file and may carry an activity window;
//! only messages active at request time are served.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROTATE_MS: u64 = 7_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnouncementVariant {
    Info,
    Warning,
    Success,
    Danger,
}

/// How the banner cycles through messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    #[default]
    Rotate,
    Marquee,
    Single,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementMessage {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<AnnouncementVariant>,
}

impl AnnouncementMessage {
    /// Both bounds are inclusive; a missing bound is unbounded.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        let started = self
            .starts_at
            .map_or(true, |start| start.with_timezone(&Utc) <= now);
        let not_ended = self
            .ends_at
            .map_or(true, |end| now <= end.with_timezone(&Utc));
        started && not_ended
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementConfig {
    #[serde(default)]
    pub messages: Vec<AnnouncementMessage>,
    #[serde(default)]
    pub mode: Option<DisplayMode>,
    #[serde(default)]
    pub rotate_ms: Option<u64>,
}

impl AnnouncementConfig {
    pub fn normalized(&self) -> Self {
        Self {
            messages: self.messages.clone(),
            mode: Some(self.mode.unwrap_or_default()),
            rotate_ms: Some(self.rotate_ms.unwrap_or(DEFAULT_ROTATE_MS)),
        }
    }

    /// Normalized copy holding only the messages active at `now`.
    pub fn active_at(&self, now: DateTime<Utc>) -> Self {
        let mut config = self.normalized();
        config.messages.retain(|m| m.is_active(now));
        config
    }
}

pub fn active_announcements(
    config: Option<&AnnouncementConfig>,
    now: DateTime<Utc>,
) -> Vec<AnnouncementMessage> {
    config
        .map(|config| config.active_at(now).messages)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn config() -> AnnouncementConfig {
        serde_json::from_str(
            r#"{
                "messages": [
                    {"id": "always", "text": "Flu shots available"},
                    {"id": "holiday", "text": "Closed Thanksgiving",
                     "startsAt": "2025-11-20T00:00:00-05:00",
                     "endsAt": "2025-11-28T23:59:59-05:00",
                     "variant": "warning"},
                    {"id": "expired", "text": "Old news",
                     "endsAt": "2024-01-01T00:00:00Z", "href": "/news"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn normalization_fills_mode_and_interval() {
        let normalized = config().normalized();
        assert_eq!(normalized.mode, Some(DisplayMode::Rotate));
        assert_eq!(normalized.rotate_ms, Some(DEFAULT_ROTATE_MS));

        let explicit: AnnouncementConfig =
            serde_json::from_str(r#"{"mode": "marquee", "rotateMs": 3000}"#).unwrap();
        let normalized = explicit.normalized();
        assert_eq!(normalized.mode, Some(DisplayMode::Marquee));
        assert_eq!(normalized.rotate_ms, Some(3000));
        assert!(normalized.messages.is_empty());
    }

    #[test]
    fn filters_by_activity_window() {
        let during = Utc.with_ymd_and_hms(2025, 11, 25, 15, 0, 0).unwrap();
        let ids: Vec<String> = active_announcements(Some(&config()), during)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["always", "holiday"]);

        let after = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let ids: Vec<String> = active_announcements(Some(&config()), after)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["always"]);
    }

    #[test]
    fn bounds_are_inclusive_across_offsets() {
        let holiday = &config().messages[1];
        // 2025-11-20T00:00:00-05:00 is 05:00 UTC.
        let start = Utc.with_ymd_and_hms(2025, 11, 20, 5, 0, 0).unwrap();
        assert!(holiday.is_active(start));
        assert!(!holiday.is_active(start - chrono::Duration::seconds(1)));

        let end = Utc.with_ymd_and_hms(2025, 11, 29, 4, 59, 59).unwrap();
        assert!(holiday.is_active(end));
        assert!(!holiday.is_active(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn missing_config_yields_nothing() {
        assert!(active_announcements(None, Utc::now()).is_empty());
    }

    #[test]
    fn serializes_without_empty_optionals() {
        let message = &config().messages[0];
        assert_eq!(
            serde_json::to_value(message).unwrap(),
            serde_json::json!({"id": "always", "text": "Flu shots available"})
        );
    }
}
