use serde::{Deserialize, Serialize};

/// Languages the assistant phrases generated status text in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    #[default]
    English,
    Spanish,
}
