use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::debug;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::announcements::AnnouncementConfig;
use crate::appointments::{AppointmentReceipt, AppointmentRequest};
use crate::chat::ChatTurn;

pub const INVALID_CHAT_BODY: &str = "Invalid request body.";
pub const INVALID_APPOINTMENT_BODY: &str = "Could not process appointment request.";

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// `null` and absent are both treated as an empty conversation.
    #[serde(default)]
    pub messages: Option<Vec<ChatTurn>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementsResponse {
    pub ok: bool,
    pub announcements: Option<AnnouncementConfig>,
}

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!("[chat] rejected body: {rejection}");
            return bad_request(INVALID_CHAT_BODY);
        }
    };

    let messages = request.messages.unwrap_or_default();
    match state.chat.respond(&messages).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => bad_request(err.to_string()),
    }
}

pub async fn announcements(State(state): State<AppState>) -> Json<AnnouncementsResponse> {
    let now = state.clock.now();
    Json(AnnouncementsResponse {
        ok: true,
        announcements: state
            .announcements
            .as_deref()
            .map(|config| config.active_at(now)),
    })
}

pub async fn appointments(payload: Result<Json<AppointmentRequest>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(request)) => Json(AppointmentReceipt::acknowledge(request)).into_response(),
        Err(rejection) => {
            debug!("[appointments] rejected body: {rejection}");
            bad_request(INVALID_APPOINTMENT_BODY)
        }
    }
}
