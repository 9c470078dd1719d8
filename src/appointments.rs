use serde::{Deserialize, Serialize};

pub const RECEIVED_MESSAGE: &str =
    "Your appointment request has been received. Our staff will contact you to confirm.";

/// Appointment intake form. Every field is an optional free-form string
/// (`patientType` is usually `new` or `existing`) and is echoed back as sent;
/// staff follow up by phone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time_of_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentReceipt {
    pub status: &'static str,
    pub message: &'static str,
    pub echo: AppointmentRequest,
}

impl AppointmentReceipt {
    pub fn acknowledge(request: AppointmentRequest) -> Self {
        log::info!(
            "[appointments] request received (patient_type={:?}, provider_requested={})",
            request.patient_type,
            request.provider_name.is_some()
        );
        Self {
            status: "received",
            message: RECEIVED_MESSAGE,
            echo: request,
        }
    }
}
