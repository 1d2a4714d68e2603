use serde::{Deserialize, Serialize};

/// A single outbound email handed to the delivery function.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Response payload from the delivery function.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    pub id: Option<String>,
    pub status: String,
}

impl SendEmailResponse {
    pub fn accepted(&self) -> bool {
        matches!(self.status.as_str(), "queued" | "sent" | "accepted")
    }
}
