use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of `GET /`.
#[derive(Serialize, Debug)]
pub struct ApiInfo {
    pub message: &'static str,
}

/// `{ "success": true, "message": ... }` acknowledgement.
#[derive(Serialize, Debug, Clone)]
pub struct StatusMessage {
    pub success: bool,
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

/// `{ "error": ... }` body used by every failure response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}
