//! User-facing messages
//!
//! Text shown after LED commands and failed fetches. Shared by the terminal
//! and browser front ends.

use serde::Serialize;

use crate::api::{ApiError, ApiResult};

/// Message shown after an LED command reached the backend
pub const COMMAND_SENT: &str = "Comando enviado";

/// Outcome of an LED command as presented to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandFeedback {
    pub channel: String,
    pub state: bool,
    pub success: bool,
    pub message: String,
}

impl CommandFeedback {
    pub fn from_result(channel: &str, state: bool, result: &ApiResult<()>) -> Self {
        let (success, message) = match result {
            Ok(()) => (true, COMMAND_SENT.to_string()),
            Err(e) => (false, format!("Error al enviar comando: {}", e)),
        };

        Self {
            channel: channel.to_string(),
            state,
            success,
            message,
        }
    }
}

/// Reduce a fetch error to the text shown in the UI
pub fn failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Unavailable | ApiError::Timeout => {
            format!("No se pudo contactar el servidor ({})", err)
        }
        _ => format!("Error al cargar datos: {}", err),
    }
}
