//! Optional hand-off of a submitted snapshot to the server

use crate::snapshot::FormSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Alert text shown when the hand-off fails
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "An error occurred during registration. Please try again.";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to serialize registration: {0}")]
    Serialize(String),

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server rejected registration with status {status}")]
    Rejected { status: u16 },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Acknowledgment returned by the registration endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationAck {
    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub message: Option<String>,

    /// Any other keys the server sends back
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outbound channel for submitted registrations
///
/// Futures are not `Send`: the browser runs them on its single event loop.
#[async_trait(?Send)]
pub trait Transport {
    async fn submit(&self, snapshot: &FormSnapshot) -> Result<RegistrationAck, TransportError>;
}

/// Send a snapshot and log the outcome
///
/// The caller decides how to surface an error; the form's state is already
/// committed by the time this runs.
pub async fn hand_off<T>(
    transport: &T,
    snapshot: &FormSnapshot,
) -> Result<RegistrationAck, TransportError>
where
    T: Transport + ?Sized,
{
    match transport.submit(snapshot).await {
        Ok(ack) => {
            tracing::info!(success = ?ack.success, message = ?ack.message, "registration acknowledged");
            Ok(ack)
        }
        Err(e) => {
            tracing::warn!("Registration hand-off failed: {}", e);
            Err(e)
        }
    }
}
