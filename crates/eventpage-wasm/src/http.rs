//! Registration hand-off over HTTP

use async_trait::async_trait;
use eventpage::{FormSnapshot, RegistrationAck, Transport, TransportError};
use gloo_net::http::Request;

/// POSTs snapshots as JSON to the registration endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn submit(&self, snapshot: &FormSnapshot) -> Result<RegistrationAck, TransportError> {
        let response = Request::post(&self.endpoint)
            .json(snapshot)
            .map_err(|e| TransportError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(TransportError::Rejected {
                status: response.status(),
            });
        }

        response
            .json::<RegistrationAck>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
