use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

// Structures matching the backend's /api/generate-radio endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RadioRequest {
    driver_name: String,
    situation: String,
}

#[derive(Deserialize, Debug)]
struct RadioResponse {
    exchange: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Error)]
pub enum BackendError {
    /// The connection itself could not be established.
    #[error("Failed to connect to backend. Make sure the backend server is running on port 8000.")]
    Unreachable(#[source] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    /// Any other send or decode failure.
    #[error("{0}")]
    Transport(reqwest::Error),
}

impl BackendError {
    /// Message shown to the user. Always non-empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "An error occurred".to_string()
        } else {
            message
        }
    }
}

fn classify(err: reqwest::Error) -> BackendError {
    if err.is_connect() {
        BackendError::Unreachable(err)
    } else {
        BackendError::Transport(err)
    }
}

/// Issue the single POST that turns a driver name and a situation into a
/// radio exchange. Inputs are expected to be pre-trimmed by the caller.
#[instrument(skip(client))]
pub async fn generate_exchange(
    client: &Client,
    base_url: &str,
    driver_name: &str,
    situation: &str,
) -> Result<String, BackendError> {
    let url = format!("{}/api/generate-radio", base_url.trim_end_matches('/'));
    let payload = RadioRequest {
        driver_name: driver_name.to_string(),
        situation: situation.to_string(),
    };

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        error!(%status, %body, "Generation request failed");
        return Err(BackendError::Api {
            status,
            message: error_message(status, &body),
        });
    }

    let radio = response.json::<RadioResponse>().await.map_err(classify)?;
    debug!(exchange = %radio.exchange, "Received exchange");
    Ok(radio.exchange)
}

/// Error text for a non-success response: the body's `detail` field when it
/// decodes, otherwise a synthesized status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Error")
            )
        })
}
