//! Wire types and fetch helpers for the stream manager REST API
//!
//! These types mirror the server-side JSON response structures. The fetch
//! functions go through `gloo-net` when compiled for the browser and fall
//! back to inert stubs elsewhere so the crate unit-tests natively.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ApiError;

/// Stream record as returned by /api/tasks
///
/// `id` is the database key (used for deletion); `stream_id` is the
/// stable string identifier everything else keys on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub id: u64,
    pub stream_id: String,
    pub name: String,
    pub stream_status: StreamStatus,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Lifecycle status of a stream; all transitions happen server-side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    Stopped,
    Starting,
    Running,
    Error,
}

impl StreamStatus {
    /// Starting a stream only makes sense when it is not already up
    pub fn can_start(self) -> bool {
        matches!(self, StreamStatus::Stopped | StreamStatus::Error)
    }

    /// Stopping only makes sense while the stream is coming up or running
    pub fn can_stop(self) -> bool {
        matches!(self, StreamStatus::Starting | StreamStatus::Running)
    }

    /// CSS modifier class used by the status badge
    pub fn css_class(self) -> &'static str {
        match self {
            StreamStatus::Stopped => "status-stopped",
            StreamStatus::Starting => "status-starting",
            StreamStatus::Running => "status-running",
            StreamStatus::Error => "status-error",
        }
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamStatus::Stopped => write!(f, "stopped"),
            StreamStatus::Starting => write!(f, "starting"),
            StreamStatus::Running => write!(f, "running"),
            StreamStatus::Error => write!(f, "error"),
        }
    }
}

/// Connection parameters for one stream, fetched lazily when a card expands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDetail {
    #[serde(default)]
    pub srt_url: Option<String>,
    #[serde(default)]
    pub hls_url: Option<String>,
    #[serde(default)]
    pub srt_port: Option<u16>,
    #[serde(default)]
    pub server_ip: Option<String>,
    #[serde(default)]
    pub stream_start: Option<String>,
}

/// The two actions the action endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamAction {
    Start,
    Stop,
}

impl fmt::Display for StreamAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamAction::Start => write!(f, "start"),
            StreamAction::Stop => write!(f, "stop"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateStreamRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct StreamActionRequest<'a> {
    pub stream_id: &'a str,
    pub action: StreamAction,
}

#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub data: Vec<StreamRecord>,
}

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Best-effort failure message for a non-2xx response: the JSON `error`
/// field when present, the HTTP status otherwise.
pub fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// GET /api/tasks
pub async fn fetch_streams() -> Result<Vec<StreamRecord>, ApiError> {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        let resp = gloo_net::http::Request::get(&api_url("/api/tasks"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        let envelope: ListEnvelope = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        Ok(Vec::new())
    }
}

/// POST /api/tasks with `{name}`
pub async fn create_stream(name: &str) -> Result<StreamRecord, ApiError> {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        let resp = gloo_net::http::Request::post(&api_url("/api/tasks"))
            .json(&CreateStreamRequest { name })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        let envelope: DataEnvelope<StreamRecord> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        let _ = name;
        Err(ApiError::Unsupported)
    }
}

/// DELETE /api/tasks/{id}
pub async fn delete_stream(id: u64) -> Result<(), ApiError> {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        let resp = gloo_net::http::Request::delete(&api_url(&format!("/api/tasks/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        Ok(())
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        let _ = id;
        Err(ApiError::Unsupported)
    }
}

/// POST /api/streams with `{stream_id, action}`
pub async fn stream_action(stream_id: &str, action: StreamAction) -> Result<(), ApiError> {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        let resp = gloo_net::http::Request::post(&api_url("/api/streams"))
            .json(&StreamActionRequest { stream_id, action })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        Ok(())
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        let _ = (stream_id, action);
        Err(ApiError::Unsupported)
    }
}

/// GET /api/streams/{streamId}
pub async fn fetch_stream_detail(stream_id: &str) -> Result<StreamDetail, ApiError> {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        let resp = gloo_net::http::Request::get(&api_url(&format!("/api/streams/{stream_id}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        let envelope: DataEnvelope<StreamDetail> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        let _ = stream_id;
        Err(ApiError::Unsupported)
    }
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
fn api_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{origin}{path}")
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
async fn http_error(resp: gloo_net::http::Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    ApiError::Http {
        status,
        message: extract_error_message(status, &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_snake_case() {
        let status: StreamStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(status, StreamStatus::Running);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"running\"");
    }

    #[test]
    fn start_is_offered_only_for_stopped_and_error() {
        assert!(StreamStatus::Stopped.can_start());
        assert!(StreamStatus::Error.can_start());
        assert!(!StreamStatus::Starting.can_start());
        assert!(!StreamStatus::Running.can_start());
    }

    #[test]
    fn stop_is_offered_only_for_starting_and_running() {
        assert!(StreamStatus::Starting.can_stop());
        assert!(StreamStatus::Running.can_stop());
        assert!(!StreamStatus::Stopped.can_stop());
        assert!(!StreamStatus::Error.can_stop());
    }

    #[test]
    fn create_request_body_shape() {
        let body = serde_json::to_value(CreateStreamRequest { name: "Demo" }).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Demo"}));
    }

    #[test]
    fn action_request_body_shape() {
        let body = serde_json::to_value(StreamActionRequest {
            stream_id: "abc",
            action: StreamAction::Start,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"stream_id": "abc", "action": "start"}));
    }

    #[test]
    fn error_message_prefers_json_error_field() {
        assert_eq!(
            extract_error_message(500, r#"{"error":"stream is busy"}"#),
            "stream is busy"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(extract_error_message(404, "not json"), "HTTP 404");
        assert_eq!(extract_error_message(500, r#"{"error":""}"#), "HTTP 500");
        assert_eq!(extract_error_message(502, "{}"), "HTTP 502");
    }

    #[test]
    fn list_envelope_tolerates_missing_data() {
        let envelope: ListEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn record_deserializes_without_updated_at() {
        let record: StreamRecord = serde_json::from_str(
            r#"{"id":1,"stream_id":"s-1","name":"Demo","stream_status":"stopped","created_at":"2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(record.updated_at, None);
        assert_eq!(record.stream_status, StreamStatus::Stopped);
    }
}
