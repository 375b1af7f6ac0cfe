//! REST client for the attendance API.
//!
//! Implements the wizard engine's collaborator ports ([`EmployeeDirectory`],
//! [`ActivityCatalog`], [`AttendanceStore`]) over HTTP using [`reqwest`].
//! Responses arrive in the server's `{ "data": ... }` envelope and errors
//! in `{ "error": ..., "code": ... }`; both are unwrapped here so the
//! engine only ever sees domain types and [`CoreError`] values carrying
//! the server's user-facing message.

use async_trait::async_trait;
use presensi_core::catalog::ActivityCatalog;
use presensi_core::domain::{Activity, AttendanceRecord, CreateAttendanceRecord, Employee};
use presensi_core::error::CoreError;
use presensi_core::lookup::EmployeeDirectory;
use presensi_core::submit::AttendanceStore;
use reqwest::StatusCode;
use serde::Deserialize;

/// HTTP client for a single attendance API deployment.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

/// The server's `{ "data": T }` response envelope.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// The server's `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl RestClient {
    /// Create a client for the given base URL, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling across services).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    /// Extract the server's user-facing message from an error response,
    /// falling back to the status code when the body has an unexpected
    /// shape.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {status}"),
        }
    }
}

#[async_trait]
impl EmployeeDirectory for RestClient {
    /// `GET /api/v1/employees/{nip}`. A 404 is a normal answer
    /// (`Ok(None)`), not an error.
    async fn find_by_nip(&self, nip: &str) -> Result<Option<Employee>, CoreError> {
        let response = self
            .client
            .get(self.url(&format!("/employees/{nip}")))
            .send()
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(CoreError::Transport(Self::error_message(response).await));
        }

        let envelope = response
            .json::<DataEnvelope<Employee>>()
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;
        Ok(Some(envelope.data))
    }
}

#[async_trait]
impl ActivityCatalog for RestClient {
    /// `GET /api/v1/activities?active=true`.
    async fn list_active(&self) -> Result<Vec<Activity>, CoreError> {
        let response = self
            .client
            .get(self.url("/activities"))
            .query(&[("active", "true")])
            .send()
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::Transport(Self::error_message(response).await));
        }

        let envelope = response
            .json::<DataEnvelope<Vec<Activity>>>()
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl AttendanceStore for RestClient {
    /// `POST /api/v1/records`. A 400 carries the server's validation
    /// message, surfaced verbatim so the kiosk can toast it.
    async fn create(
        &self,
        command: CreateAttendanceRecord,
    ) -> Result<AttendanceRecord, CoreError> {
        let response = self
            .client
            .post(self.url("/records"))
            .json(&command)
            .send()
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let message = Self::error_message(response).await;
            tracing::debug!(message = %message, "Submission rejected by the server");
            return Err(CoreError::Validation(message));
        }
        if !status.is_success() {
            return Err(CoreError::Transport(Self::error_message(response).await));
        }

        let envelope = response
            .json::<DataEnvelope<AttendanceRecord>>()
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;
        Ok(envelope.data)
    }
}
