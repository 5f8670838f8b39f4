use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{ListStandardsResponse, UpdateStandardRequest, UpdateStandardResponse};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Backend base URL, taken from `STANDARDS_API_URL` at build time when set
pub fn configured_base_url() -> String {
    option_env!("STANDARDS_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Errors returned by [`ApiClient`] calls
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the configured base URL
    pub fn new() -> Self {
        Self {
            base_url: configured_base_url(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Get every standard with its fee configuration
    pub async fn list_standards(&self) -> Result<ListStandardsResponse, ApiError> {
        let response = Request::get(&self.endpoint("standards"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }

    /// Update the fee configuration of a standard
    pub async fn update_standard(
        &self,
        request: UpdateStandardRequest,
    ) -> Result<UpdateStandardResponse, ApiError> {
        let response = Request::put(&self.endpoint("standards"))
            .json(&request)
            .map_err(|e| ApiError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::Server { status, message });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
