use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Failure talking to the citas backend. The HTTP status is preserved so
/// callers can tell a backend-side scheduling conflict (409) apart from any
/// other rejection.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::CONFLICT)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Thin reqwest wrapper over the external citas REST backend. Bearer tokens
/// are forwarded opaquely; this layer never validates them.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.citas_api_url.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let headers = self.get_headers(auth_token);

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            error!("API error ({}): {}", status, error_text);

            // FastAPI wraps messages as {"detail": "..."}; unwrap when present
            // so the caller sees the backend's own words.
            let message = serde_json::from_str::<Value>(&error_text)
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
                .unwrap_or(error_text);

            return Err(ApiError::Status { status, message });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}
