use reqwest::{header::HeaderMap, header::HeaderValue, Client};
use serde::Deserialize;
use url::Url;

use super::error::ApiError;
use super::ApiRequest;

/// Error body returned by the daemon for rejected operations
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub remote: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(remote: &Url) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
        })
    }

    pub async fn call<T: ApiRequest>(&mut self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.remote, &self.client)?;
        let response = request_builder.send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T::Response>().await?)
        } else {
            let text = response.text().await?;
            // surface the daemon's reason rather than the raw JSON envelope
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.detail)
                .unwrap_or(text);
            Err(ApiError::HttpStatus(status, message))
        }
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}
