use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::NamespaceError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct WriteRequest {
    /// Path of the file to overwrite
    pub path: String,

    /// New content, replacing whatever the file held
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    pub message: String,
    pub path: String,
    /// Bytes written
    pub size: usize,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<WriteRequest>,
) -> Result<impl IntoResponse, WriteError> {
    let size = req.content.len();
    state.write().write(&req.path, req.content)?;

    tracing::info!(path = %req.path, size, "written");

    Ok((
        http::StatusCode::OK,
        Json(WriteResponse {
            message: format!("Content written to {}.", req.path),
            path: req.path,
            size,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl IntoResponse for WriteError {
    fn into_response(self) -> Response {
        match self {
            WriteError::Namespace(err) => super::bad_request(&err),
        }
    }
}

impl ApiRequest for WriteRequest {
    type Response = WriteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/write")?;
        Ok(client.post(full_url).json(&self))
    }
}
