use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::NamespaceError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeleteRequest {
    /// Path of the entity to delete, together with everything beneath it
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub path: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<DeleteRequest>,
) -> Result<impl IntoResponse, DeleteError> {
    state.write().delete(&req.path)?;

    tracing::info!(path = %req.path, "deleted");

    Ok((
        http::StatusCode::OK,
        Json(DeleteResponse {
            message: format!("Entity at {} deleted successfully.", req.path),
            path: req.path,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        match self {
            DeleteError::Namespace(err) => super::bad_request(&err),
        }
    }
}

impl ApiRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/delete")?;
        Ok(client.post(full_url).json(&self))
    }
}
