use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::NamespaceError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct MoveRequest {
    /// Path of the entity to move
    pub source_path: String,

    /// Folder or drive to move it into; the name is kept
    pub destination_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub message: String,
    pub source_path: String,
    pub destination_path: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<MoveRequest>,
) -> Result<impl IntoResponse, MoveError> {
    state.write().mv(&req.source_path, &req.destination_path)?;

    tracing::info!(source = %req.source_path, destination = %req.destination_path, "moved");

    Ok((
        http::StatusCode::OK,
        Json(MoveResponse {
            message: format!("Moved {} to {}.", req.source_path, req.destination_path),
            source_path: req.source_path,
            destination_path: req.destination_path,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl IntoResponse for MoveError {
    fn into_response(self) -> Response {
        match self {
            MoveError::Namespace(err) => super::bad_request(&err),
        }
    }
}

impl ApiRequest for MoveRequest {
    type Response = MoveResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/move")?;
        Ok(client.post(full_url).json(&self))
    }
}
