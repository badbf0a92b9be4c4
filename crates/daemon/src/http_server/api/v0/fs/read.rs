use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::NamespaceError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ReadRequest {
    /// Path of the file to read
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    pub path: String,
    pub content: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<ReadRequest>,
) -> Result<impl IntoResponse, ReadError> {
    let content = state.read().read(&req.path)?.to_string();

    Ok((
        http::StatusCode::OK,
        Json(ReadResponse {
            path: req.path,
            content,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        match self {
            ReadError::Namespace(err) => super::bad_request(&err),
        }
    }
}

impl ApiRequest for ReadRequest {
    type Response = ReadResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/read")?;
        Ok(client.post(full_url).json(&self))
    }
}
