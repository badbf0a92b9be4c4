use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{NamespaceError, Stat};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct StatRequest {
    /// Path of the entity to describe
    pub path: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<StatRequest>,
) -> Result<impl IntoResponse, StatError> {
    let stat = state.read().stat(&req.path)?;
    Ok((http::StatusCode::OK, Json(stat)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl IntoResponse for StatError {
    fn into_response(self) -> Response {
        match self {
            StatError::Namespace(err) => super::bad_request(&err),
        }
    }
}

impl ApiRequest for StatRequest {
    type Response = Stat;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/stat")?;
        Ok(client.post(full_url).json(&self))
    }
}
