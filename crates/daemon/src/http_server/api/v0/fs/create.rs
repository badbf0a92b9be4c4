use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{EntityKind, NamespaceError};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CreateRequest {
    /// Parent path; leave empty when creating a drive
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub path: String,

    /// Entity type: drive, folder or file
    #[arg(long = "type", value_name = "TYPE")]
    pub entity_type: String,

    /// Name of the new entity
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub message: String,
    pub path: String,
    pub entity_type: EntityKind,
    pub name: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<CreateRequest>,
) -> Result<impl IntoResponse, CreateError> {
    let kind = state
        .write()
        .create(&req.path, &req.entity_type, &req.name)?;

    tracing::info!(path = %req.path, name = %req.name, %kind, "created");

    Ok((
        http::StatusCode::CREATED,
        Json(CreateResponse {
            message: format!("{} {} created successfully.", kind.title(), req.name),
            path: req.path,
            entity_type: kind,
            name: req.name,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        match self {
            CreateError::Namespace(err) => super::bad_request(&err),
        }
    }
}

impl ApiRequest for CreateRequest {
    type Response = CreateResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/create")?;
        Ok(client.post(full_url).json(&self))
    }
}
