use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{EntityKind, Entry, NamespaceError};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ListRequest {
    /// Drive or folder to list
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub path: String,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityKind,
}

impl From<Entry> for ListItem {
    fn from(entry: Entry) -> Self {
        Self {
            name: entry.name,
            entity_type: entry.kind,
        }
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<ListRequest>,
) -> Result<impl IntoResponse, ListError> {
    let entries = state.read().ls(&req.path)?;

    Ok((
        http::StatusCode::OK,
        Json(ListResponse {
            path: req.path,
            items: entries.into_iter().map(ListItem::from).collect(),
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        match self {
            ListError::Namespace(err) => super::bad_request(&err),
        }
    }
}

impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/list")?;
        Ok(client.post(full_url).json(&self))
    }
}
