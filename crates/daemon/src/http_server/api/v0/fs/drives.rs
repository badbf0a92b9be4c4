use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct DrivesRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrivesResponse {
    pub drives: Vec<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(_req): Json<DrivesRequest>,
) -> impl IntoResponse {
    let drives = state
        .read()
        .drives()
        .into_iter()
        .map(str::to_string)
        .collect();

    (http::StatusCode::OK, Json(DrivesResponse { drives }))
}

impl ApiRequest for DrivesRequest {
    type Response = DrivesResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/fs/drives")?;
        Ok(client.post(full_url).json(&self))
    }
}
