use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use common::prelude::NamespaceError;

use crate::ServiceState;

pub mod create;
pub mod delete;
pub mod drives;
pub mod list;
pub mod mv;
pub mod read;
pub mod stat;
pub mod write;

// Re-export for convenience
pub use create::CreateRequest;
pub use delete::DeleteRequest;
pub use drives::DrivesRequest;
pub use list::ListRequest;
pub use mv::MoveRequest;
pub use read::ReadRequest;
pub use stat::StatRequest;
pub use write::WriteRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/create", post(create::handler))
        .route("/delete", post(delete::handler))
        .route("/move", post(mv::handler))
        .route("/write", post(write::handler))
        .route("/read", post(read::handler))
        .route("/list", post(list::handler))
        .route("/drives", post(drives::handler))
        .route("/stat", post(stat::handler))
        .with_state(state)
}

/// Body of every rejected namespace operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Namespace failures are all the caller's fault: 400 with the reason
pub(crate) fn bad_request(err: &NamespaceError) -> Response {
    tracing::debug!(error = %err, kind = ?err.kind(), "namespace operation rejected");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            detail: err.to_string(),
        }),
    )
        .into_response()
}
