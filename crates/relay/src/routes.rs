//! HTTP surface of the relay.

use crate::error::RelayError;
use crate::service::Relay;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use protocol::SubmitResponse;
use tracing::{error, warn};

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Submit failed: {}", self);
        } else {
            warn!("Rejected submit: {}", self);
        }
        (status, Json(SubmitResponse::error(self.to_string()))).into_response()
    }
}

/// Router exposing the submit endpoint at `submit_path`.
pub fn router(relay: Relay, submit_path: &str) -> Router {
    Router::new()
        .route(submit_path, post(submit_score))
        .with_state(relay)
}

async fn submit_score(State(relay): State<Relay>, body: Bytes) -> Result<(StatusCode, Json<SubmitResponse>), RelayError> {
    let response = relay.submit(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}
