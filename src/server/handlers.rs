use super::types::{BatchRequest, BatchResponse, ErrorResponse};
use crate::{
    Error,
    batcher::{Batcher, ChatRequest, ChatResult},
};
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub batcher: Batcher,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResult>, HandlerError> {
    info!(
        "Received chat request for chat_id: {}",
        request.chat_id.as_deref().unwrap_or("<missing>")
    );

    match state.batcher.process_one(&request).await {
        Ok(result) => {
            info!("Successfully processed chat {}", result.chat_id());
            Ok(Json(result))
        }
        Err(e) => Err(into_response(e)),
    }
}

pub async fn generate_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, HandlerError> {
    let queries = request.queries.unwrap_or_default();
    info!("Processing batch request with {} queries", queries.len());

    match state.batcher.process(&queries).await {
        Ok(responses) => Ok(Json(BatchResponse::new(responses))),
        Err(e) => Err(into_response(e)),
    }
}

pub(crate) fn status_for(error: &Error) -> StatusCode {
    if error.is_request_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn into_response(e: Error) -> HandlerError {
    let status = status_for(&e);
    if status.is_server_error() {
        error!("Failed to process request: {}", e);
    } else {
        warn!("Rejected request: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            detail: e.to_string(),
        }),
    )
}
