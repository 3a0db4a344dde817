use super::types::{ErrorResponse, QueryRequest, QueryResponse};
use crate::chain::Chain;
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<Chain>,
}

pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Received query ({} chars)",
        request.question.chars().count()
    );

    match state.chain.invoke(&request.question).await {
        Ok(response) => {
            info!("Answered query ({} chars)", response.chars().count());
            Ok(Json(QueryResponse { response }))
        }
        Err(e) => {
            error!("Failed to answer query: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Processing error: {}", e),
                }),
            ))
        }
    }
}
