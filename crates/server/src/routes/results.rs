use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{db::models::PageResult, error::Result, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze/:page_id", post(analyze))
        .route("/page/:page_id", get(get_by_page))
}

/// Responds `null` when the analysis produced nothing.
async fn analyze(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<Json<Option<PageResult>>> {
    Ok(Json(state.analysis.analyze_page(&page_id).await?))
}

async fn get_by_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<Json<Option<PageResult>>> {
    Ok(Json(state.analysis.result_for_page(&page_id).await?))
}
