use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::{
    db::models::Page,
    error::{AppError, Result},
    middleware::auth::AuthUser,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project/:project_id", get(list_pages).post(create_page))
        .route("/:id", delete(delete_page))
}

#[derive(Debug, Deserialize)]
pub struct CreatePageRequest {
    #[serde(default)]
    pub url: String,
}

async fn list_pages(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<Page>>> {
    Ok(Json(state.db.list_pages(&project_id).await?))
}

async fn create_page(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(project_id): Path<String>,
    Json(body): Json<CreatePageRequest>,
) -> Result<Json<Page>> {
    if state.db.find_project(&project_id).await?.is_none() {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    let page = state.db.insert_page(&project_id, &body.url).await?;
    tracing::info!(
        page_id = %page.id,
        project_id = %project_id,
        created_by = %user.email,
        "Created page"
    );

    Ok(Json(page))
}

// Unknown ids still answer 204.
async fn delete_page(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    match state.db.delete_page(&id).await {
        Ok(_) => StatusCode::NO_CONTENT,
        Err(e) => {
            tracing::error!(page_id = %id, "Failed to delete page: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
