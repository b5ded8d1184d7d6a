use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::{
    db::models::Project,
    error::{AppError, Result},
    middleware::auth::AuthUser,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", get(get_project))
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
}

async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    Ok(Json(state.db.list_projects().await?))
}

async fn create_project(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<Json<Project>> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Project name is required".to_string()));
    }

    let project = state
        .db
        .insert_project(&body.name, body.description.as_deref())
        .await?;
    tracing::info!(project_id = %project.id, created_by = %user.email, "Created project");

    Ok(Json(project))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>> {
    state
        .db
        .find_project(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}
