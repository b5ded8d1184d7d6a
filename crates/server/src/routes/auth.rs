use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::models::User,
    error::{AppError, Result},
    services::credentials::NewUser,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/current-user", get(current_user))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUserQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<Json<AuthResponse>> {
    if body.email.is_empty() || !body.email.contains('@') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if body.password.chars().count() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let user = state.credentials.register(body).await?;
    let token = state.credentials.issue_token(&user)?;

    Ok(Json(AuthResponse { user, token }))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = state.credentials.login(&body.email, &body.password).await?;
    let token = state.credentials.issue_token(&user)?;

    Ok(Json(AuthResponse { user, token }))
}

async fn current_user(
    State(state): State<AppState>,
    Query(query): Query<CurrentUserQuery>,
) -> Result<Json<User>> {
    let user = state.credentials.current_user(&query.email).await?;
    Ok(Json(user))
}
