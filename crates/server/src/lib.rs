pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use services::{
    analysis::AnalysisService, contact::ContactService, credentials::CredentialService, notifier,
};

/// Shared handles built once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: db::Database,
    pub config: config::Config,
    pub credentials: CredentialService,
    pub contact: ContactService,
    pub analysis: AnalysisService,
}

impl AppState {
    pub fn new(db: db::Database, config: config::Config) -> Self {
        let client = reqwest::Client::new();
        let notifier = notifier::from_config(&config.notify, client.clone());

        Self {
            credentials: CredentialService::new(db.clone(), config.jwt_secret.clone()),
            contact: ContactService::new(db.clone(), notifier),
            analysis: AnalysisService::new(db.clone(), client, config.carbon_api_url.clone()),
            db,
            config,
        }
    }
}

pub fn app(state: AppState) -> Router {
    // Routes that require a bearer token
    let protected_routes = Router::new()
        .nest("/projects", routes::projects::router())
        .nest("/pages", routes::pages::router())
        .nest("/results", routes::results::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let api_router = Router::new()
        .nest("/auth", routes::auth::router())
        .nest("/contact", routes::contact::router())
        .merge(protected_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn health_check() -> &'static str {
    "OK"
}
