use std::env;

pub const DEFAULT_CARBON_API_URL: &str = "https://api.websitecarbon.com/site?url=";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Prefix the page URL is appended to, verbatim.
    pub carbon_api_url: String,
    pub notify: NotifyConfig,
}

#[derive(Clone, Debug)]
pub struct NotifyConfig {
    /// Mail relay endpoint. Notifications are only logged when unset.
    pub url: Option<String>,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./data/ecoweb.db?mode=rwc".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-change-in-production".to_string()),
            carbon_api_url: env::var("CARBON_API_URL")
                .unwrap_or_else(|_| DEFAULT_CARBON_API_URL.to_string()),
            notify: NotifyConfig {
                url: env::var("NOTIFY_URL").ok().filter(|u| !u.trim().is_empty()),
                from: env::var("NOTIFY_FROM")
                    .unwrap_or_else(|_| "no-reply@ecoweb.local".to_string()),
                to: env::var("NOTIFY_TO").unwrap_or_else(|_| "contact@ecoweb.local".to_string()),
            },
        }
    }
}
