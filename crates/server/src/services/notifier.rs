// Contact notifications. Delivery goes through an HTTP mail relay; without
// one configured the notification is only logged.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::{config::NotifyConfig, db::models::ContactMessage};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &ContactMessage) -> Result<()>;
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl Notification {
    pub fn for_message(message: &ContactMessage, from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("New contact message: {}", message.subject),
            text: format!(
                "New contact message received:\n\nFrom: {} ({})\nSubject: {}\n\nMessage:\n{}",
                message.name, message.email, message.subject, message.message
            ),
        }
    }
}

pub struct HttpNotifier {
    client: reqwest::Client,
    url: String,
    from: String,
    to: String,
}

impl HttpNotifier {
    pub fn new(client: reqwest::Client, url: String, from: String, to: String) -> Self {
        Self {
            client,
            url,
            from,
            to,
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, message: &ContactMessage) -> Result<()> {
        let notification = Notification::for_message(message, &self.from, &self.to);

        let response = self
            .client
            .post(&self.url)
            .json(&notification)
            .send()
            .await?;

        if response.status().is_success() {
            tracing::info!(message_id = %message.id, "Notification sent");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Mail relay rejected notification with status {}: {}",
                status,
                body
            ))
        }
    }
}

pub struct LogNotifier {
    from: String,
    to: String,
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &ContactMessage) -> Result<()> {
        let notification = Notification::for_message(message, &self.from, &self.to);
        tracing::info!(
            message_id = %message.id,
            to = %notification.to,
            subject = %notification.subject,
            "No mail relay configured, notification not delivered"
        );
        Ok(())
    }
}

pub fn from_config(config: &NotifyConfig, client: reqwest::Client) -> Arc<dyn Notifier> {
    match &config.url {
        Some(url) => Arc::new(HttpNotifier::new(
            client,
            url.clone(),
            config.from.clone(),
            config.to.clone(),
        )),
        None => Arc::new(LogNotifier {
            from: config.from.clone(),
            to: config.to.clone(),
        }),
    }
}
