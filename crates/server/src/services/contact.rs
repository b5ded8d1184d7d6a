use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::{
    db::{models::ContactMessage, Database},
    error::FieldError,
    services::notifier::Notifier,
};

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("invalid contact message")]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
        return;
    }
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(FieldError::new(
            field,
            format!("{label} must be between {min} and {max} characters"),
        ));
    }
}

/// Checks every field and returns all failures; empty means valid.
pub fn validate(request: &ContactRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_length(&mut errors, "name", "Name", &request.name, 2, 100);

    if request.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !request.email.validate_email() {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    check_length(&mut errors, "subject", "Subject", &request.subject, 5, 200);
    check_length(&mut errors, "message", "Message", &request.message, 10, 1000);

    errors
}

#[derive(Clone)]
pub struct ContactService {
    db: Database,
    notifier: Arc<dyn Notifier>,
}

impl ContactService {
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Persists the message, then notifies. Notification failures are
    /// logged and never undo the save.
    pub async fn save_message(
        &self,
        request: ContactRequest,
    ) -> Result<ContactMessage, ContactError> {
        let errors = validate(&request);
        if !errors.is_empty() {
            for e in &errors {
                tracing::warn!(field = e.field, "Contact validation failed: {}", e.message);
            }
            return Err(ContactError::Invalid(errors));
        }

        tracing::info!("Saving contact message from {}", request.email);

        let message = ContactMessage {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
            created_at: Utc::now(),
            is_read: false,
        };

        self.db.insert_contact_message(&message).await?;

        if let Err(e) = self.notifier.notify(&message).await {
            tracing::error!(
                message_id = %message.id,
                "Failed to send notification, message was saved: {e:#}"
            );
        }

        Ok(message)
    }
}
