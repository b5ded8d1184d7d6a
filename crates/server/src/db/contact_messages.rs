use super::{models::ContactMessage, Database};

impl Database {
    pub async fn insert_contact_message(&self, message: &ContactMessage) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, subject, message, created_at, is_read) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.created_at)
        .bind(message.is_read)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
