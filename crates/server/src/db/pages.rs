use chrono::Utc;
use uuid::Uuid;

use super::{models::Page, Database};

impl Database {
    pub async fn list_pages(&self, project_id: &str) -> sqlx::Result<Vec<Page>> {
        sqlx::query_as::<_, Page>(
            "SELECT id, project_id, url, created_at FROM pages WHERE project_id = ? ORDER BY created_at ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_page(&self, id: &str) -> sqlx::Result<Option<Page>> {
        sqlx::query_as::<_, Page>("SELECT id, project_id, url, created_at FROM pages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_page(&self, project_id: &str, url: &str) -> sqlx::Result<Page> {
        let page = Page {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            url: url.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO pages (id, project_id, url, created_at) VALUES (?, ?, ?, ?)")
            .bind(&page.id)
            .bind(&page.project_id)
            .bind(&page.url)
            .bind(page.created_at)
            .execute(&self.pool)
            .await?;

        Ok(page)
    }

    /// Removes the page together with every result recorded for it.
    /// Returns whether a page row was deleted.
    pub async fn delete_page(&self, id: &str) -> sqlx::Result<bool> {
        let mut tx = self.pool.begin().await?;

        let results = sqlx::query("DELETE FROM results WHERE page_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let pages = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            page_id = id,
            results = results.rows_affected(),
            "Deleted page"
        );

        Ok(pages.rows_affected() > 0)
    }
}
