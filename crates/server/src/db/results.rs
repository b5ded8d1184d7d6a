use super::{models::PageResult, Database};

impl Database {
    pub async fn insert_result(&self, result: &PageResult) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO results (id, page_id, co2_emission, page_weight, https_requests, green_hosting, score, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&result.id)
        .bind(&result.page_id)
        .bind(result.co2_emission)
        .bind(result.page_weight)
        .bind(result.https_requests)
        .bind(result.green_hosting)
        .bind(result.score)
        .bind(result.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Newest result for the page. Several rows may exist after re-analysis.
    pub async fn latest_result_for_page(&self, page_id: &str) -> sqlx::Result<Option<PageResult>> {
        sqlx::query_as::<_, PageResult>(
            r#"
            SELECT id, page_id, co2_emission, page_weight, https_requests, green_hosting, score,
                created_at
            FROM results
            WHERE page_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(page_id)
        .fetch_optional(&self.pool)
        .await
    }
}
