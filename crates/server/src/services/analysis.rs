use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::db::{models::PageResult, Database};

/// Failure talking to the carbon API. Never leaves this module; callers
/// only see an absent result.
#[derive(Debug, thiserror::Error)]
enum AnalysisError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("carbon API responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing numeric field `{0}`")]
    MissingField(&'static str),
}

/// Figures extracted from one carbon API response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonReport {
    pub co2_grams: f64,
    pub adjusted_bytes: f64,
    pub green: bool,
}

impl CarbonReport {
    fn from_json(body: &str) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_str(body)?;

        let co2_grams = value
            .pointer("/statistics/co2/grid/grams")
            .and_then(Value::as_f64)
            .ok_or(AnalysisError::MissingField("statistics.co2.grid.grams"))?;
        let adjusted_bytes = value
            .pointer("/statistics/adjustedBytes")
            .and_then(Value::as_f64)
            .ok_or(AnalysisError::MissingField("statistics.adjustedBytes"))?;
        let green = value.get("green").and_then(Value::as_bool).unwrap_or(false);

        Ok(Self {
            co2_grams,
            adjusted_bytes,
            green,
        })
    }

    pub fn page_weight_kb(&self) -> f64 {
        self.adjusted_bytes / 1024.0
    }

    /// Unclamped: heavy pages go negative.
    pub fn score(&self) -> f64 {
        100.0 - self.co2_grams * 100.0
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    db: Database,
    client: reqwest::Client,
    api_url: String,
}

impl AnalysisService {
    pub fn new(db: Database, client: reqwest::Client, api_url: String) -> Self {
        Self {
            db,
            client,
            api_url,
        }
    }

    /// Runs one analysis and stores a new result row. `None` covers an
    /// unknown page, a page without URL and any carbon API failure.
    pub async fn analyze_page(&self, page_id: &str) -> sqlx::Result<Option<PageResult>> {
        let page = match self.db.find_page(page_id).await? {
            Some(page) if !page.url.is_empty() => page,
            _ => {
                tracing::warn!(page_id, "Page not found or has no URL, skipping analysis");
                return Ok(None);
            }
        };

        let report = match self.fetch_report(&page.url).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(page_id, url = %page.url, "Analysis failed: {e}");
                return Ok(None);
            }
        };

        let result = PageResult {
            id: Uuid::new_v4().to_string(),
            page_id: page.id,
            co2_emission: report.co2_grams,
            page_weight: report.page_weight_kb(),
            https_requests: 0,
            green_hosting: report.green,
            score: report.score(),
            created_at: Utc::now(),
        };

        self.db.insert_result(&result).await?;
        tracing::info!(
            page_id,
            co2_grams = result.co2_emission,
            score = result.score,
            "Analysis stored"
        );

        Ok(Some(result))
    }

    pub async fn result_for_page(&self, page_id: &str) -> sqlx::Result<Option<PageResult>> {
        self.db.latest_result_for_page(page_id).await
    }

    async fn fetch_report(&self, page_url: &str) -> Result<CarbonReport, AnalysisError> {
        let request_url = format!("{}{}", self.api_url, page_url);
        tracing::debug!("Analyzing {request_url}");

        let response = self.client.get(&request_url).send().await?;
        if !response.status().is_success() {
            return Err(AnalysisError::Status(response.status()));
        }

        let body = response.text().await?;
        CarbonReport::from_json(&body)
    }
}
