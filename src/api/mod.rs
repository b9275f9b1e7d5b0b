pub mod models;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    log_debug, log_warn,
};

pub use models::{parse_rows, AttendanceSubmission, Person, RawRow};

const ENABLE_LOGS: bool = true;

/// Client for the single attendance endpoint. Cheap to clone; clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Exact credential lookup (`?user=&pass=`).
    pub async fn lookup_credentials(&self, username: &str, password: &str) -> AppResult<Vec<Person>> {
        let rows = self
            .get_rows(&[("user", username), ("pass", password)])
            .await
            .map_err(|err| AppError::Connectivity(format!("{err:#}")))?;
        Ok(rows.iter().map(Person::from_row).collect())
    }

    /// Full person listing, used when the exact lookup comes back empty.
    pub async fn list_people(&self) -> AppResult<Vec<Person>> {
        let rows = self
            .get_rows(&[])
            .await
            .map_err(|err| AppError::Connectivity(format!("{err:#}")))?;
        Ok(rows.iter().map(Person::from_row).collect())
    }

    /// Attendance history for one record, still in raw server shape.
    pub async fn fetch_attendance(&self, record: &str) -> AppResult<Vec<RawRow>> {
        self.get_rows(&[("record", record)]).await.map_err(|err| {
            log_warn!("Attendance fetch for record {record} failed: {err:#}");
            AppError::FetchFailed(format!("{err:#}"))
        })
    }

    pub async fn submit_attendance(&self, submission: &AttendanceSubmission) -> AppResult<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|err| AppError::Submission(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Submission(format!("server responded with {status}")));
        }

        log_debug!(
            "Attendance submitted for record {} ({})",
            submission.record_user,
            submission.join_user
        );
        Ok(())
    }

    async fn get_rows(&self, query: &[(&str, &str)]) -> Result<Vec<RawRow>> {
        let mut request = self.http.get(&self.endpoint);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("server responded with {status}"));
        }

        let body: Value = response
            .json()
            .await
            .context("response body is not valid JSON")?;

        Ok(parse_rows(body))
    }
}
