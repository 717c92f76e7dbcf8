use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::api::error::ApiError;
use crate::api::response::{
    parse_envelope, parse_export_failure, parse_filter_body, parse_stats_body,
};
use crate::models::{AttendanceRecord, DashboardStats, FilterCriteria};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Thin client over the attendance backend. The backend tracks its own
/// session in a cookie, so the inner client carries a cookie store.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("DASHBOARD_URL").context("DASHBOARD_URL env var not set")?;
        Self::new(base_url)
    }

    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = self
            .http
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?
            .text()
            .await?;
        parse_envelope(&body, "Login failed")
    }

    pub async fn end_session(&self) -> Result<(), ApiError> {
        let body = self
            .http
            .post(self.url("/logout"))
            .send()
            .await?
            .text()
            .await?;
        parse_envelope(&body, "Logout failed")
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let body = self
            .http
            .get(self.url("/api/dashboard/stats"))
            .send()
            .await?
            .text()
            .await?;
        parse_stats_body(&body)
    }

    pub async fn filter_records(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let body = self
            .http
            .post(self.url("/api/attendance/filter"))
            .json(criteria)
            .send()
            .await?
            .text()
            .await?;
        parse_filter_body(&body)
    }

    /// Fetches the generated spreadsheet as an opaque byte blob. A non-2xx
    /// status means the server answered with a JSON `{message}` body instead.
    pub async fn export_report(&self, criteria: &FilterCriteria) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .post(self.url("/api/attendance/download"))
            .json(criteria)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let body = response.text().await?;
            Err(parse_export_failure(&body, "Failed to download report"))
        }
    }
}
