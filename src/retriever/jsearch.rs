//! JSearch (RapidAPI) job posting retriever

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, host_of, present, RetrieverError, SignalSource, USER_AGENT};
use crate::model::JobSignal;

/// Maximum job postings kept per company
pub const MAX_JOB_SIGNALS: usize = 8;

const DEFAULT_RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";
const REMOTE_LOCATION: &str = "Remote";
const DEFAULT_EMPLOYMENT_TYPE: &str = "Full-time";

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    #[serde(default)]
    data: Option<Vec<JSearchJob>>,
}

#[derive(Debug, Default, Deserialize)]
struct JSearchJob {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_country: Option<String>,
    job_employment_type: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
}

impl JSearchJob {
    fn into_job_signal(self) -> JobSignal {
        let country = present(self.job_country);
        let location = match (present(self.job_city), country) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(city), None) => city,
            (None, Some(country)) => country,
            (None, None) => REMOTE_LOCATION.to_string(),
        };

        JobSignal {
            title: self.job_title.unwrap_or_default(),
            company: self.employer_name.unwrap_or_default(),
            location,
            employment_type: present(self.job_employment_type)
                .unwrap_or_else(|| DEFAULT_EMPLOYMENT_TYPE.to_string()),
            posted: present(self.job_posted_at_datetime_utc)
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
        }
    }
}

/// Retriever for recent job postings by a company
pub struct JSearchRetriever {
    client: Client,
    api_key: String,
    base_url: String,
    rapidapi_host: String,
}

impl JSearchRetriever {
    pub fn new(api_key: String, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let rapidapi_host = host_of(&base_url)
            .filter(|h| h.ends_with("rapidapi.com"))
            .unwrap_or_else(|| DEFAULT_RAPIDAPI_HOST.to_string());

        Self {
            client: Client::new(),
            api_key,
            base_url,
            rapidapi_host,
        }
    }
}

#[async_trait]
impl SignalSource for JSearchRetriever {
    type Signal = JobSignal;

    fn name(&self) -> &'static str {
        "jsearch"
    }

    async fn fetch(&self, company_name: &str) -> Result<Vec<JobSignal>, RetrieverError> {
        let url = format!("{}/search", self.base_url);
        let query = format!("{} jobs", company_name);

        tracing::debug!(company = %company_name, url = %url, "Fetching job postings");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.rapidapi_host)
            .query(&[
                ("query", query.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("date_posted", "month"),
            ])
            .send()
            .await?;

        let response = check_status(response).await?;

        let body: JSearchResponse = response
            .json()
            .await
            .map_err(|e| RetrieverError::ParseError(format!("Invalid JSearch response: {}", e)))?;

        let jobs: Vec<JobSignal> = body
            .data
            .unwrap_or_default()
            .into_iter()
            .take(MAX_JOB_SIGNALS)
            .map(JSearchJob::into_job_signal)
            .collect();

        tracing::debug!(company = %company_name, count = jobs.len(), "Fetched job postings");

        Ok(jobs)
    }
}
