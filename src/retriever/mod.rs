//! Signal retrievers for fetching company evidence from third-party providers

mod jsearch;
mod newsdata;

use async_trait::async_trait;
use url::Url;

pub use jsearch::JSearchRetriever;
pub use newsdata::NewsDataRetriever;

const USER_AGENT: &str = "company-brief/0.1";

#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Trait for evidence providers
///
/// A provider either returns its normalized signals or an error; callers decide
/// how to degrade.
#[async_trait]
pub trait SignalSource: Send + Sync {
    type Signal: Send;

    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Fetch signals about the named company
    async fn fetch(&self, company_name: &str) -> Result<Vec<Self::Signal>, RetrieverError>;
}

/// Turn a non-success response into an error, keeping the body for logs
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RetrieverError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RetrieverError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RetrieverError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

/// Host of a URL, if it parses and has one
fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}

/// Keep a provider string only if it has content
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
