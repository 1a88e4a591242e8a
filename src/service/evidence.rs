//! Evidence collection across the configured signal providers
//!
//! Each provider is optional and failures are absorbed here, so callers only
//! ever see the aggregate evidence.

use crate::model::{Evidence, JobSignal, NewsItem, ProviderConfig};
use crate::retriever::{JSearchRetriever, NewsDataRetriever, SignalSource};
use crate::service::domain::derive_identity;

type NewsSource = Box<dyn SignalSource<Signal = NewsItem>>;
type JobSource = Box<dyn SignalSource<Signal = JobSignal>>;

/// Collects domain, news and job evidence for a company
pub struct EvidenceCollector {
    news: Option<NewsSource>,
    jobs: Option<JobSource>,
}

impl EvidenceCollector {
    pub fn new(news: Option<NewsSource>, jobs: Option<JobSource>) -> Self {
        Self { news, jobs }
    }

    /// Build the collector from provider settings; missing keys disable a source
    pub fn from_config(config: &ProviderConfig) -> Self {
        let news = config.news_api_key.clone().map(|key| {
            Box::new(NewsDataRetriever::new(key, &config.news_base_url)) as NewsSource
        });
        if news.is_none() {
            tracing::info!("NEWS_API_KEY not set, news collection disabled");
        }

        let jobs = config.jsearch_api_key.clone().map(|key| {
            Box::new(JSearchRetriever::new(key, &config.jsearch_base_url)) as JobSource
        });
        if jobs.is_none() {
            tracing::info!("JSEARCH_API_KEY not set, job collection disabled");
        }

        Self::new(news, jobs)
    }

    /// Gather everything known about a company; never fails
    pub async fn collect(&self, company_name: &str, website: Option<&str>) -> Evidence {
        let identity = derive_identity(website);

        let (news, jobs) = tokio::join!(
            gather(self.news.as_deref(), company_name),
            gather(self.jobs.as_deref(), company_name),
        );

        tracing::info!(
            company = %company_name,
            domain = %identity.domain,
            news_count = news.len(),
            job_count = jobs.len(),
            "Evidence collected"
        );

        Evidence {
            identity,
            news,
            jobs,
        }
    }
}

/// Fetch from one optional source, degrading to an empty list
async fn gather<T: Send>(
    source: Option<&dyn SignalSource<Signal = T>>,
    company_name: &str,
) -> Vec<T> {
    let Some(source) = source else {
        return Vec::new();
    };

    match source.fetch(company_name).await {
        Ok(signals) => signals,
        Err(e) => {
            tracing::warn!(
                provider = source.name(),
                company = %company_name,
                error = %e,
                "Signal provider failed, continuing without it"
            );
            Vec::new()
        }
    }
}
