//! Brief creation pipeline
//!
//! validate → collect evidence → infer tech → synthesize → persist.
//! Only validation and persistence can fail; every other stage degrades.

use std::sync::Arc;

use crate::db::DbError;
use crate::db::repository::BriefStore;
use crate::model::{Brief, BriefRequest, MissingRequiredFields, NewBrief};
use crate::service::evidence::EvidenceCollector;
use crate::service::synthesis::{NarrativeSynthesizer, SynthesisContext};
use crate::service::tech_stack::infer_tech_stack;

#[derive(Debug, thiserror::Error)]
pub enum BriefServiceError {
    #[error(transparent)]
    InvalidRequest(#[from] MissingRequiredFields),

    #[error("Database error: {0}")]
    DbError(#[from] DbError),
}

/// Service that builds and stores outreach briefs
pub struct BriefService {
    collector: EvidenceCollector,
    synthesizer: NarrativeSynthesizer,
    store: Arc<dyn BriefStore>,
}

impl BriefService {
    pub fn new(
        collector: EvidenceCollector,
        synthesizer: NarrativeSynthesizer,
        store: Arc<dyn BriefStore>,
    ) -> Self {
        Self {
            collector,
            synthesizer,
            store,
        }
    }

    /// Run the full pipeline for one request and return the stored brief
    pub async fn create(&self, request: BriefRequest) -> Result<Brief, BriefServiceError> {
        let request = request.validate()?;

        tracing::info!(company = %request.company_name, "Creating strategic brief");

        let evidence = self
            .collector
            .collect(&request.company_name, request.website.as_deref())
            .await;

        let tech_stack = infer_tech_stack(
            &request.company_name,
            request.website.as_deref(),
            &evidence.jobs,
            &evidence.news,
        );
        tracing::debug!(count = tech_stack.len(), "Inferred tech stack");

        let analysis = self
            .synthesizer
            .synthesize(&SynthesisContext {
                company_name: &request.company_name,
                website: request.website.as_deref(),
                domain: &evidence.identity.domain,
                user_intent: &request.user_intent,
                news: &evidence.news,
                jobs: &evidence.jobs,
                tech_stack: &tech_stack,
            })
            .await;

        let new_brief = NewBrief::assemble(request, evidence, tech_stack, analysis);

        let brief = self.store.insert(&new_brief).await.map_err(|e| {
            tracing::error!(company = %new_brief.company_name, error = %e, "Failed to save brief");
            e
        })?;

        tracing::info!(id = %brief.id, company = %brief.fields.company_name, "Strategic brief created");

        Ok(brief)
    }

    /// All stored briefs, newest first
    pub async fn list(&self) -> Result<Vec<Brief>, DbError> {
        self.store.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryBriefStore;
    use crate::model::{AiAnalysis, ProviderConfig, TechConfidence};

    fn service(store: Arc<MemoryBriefStore>) -> BriefService {
        BriefService::new(
            EvidenceCollector::from_config(&ProviderConfig::default()),
            NarrativeSynthesizer::new(None),
            store,
        )
    }

    fn request(company: Option<&str>, website: Option<&str>, intent: Option<&str>) -> BriefRequest {
        BriefRequest {
            company_name: company.map(str::to_string),
            website: website.map(str::to_string),
            user_intent: intent.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_invalid_request_performs_no_insert() {
        let store = Arc::new(MemoryBriefStore::default());
        let result = service(store.clone())
            .create(request(Some("Acme"), None, None))
            .await;

        assert!(matches!(result, Err(BriefServiceError::InvalidRequest(_))));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_degraded_pipeline_still_persists() {
        let store = Arc::new(MemoryBriefStore::default());
        let brief = service(store.clone())
            .create(request(Some("Acme"), Some("www.Acme.io"), Some("cold outreach")))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(brief.fields.company_domain, "acme.io");
        assert_eq!(brief.fields.company_logo, "https://logo.clearbit.com/acme.io");
        assert_eq!(brief.fields.summary, AiAnalysis::placeholder().summary);
        assert!(brief.fields.news.is_empty());
        assert!(brief.fields.job_signals.is_empty());
        assert_eq!(brief.fields.tech_stack, vec!["Web Technologies", "Cloud Infrastructure"]);
        assert_eq!(brief.fields.tech_stack_detail[1].confidence, TechConfidence::Likely);
    }

    #[tokio::test]
    async fn test_each_call_inserts_new_row() {
        let store = Arc::new(MemoryBriefStore::default());
        let service = service(store.clone());

        let first = service
            .create(request(Some("Acme"), None, Some("cold outreach")))
            .await
            .unwrap();
        let second = service
            .create(request(Some("Acme"), None, Some("cold outreach")))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let store = Arc::new(MemoryBriefStore::failing("connection refused"));
        let result = service(store)
            .create(request(Some("Acme"), None, Some("cold outreach")))
            .await;

        assert!(matches!(result, Err(BriefServiceError::DbError(_))));
    }
}
