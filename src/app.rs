//! Application state and service initialization
//!
//! Centralizes service construction so handlers only see ready-made `web::Data`.

use std::sync::Arc;

use actix_web::web;
use sqlx::PgPool;

use crate::api::health::ProviderStatus;
use crate::db::repository::BriefRepository;
use crate::model::Config;
use crate::service::{BriefService, EvidenceCollector, LlmClient, NarrativeSynthesizer};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Database connection pool
    pub db_pool: web::Data<PgPool>,
    /// Brief creation and listing
    pub brief_service: web::Data<BriefService>,
    /// Optional provider features, reported by the readiness probe
    pub providers: web::Data<ProviderStatus>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// Only the database is required; each provider key that is missing turns
    /// its feature off.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        let brief_service = BriefService::new(
            EvidenceCollector::from_config(&config.providers),
            NarrativeSynthesizer::new(LlmClient::from_config(&config.providers)),
            Arc::new(BriefRepository::new(db_pool.clone())),
        );

        Ok(Self {
            db_pool: web::Data::new(db_pool),
            brief_service: web::Data::new(brief_service),
            providers: web::Data::new(ProviderStatus::from_config(&config.providers)),
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),
}
