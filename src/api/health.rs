//! Liveness and readiness endpoints

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::model::ProviderConfig;

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    pub dependencies: DependencyHealth,
}

#[derive(Serialize, ToSchema)]
pub struct DependencyHealth {
    pub database: String,
    pub news_provider: String,
    pub job_provider: String,
    pub completion_provider: String,
}

/// Which optional providers are configured, fixed at startup
#[derive(Debug, Clone, Copy)]
pub struct ProviderStatus {
    pub news: bool,
    pub jobs: bool,
    pub completion: bool,
}

impl ProviderStatus {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            news: config.news_api_key.is_some(),
            jobs: config.jsearch_api_key.is_some(),
            completion: config.llm_api_key.is_some(),
        }
    }
}

fn feature_state(enabled: bool) -> String {
    if enabled { "enabled" } else { "disabled" }.to_string()
}

/// Reports the process is up and serving
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Ready when the database answers; provider keys are reported, never required
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus),
        (status = 503, description = "Service is not ready", body = ReadinessStatus)
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn readiness(
    db_pool: web::Data<PgPool>,
    providers: web::Data<ProviderStatus>,
) -> impl Responder {
    let db_status = match sqlx::query("SELECT 1").fetch_one(db_pool.get_ref()).await {
        Ok(_) => {
            tracing::debug!("Database health check passed");
            "healthy"
        }
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            "unhealthy"
        }
    };

    let all_healthy = db_status == "healthy";

    let status = ReadinessStatus {
        status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies: DependencyHealth {
            database: db_status.to_string(),
            news_provider: feature_state(providers.news),
            job_provider: feature_state(providers.jobs),
            completion_provider: feature_state(providers.completion),
        },
    };

    if all_healthy {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}

/// Configure health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}
