//! OpenAPI specification endpoint

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::brief::CreateBriefResponse;
use crate::api::error::ErrorResponse;
use crate::api::health::{DependencyHealth, HealthStatus, ReadinessStatus};
use crate::model::{AiAnalysis, Brief, BriefRequest, JobSignal, NewBrief, NewsItem, TechConfidence, TechStackItem};

#[derive(OpenApi)]
#[openapi(
    info(title = "Company Brief API", description = "Sales-outreach briefs synthesized from company signals"),
    paths(
        crate::api::brief::create_brief,
        crate::api::brief::list_briefs,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        BriefRequest,
        CreateBriefResponse,
        Brief,
        NewBrief,
        NewsItem,
        JobSignal,
        TechStackItem,
        TechConfidence,
        AiAnalysis,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        DependencyHealth,
    )),
    tags(
        (name = "briefs", description = "Brief creation and listing"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json);
}
