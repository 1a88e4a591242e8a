//! REST API endpoints for briefs

use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpResponse, get, options, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{Brief, BriefRequest};
use crate::service::BriefService;

/// Response for a successfully created brief
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBriefResponse {
    pub success: bool,
    pub brief: Brief,
}

/// Permissive CORS headers attached to every response
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
}

/// Bodies are parsed as JSON whatever their content type; malformed ones are
/// unexpected failures, not validation failures
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| ApiError::Internal(err.to_string()).into())
}

/// Create a strategic brief for a company
#[utoipa::path(
    post,
    path = "/create-brief",
    request_body = BriefRequest,
    responses(
        (status = 200, description = "Brief created", body = CreateBriefResponse),
        (status = 400, description = "Company name or user intent missing", body = ErrorResponse),
        (status = 500, description = "Database or internal failure", body = ErrorResponse)
    ),
    tag = "briefs"
)]
#[post("/create-brief")]
pub async fn create_brief(
    service: web::Data<BriefService>,
    body: web::Json<BriefRequest>,
) -> Result<HttpResponse, ApiError> {
    let brief = service.create(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CreateBriefResponse {
        success: true,
        brief,
    }))
}

/// CORS preflight
#[options("/create-brief")]
pub async fn create_brief_preflight() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// List all briefs, newest first
#[utoipa::path(
    get,
    path = "/briefs",
    responses(
        (status = 200, description = "Briefs retrieved", body = [Brief]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "briefs"
)]
#[get("/briefs")]
pub async fn list_briefs(service: web::Data<BriefService>) -> Result<HttpResponse, ApiError> {
    let briefs = service
        .list()
        .await
        .map_err(|e| ApiError::Query(e.to_string()))?;

    Ok(HttpResponse::Ok().json(briefs))
}

/// Configure brief routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(create_brief)
        .service(create_brief_preflight)
        .service(list_briefs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header::ContentType;
    use actix_web::{App, test};
    use serde_json::json;

    use crate::db::memory::MemoryBriefStore;
    use crate::db::repository::BriefStore;
    use crate::model::{AiAnalysis, ProviderConfig};
    use crate::service::llm::completion_body;
    use crate::service::{EvidenceCollector, LlmClient, NarrativeSynthesizer};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn brief_service(store: Arc<MemoryBriefStore>) -> web::Data<BriefService> {
        web::Data::new(BriefService::new(
            EvidenceCollector::from_config(&ProviderConfig::default()),
            NarrativeSynthesizer::new(None),
            store,
        ))
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .wrap(cors_headers())
                    .app_data(brief_service($store))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_brief_with_no_providers() {
        let store = Arc::new(MemoryBriefStore::default());
        let app = app!(store.clone());

        let req = test::TestRequest::post()
            .uri("/create-brief")
            .set_json(json!({ "companyName": "Acme", "userIntent": "cold outreach" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );

        let body: serde_json::Value = test::read_body_json(resp).await;
        let brief = &body["brief"];

        assert_eq!(body["success"], true);
        assert_eq!(brief["companyName"], "Acme");
        assert_eq!(brief["news"], json!([]));
        assert_eq!(brief["jobSignals"], json!([]));
        assert_eq!(
            brief["techStackDetail"],
            json!([
                { "name": "Web Technologies", "confidence": "inferred", "source": "default assumption" },
                { "name": "Cloud Infrastructure", "confidence": "likely", "source": "modern business assumption" }
            ])
        );
        assert_eq!(brief["summary"], AiAnalysis::placeholder().summary);
        assert_eq!(brief["companyDomain"], "");
        assert!(brief["id"].is_string());
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_fields_rejected_without_insert() {
        let store = Arc::new(MemoryBriefStore::default());
        let app = app!(store.clone());

        for payload in [
            json!({ "companyName": "Acme" }),
            json!({ "userIntent": "cold outreach" }),
            json!({ "companyName": "", "userIntent": "cold outreach" }),
            json!({ "companyName": null, "userIntent": "cold outreach" }),
        ] {
            let req = test::TestRequest::post()
                .uri("/create-brief")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(
                body,
                json!({ "error": "Company name and user intent are required" })
            );
        }

        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn test_database_failure() {
        let app = app!(Arc::new(MemoryBriefStore::failing("relation \"briefs\" does not exist")));

        let req = test::TestRequest::post()
            .uri("/create-brief")
            .set_json(json!({ "companyName": "Acme", "userIntent": "cold outreach" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to save brief to database");
        assert!(
            body["details"]
                .as_str()
                .unwrap()
                .contains("relation \"briefs\" does not exist")
        );
    }

    #[actix_web::test]
    async fn test_malformed_body_is_internal_error() {
        let app = app!(Arc::new(MemoryBriefStore::default()));

        let req = test::TestRequest::post()
            .uri("/create-brief")
            .insert_header(ContentType::json())
            .set_payload("{\"companyName\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"].is_string());
    }

    #[actix_web::test]
    async fn test_plain_text_body_is_accepted() {
        let store = Arc::new(MemoryBriefStore::default());
        let app = app!(store.clone());

        let req = test::TestRequest::post()
            .uri("/create-brief")
            .insert_header(("content-type", "text/plain;charset=UTF-8"))
            .set_payload(r#"{"companyName":"Acme","userIntent":"cold outreach"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["brief"]["companyName"], "Acme");
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_model_reply_is_persisted() {
        let server = MockServer::start().await;
        let reply = r#"Here is the brief:
{"summary":"Acme is hiring fast.","keyInsights":["Ten open roles","New funding"],"pitchAngle":"Scale hiring ops","confidenceNotes":null}
Good luck!"#;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(reply)))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryBriefStore::default());
        let service = web::Data::new(BriefService::new(
            EvidenceCollector::from_config(&ProviderConfig::default()),
            NarrativeSynthesizer::new(Some(LlmClient::new("k", &server.uri(), "m").unwrap())),
            store.clone(),
        ));
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/create-brief")
            .set_json(json!({ "companyName": "Acme", "userIntent": "cold outreach" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let brief = &body["brief"];

        assert_eq!(brief["summary"], "Acme is hiring fast.");
        assert_eq!(brief["keyInsights"], json!(["Ten open roles", "New funding"]));
        assert_eq!(brief["pitchAngle"], "Scale hiring ops");
        assert_eq!(brief["subjectLine"], AiAnalysis::placeholder().subject_line);
        assert_eq!(brief["confidenceNotes"], "Analysis based on available data");

        let stored = store.list_all().await.unwrap();
        assert_eq!(stored[0].fields.pitch_angle, "Scale hiring ops");
        assert_eq!(stored[0].fields.key_insights.len(), 2);
    }

    #[actix_web::test]
    async fn test_preflight() {
        let app = app!(Arc::new(MemoryBriefStore::default()));

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/create-brief")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(headers.get("Access-Control-Allow-Methods").unwrap(), "POST, OPTIONS");
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            "authorization, x-client-info, apikey, content-type"
        );
        assert_eq!(test::read_body(resp).await, "ok");
    }

    #[actix_web::test]
    async fn test_list_briefs_newest_first() {
        let store = Arc::new(MemoryBriefStore::default());
        let app = app!(store.clone());

        for company in ["First Co", "Second Co"] {
            let req = test::TestRequest::post()
                .uri("/create-brief")
                .set_json(json!({ "companyName": company, "userIntent": "cold outreach" }))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::get().uri("/briefs").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let briefs = body.as_array().unwrap();

        assert_eq!(briefs.len(), 2);
        assert_eq!(briefs[0]["companyName"], "Second Co");
    }

    #[actix_web::test]
    async fn test_list_briefs_failure() {
        let app = app!(Arc::new(MemoryBriefStore::failing("timeout")));

        let req = test::TestRequest::get().uri("/briefs").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to load briefs");
    }
}
