//! API 라우트 설정 모듈
//!
//! 시스템 엔드포인트와 추론 API(`/api/v1`)를 등록하고, JSON 본문 파싱 실패와
//! 등록되지 않은 경로도 구조화된 에러 응답으로 처리합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! App::new().configure(configure_all_routes(settings.gateway.json_limit_bytes))
//! ```

use actix_web::error::JsonPayloadError;
use actix_web::web;

use crate::core::errors::AppError;
use crate::handlers;

pub fn configure_all_routes(json_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(json_config(json_limit));

        cfg.service(handlers::system::root)
            .service(handlers::system::health_check)
            .service(handlers::system::metrics_endpoint);

        configure_inference_routes(cfg);

        cfg.default_service(web::to(handlers::system::not_found));
    }
}

fn configure_inference_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(handlers::translation::translate)
            .service(handlers::ocr::recognize),
    );
}

/// 크기 제한과 에러 응답이 설정된 JSON 추출기 설정
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| json_error(err).into())
}

/// 본문 파싱 실패를 고정 메시지로 바꿉니다. 역직렬화 실패만 위치 정보를 남깁니다.
fn json_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::OverflowKnownLength { limit, .. } | JsonPayloadError::Overflow { limit } => {
            AppError::ValidationError(format!("요청 본문이 허용 크기({} 바이트)를 초과했습니다", limit))
        }
        JsonPayloadError::ContentType => {
            AppError::ValidationError("Content-Type은 application/json이어야 합니다".to_string())
        }
        JsonPayloadError::Deserialize(e) => AppError::MalformedJson(e),
        other => {
            log::debug!("요청 본문 읽기 실패: {}", other);
            AppError::ValidationError("요청 본문을 읽을 수 없습니다".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{source_of, GatewayConfig};
    use crate::core::health::{HealthReporter, ServiceIdentity};
    use crate::core::metrics::MetricsExporter;
    use crate::core::registry::ServiceRegistry;
    use crate::middlewares::RequestGateway;
    use crate::services::testing::fake_service_set;
    use actix_web::error::PayloadError;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use std::sync::Arc;

    macro_rules! routed_app {
        ($registry:expr, $json_limit:expr) => {{
            let registry: Arc<ServiceRegistry> = $registry;
            App::new()
                .app_data(web::Data::new(HealthReporter::new(Arc::clone(&registry))))
                .app_data(web::Data::new(ServiceIdentity::new("MTLverse ML Services")))
                .app_data(web::Data::new(MetricsExporter::disabled()))
                .app_data(web::Data::from(registry))
                .configure(configure_all_routes($json_limit))
        }};
    }

    macro_rules! full_app {
        ($json_limit:expr) => {{
            let registry = Arc::new(ServiceRegistry::new());
            registry.install(fake_service_set());
            test::init_service(routed_app!(registry, $json_limit)).await
        }};
    }

    macro_rules! gated_app {
        ($registry:expr) => {{
            let gateway = GatewayConfig::from_source(&source_of(&[("ALLOWED_HOSTS", "api.mtlverse.com")]));
            test::init_service(routed_app!($registry, 1024).wrap(RequestGateway::from_config(&gateway)))
                .await
        }};
    }

    fn translate_request(host: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/v1/translate")
            .insert_header((header::HOST, host))
            .set_json(serde_json::json!({ "text": "안녕하세요", "target_lang": "en" }))
    }

    #[actix_web::test]
    async fn test_unknown_route_is_not_found_envelope() {
        let app = full_app!(1024);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "not_found");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_validation_envelope() {
        let app = full_app!(1024);

        let req = test::TestRequest::post()
            .uri("/api/v1/translate")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");
        assert_eq!(body["detail"]["line"], 1);
        assert!(!body["message"].as_str().unwrap().contains("deserialize"));
    }

    #[actix_web::test]
    async fn test_oversized_body_is_rejected() {
        let app = full_app!(16);

        let req = test::TestRequest::post()
            .uri("/api/v1/translate")
            .set_json(serde_json::json!({ "text": "a long enough sentence", "target_lang": "en" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");
        assert!(body.get("detail").is_none());
        assert!(!body["message"].as_str().unwrap().contains("JSON payload"));
    }

    #[::core::prelude::v1::test]
    fn test_payload_read_failure_uses_fixed_message() {
        let error = json_error(JsonPayloadError::Payload(PayloadError::Incomplete(None)));

        match error {
            AppError::ValidationError(message) => {
                assert_eq!(message, "요청 본문을 읽을 수 없습니다")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_all_routes_registered() {
        let app = full_app!(1024);

        for uri in ["/", "/health", "/metrics"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK, "GET {}", uri);
        }

        let req = test::TestRequest::post()
            .uri("/api/v1/ocr")
            .set_json(serde_json::json!({ "image_base64": "aGVsbG8=" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_disallowed_host_rejected_in_any_registry_state() {
        let ready = Arc::new(ServiceRegistry::new());
        ready.install(fake_service_set());

        for registry in [Arc::new(ServiceRegistry::new()), ready] {
            let app = gated_app!(registry);

            let resp = test::call_service(&app, translate_request("evil.com").to_request()).await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "policy_violation");
        }
    }

    #[actix_web::test]
    async fn test_absent_service_is_envelope_through_gateway() {
        let app = gated_app!(Arc::new(ServiceRegistry::new()));

        let resp = test::call_service(&app, translate_request("api.mtlverse.com").to_request()).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(resp.headers().contains_key("x-request-id"));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "service_unavailable");
        assert_eq!(body["detail"]["service"], "translation");
    }

    #[actix_web::test]
    async fn test_ready_registry_serves_through_gateway() {
        let registry = Arc::new(ServiceRegistry::new());
        registry.install(fake_service_set());
        let app = gated_app!(registry);

        let resp = test::call_service(&app, translate_request("api.mtlverse.com:443").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
