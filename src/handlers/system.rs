//! 서비스 식별, 상태 조회, 메트릭 엔드포인트
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/` | 서비스 이름, 버전, 실행 상태 |
//! | `GET` | `/health` | 도메인 서비스별 준비 여부 (항상 200) |
//! | `GET` | `/metrics` | Prometheus 텍스트 |

use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::core::errors::AppError;
use crate::core::health::{HealthReporter, ServiceIdentity};
use crate::core::metrics::MetricsExporter;

#[get("/")]
pub async fn root(identity: web::Data<ServiceIdentity>) -> HttpResponse {
    HttpResponse::Ok().json(identity.get_ref())
}

/// 준비되지 않은 경우에도 200으로 응답하며 본문의 `status`로 구분합니다.
#[get("/health")]
pub async fn health_check(reporter: web::Data<HealthReporter>) -> HttpResponse {
    HttpResponse::Ok().json(reporter.health())
}

#[get("/metrics")]
pub async fn metrics_endpoint(exporter: web::Data<MetricsExporter>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(exporter.render())
}

/// 등록되지 않은 경로
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!(
        "요청한 경로를 찾을 수 없습니다: {} {}",
        req.method(),
        req.path()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::ServiceRegistry;
    use crate::services::testing::fake_service_set;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_reports_unhealthy_with_200() {
        let registry = Arc::new(ServiceRegistry::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HealthReporter::new(registry)))
                .service(health_check),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["services"]["translation"], false);
    }

    #[actix_web::test]
    async fn test_health_reports_healthy_after_install() {
        let registry = Arc::new(ServiceRegistry::new());
        registry.install(fake_service_set());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HealthReporter::new(registry)))
                .service(health_check),
        )
        .await;

        let body: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health").to_request(),
        )
        .await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["ocr"], true);
    }

    #[actix_web::test]
    async fn test_root_returns_identity() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ServiceIdentity::new("MTLverse ML Services")))
                .service(root),
        )
        .await;

        let body: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(body["message"], "MTLverse ML Services");
        assert_eq!(body["status"], "running");
    }

    #[actix_web::test]
    async fn test_metrics_placeholder_without_recorder() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MetricsExporter::disabled()))
                .service(metrics_endpoint),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"#"));
    }
}
