//! HTTP 애플리케이션 구성
//!
//! 공유 상태, 미들웨어 스택, 라우트를 하나의 `App`으로 조립합니다.
//! `main`의 워커 팩토리와 통합 테스트가 같은 조립 함수를 사용합니다.
//!
//! actix-web은 마지막에 `wrap`한 미들웨어가 가장 먼저 실행되므로 실제 처리 순서는
//! `RequestGateway` → `NormalizePath` → `Logger` → CORS → Rate Limiting → 라우트입니다.

use std::io;
use std::sync::Arc;

use actix_governor::governor::middleware::StateInformationMiddleware;
use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware, web, App, Error};

use crate::config::GatewayConfig;
use crate::core::health::{HealthReporter, ServiceIdentity};
use crate::core::metrics::MetricsExporter;
use crate::core::registry::ServiceRegistry;
use crate::middlewares::{configure_cors, RequestGateway};
use crate::routes::configure_all_routes;

/// 워커 간에 공유되는 Rate Limiting 설정 (클라이언트 IP 기준)
pub type RateLimitConfig = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// 핸들러에 주입되는 공유 상태
#[derive(Clone)]
pub struct AppState {
    registry: web::Data<ServiceRegistry>,
    health: web::Data<HealthReporter>,
    identity: web::Data<ServiceIdentity>,
    metrics: web::Data<MetricsExporter>,
}

impl AppState {
    pub fn new(registry: Arc<ServiceRegistry>, service_name: &str, metrics: MetricsExporter) -> Self {
        Self {
            health: web::Data::new(HealthReporter::new(Arc::clone(&registry))),
            registry: web::Data::from(registry),
            identity: web::Data::new(ServiceIdentity::new(service_name)),
            metrics: web::Data::new(metrics),
        }
    }
}

/// 게이트웨이 설정으로 Rate Limiting 설정을 만듭니다.
///
/// # Errors
///
/// * `std::io::Error` - 초당 요청 수나 버스트 크기가 0인 경우
pub fn rate_limit_config(gateway: &GatewayConfig) -> io::Result<RateLimitConfig> {
    GovernorConfigBuilder::default()
        .requests_per_second(gateway.rate_limit_per_second)
        .burst_size(gateway.rate_limit_burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))
}

/// 미들웨어 스택과 라우트가 모두 등록된 `App`을 만듭니다.
pub fn build_app(
    state: AppState,
    gateway: GatewayConfig,
    rate_limit: RateLimitConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state.registry)
        .app_data(state.health)
        .app_data(state.identity)
        .app_data(state.metrics)
        .wrap(Governor::new(&rate_limit))
        .wrap(configure_cors(&gateway))
        .wrap(middleware::Logger::default())
        .wrap(middleware::NormalizePath::trim())
        .wrap(RequestGateway::from_config(&gateway))
        .configure(configure_all_routes(gateway.json_limit_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source_of;
    use crate::services::testing::fake_service_set;
    use actix_web::http::{header, Method, StatusCode};
    use actix_web::test;
    use std::net::SocketAddr;

    fn gateway_config(pairs: &[(&str, &str)]) -> GatewayConfig {
        GatewayConfig::from_source(&source_of(pairs))
    }

    fn ready_state() -> AppState {
        let registry = Arc::new(ServiceRegistry::new());
        registry.install(fake_service_set());
        AppState::new(registry, "MTLverse ML Services", MetricsExporter::disabled())
    }

    fn peer() -> SocketAddr {
        SocketAddr::from(([192, 0, 2, 10], 40_000))
    }

    #[::core::prelude::v1::test]
    fn test_rate_limit_config_from_defaults() {
        assert!(rate_limit_config(&gateway_config(&[])).is_ok());
    }

    #[actix_web::test]
    async fn test_rate_limited_request_gets_envelope() {
        let gateway = gateway_config(&[("RATE_LIMIT_PER_SECOND", "1"), ("RATE_LIMIT_BURST_SIZE", "1")]);
        let rate_limit = rate_limit_config(&gateway).unwrap();
        let app = test::init_service(build_app(ready_state(), gateway, rate_limit)).await;

        let first = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::HOST, "localhost"))
            .peer_addr(peer())
            .to_request();
        assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

        let second = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::HOST, "localhost"))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, second).await;

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("retry-after"));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "rate_limited");
    }

    #[actix_web::test]
    async fn test_rejected_preflight_gets_envelope() {
        let gateway = gateway_config(&[]);
        let rate_limit = rate_limit_config(&gateway).unwrap();
        let app = test::init_service(build_app(ready_state(), gateway, rate_limit)).await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/translate")
            .insert_header((header::HOST, "localhost:8000"))
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "x-internal-debug"))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "policy_violation");
    }

    #[actix_web::test]
    async fn test_spoofed_forwarded_host_is_rejected() {
        let gateway = gateway_config(&[]);
        let rate_limit = rate_limit_config(&gateway).unwrap();
        let app = test::init_service(build_app(ready_state(), gateway, rate_limit)).await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::HOST, "evil.com"))
            .insert_header(("x-forwarded-host", "localhost"))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "policy_violation");
    }

    #[actix_web::test]
    async fn test_trailing_slash_and_request_id() {
        let gateway = gateway_config(&[]);
        let rate_limit = rate_limit_config(&gateway).unwrap();
        let app = test::init_service(build_app(ready_state(), gateway, rate_limit)).await;

        let req = test::TestRequest::get()
            .uri("/health/")
            .insert_header((header::HOST, "127.0.0.1:8000"))
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
    }
}
