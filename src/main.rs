//! MTLverse ML 서비스 메인 애플리케이션
//!
//! 설정을 로드하고, 생명주기 오케스트레이터로 MongoDB → Redis → 도메인 서비스를
//! 초기화한 뒤 Actix-web HTTP 서버를 구동합니다. 서버가 멈추면 레지스트리를 비웁니다.

use std::io;
use std::sync::Arc;

use actix_web::HttpServer;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use ml_service_backend::caching::redis::RedisClient;
use ml_service_backend::config::AppSettings;
use ml_service_backend::core::{LifecycleOrchestrator, MetricsExporter, ServiceRegistry};
use ml_service_backend::db::Database;
use ml_service_backend::server::{build_app, rate_limit_config, AppState};
use ml_service_backend::services;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let env_file = load_env_file();
    let settings = AppSettings::load();
    init_logging(settings.server.debug);

    match env_file {
        Ok(file) => info!("{} 파일 로드 됨", file),
        Err(e) => error!("환경 파일을 로드하지 못했습니다: {}. 시스템 환경 변수를 사용합니다", e),
    }

    info!(
        "🚀 {} 시작중... (환경: {:?})",
        settings.server.service_name, settings.environment
    );

    let metrics = MetricsExporter::install();

    let database = Arc::new(Database::from_config(&settings.data_stores));
    let redis_client = Arc::new(RedisClient::from_config(&settings.data_stores));
    let constructors = services::remote_constructors(
        &settings.inference,
        Arc::clone(&database),
        Arc::clone(&redis_client),
    );

    let orchestrator = LifecycleOrchestrator::new(database, redis_client, constructors);

    if let Err(e) = orchestrator.startup().await {
        error!("❌ 서비스 초기화 실패: {}", e);
        orchestrator.shutdown().await;
        return Err(io::Error::other(e.to_string()));
    }

    let result = start_http_server(&settings, orchestrator.registry(), metrics).await;

    orchestrator.shutdown().await;
    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 워커마다 [`build_app`]으로 같은 미들웨어 스택과 라우트를 조립합니다.
/// Rate Limiting 상태는 모든 워커가 공유합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, Rate Limiting 설정 오류, 서버 실행 오류
async fn start_http_server(
    settings: &AppSettings,
    registry: Arc<ServiceRegistry>,
    metrics: MetricsExporter,
) -> io::Result<()> {
    let server = settings.server.clone();
    let gateway = settings.gateway.clone();
    let rate_limit = rate_limit_config(&gateway)?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        gateway.rate_limit_per_second, gateway.rate_limit_burst_size
    );
    if gateway.trust_forwarded_host {
        info!("🔁 Forwarded / X-Forwarded-Host 헤더로 Host를 판단합니다");
    }
    info!("🌐 서버가 http://{} 에서 실행중입니다", server.bind_address());
    info!("📍 Health check: http://{}/health", server.bind_address());

    let state = AppState::new(registry, &server.service_name, metrics);

    HttpServer::new(move || build_app(state.clone(), gateway.clone(), rate_limit.clone()))
        .bind((server.host.as_str(), server.port))?
        .workers(server.workers)
        .shutdown_timeout(server.shutdown_timeout_secs)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 / 미설정 - 기본 .env 파일 로드
///
/// 로거 초기화 전에 실행되므로 결과는 반환만 하고, 로깅은 호출한 쪽에서 합니다.
fn load_env_file() -> Result<&'static str, dotenv::Error> {
    let profile = std::env::var("PROFILE").unwrap_or_default();

    match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 있으면 그대로 사용하고, 없으면 `DEBUG` 설정에 따라
/// `debug` 또는 `info,actix_web=info`를 기본 필터로 사용합니다.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info,actix_web=info" };
    env_logger::init_from_env(Env::default().default_filter_or(default_filter));
}
