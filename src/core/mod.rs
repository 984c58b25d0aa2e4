//! # Core Module
//!
//! 서비스 생명주기와 요청 처리 전반에 걸친 핵심 구성요소입니다.
//!
//! ## 모듈 구성
//!
//! - [`lifecycle`] - 의존성 초기화 순서와 시작/종료 상태 머신 (`LifecycleOrchestrator`)
//! - [`registry`] - 도메인 서비스 핸들 레지스트리 (`ServiceRegistry`, `ServiceSlot`)
//! - [`health`] - 레지스트리 기반 상태 조회 (`HealthReporter`, `ServiceIdentity`)
//! - [`errors`] - `AppError`와 구조화된 에러 응답 (`ErrorEnvelope`)
//! - [`metrics`] - Prometheus 메트릭 레코더와 요청 메트릭 기록
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! let orchestrator = LifecycleOrchestrator::new(database, redis, constructors);
//! orchestrator.startup().await?;
//!
//! let registry = orchestrator.registry();
//! // ... HttpServer 실행 ...
//!
//! orchestrator.shutdown().await;
//! ```

pub mod errors;
pub mod health;
pub mod lifecycle;
pub mod metrics;
pub mod registry;

pub use errors::{AppError, AppResult, ErrorContext, ErrorEnvelope, ErrorKind};
pub use health::{HealthReporter, HealthSnapshot, HealthStatus, ServiceIdentity};
pub use lifecycle::{
    DependencyInitializer, DependencyRole, DependencyState, LifecycleOrchestrator,
    LifecycleState, ServiceConstructor, ServiceConstructors,
};
pub use self::metrics::MetricsExporter;
pub use registry::{RegistrySnapshot, ServiceKind, ServiceRegistry, ServiceSet, ServiceSlot};
