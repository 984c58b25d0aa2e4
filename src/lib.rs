//! MTLverse ML 서비스 백엔드
//!
//! 번역과 OCR을 HTTP로 제공하는 서비스의 부트스트랩 및 생명주기 계층입니다.
//! 외부 의존성(MongoDB, Redis)을 정해진 순서로 초기화하고, 도메인 서비스를
//! 명시적인 레지스트리에 설치한 뒤, 요청 게이트웨이를 거쳐 요청을 처리합니다.
//!
//! # Features
//!
//! - **생명주기 오케스트레이션**: store → cache → services 순서의 시작과 종료
//! - **서비스 레지스트리**: 전체 설치/전체 해제만 가능한 불변 스냅샷 기반 레지스트리
//! - **상태 조회**: 서비스별 준비 여부를 보고하는 `/health`
//! - **요청 게이트웨이**: Host/Origin 정책, CORS, Rate Limiting
//! - **구조화된 에러 응답**: `{ error, message, detail? }` 형태의 일관된 에러 본문
//! - **원격 추론**: 번역 결과 Redis 캐싱, 번역 이력 MongoDB 기록
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ RequestGateway  │ ← Host / Origin 정책, 에러 응답 정규화, 메트릭
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← registry.snapshot()으로 서비스 조회
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TranslationEngine / OcrEngine
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← LifecycleOrchestrator가 초기화
//! │ + 추론 백엔드    │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use ml_service_backend::core::LifecycleOrchestrator;
//!
//! let orchestrator = LifecycleOrchestrator::new(database, redis, constructors);
//! orchestrator.startup().await?;
//! let snapshot = orchestrator.registry().snapshot();
//! let translation = snapshot.translation()?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
pub mod server;
