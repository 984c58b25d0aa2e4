//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 요청 게이트웨이 (RequestGateway)
//! - Host 허용 목록 검사 (`*`, 정확한 이름, `*.suffix`)
//! - Origin 허용 목록 검사 (헤더가 있을 때만)
//! - 위반 시 `policy_violation` 에러 응답 (400)
//! - 안쪽 미들웨어의 에러 응답(429, CORS 거부 등)을 envelope으로 재작성
//! - 요청 수 / 처리 시간 / 정책 거부 메트릭 기록
//!
//! ### 2. CORS ([`configure_cors`])
//!
//! # 등록 순서
//!
//! actix-web은 마지막에 `wrap`한 미들웨어가 가장 먼저 실행됩니다.
//!
//! 전체 스택은 [`crate::server::build_app`]에서 조립합니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(Governor::new(&rate_limit))
//!     .wrap(configure_cors(&gateway))
//!     .wrap(middleware::Logger::default())
//!     .wrap(middleware::NormalizePath::trim())
//!     .wrap(RequestGateway::from_config(&gateway))
//! ```

pub mod cors;
pub mod gateway_middleware;
mod gateway_inner;
pub mod policy;

pub use cors::configure_cors;
pub use gateway_middleware::RequestGateway;
pub use policy::{HostPolicy, OriginPolicy};
