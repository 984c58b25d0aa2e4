//! 번역 서비스 모듈
//!
//! 원격 번역 백엔드를 호출하고, 결과를 Redis에 캐싱하며,
//! 번역 이력을 MongoDB에 기록하는 운영용 [`RemoteTranslationService`]를 제공합니다.
//!
//! # 환경 설정
//!
//! ```bash
//! TRANSLATION_BACKEND_URL=http://localhost:9001
//! TRANSLATION_CACHE_TTL_SECS=86400
//! ```

pub mod translation_service;

pub use translation_service::RemoteTranslationService;
