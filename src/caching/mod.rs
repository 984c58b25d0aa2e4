//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시 지원과 JSON 기반 객체 직렬화를 제공합니다.
//! 현재는 번역 결과를 요청 해시 키로 TTL과 함께 캐싱하는 데 사용됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new("redis://localhost:6379");
//! cache.initialize().await?;
//! cache.set_with_expiry("translation:ab12", &response, 3600).await?;
//! let cached: Option<TranslationResponse> = cache.get("translation:ab12").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
