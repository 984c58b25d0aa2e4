//! 도메인 서비스 계층 모듈
//!
//! 번역과 OCR 기능을 제공하는 상태 보유 컴포넌트들입니다. 오케스트레이터는
//! 이 서비스들을 "생성하고, 참조를 보관하고, 존재 여부를 보고"할 뿐이며
//! 실제 추론은 외부 추론 백엔드가 담당합니다.
//!
//! # Seams
//!
//! - [`TranslationEngine`] / [`OcrEngine`]: 핸들러가 의존하는 trait
//! - [`remote_constructors`]: 운영 환경용 생성자 묶음 (원격 추론 백엔드 + Redis 캐시 + MongoDB 기록)
//!
//! # Examples
//!
//! ```rust,ignore
//! let constructors = services::remote_constructors(&settings.inference, database, redis);
//! let orchestrator = LifecycleOrchestrator::new(database, redis, constructors);
//! ```

pub mod inference;
pub mod ocr;
pub mod translation;

use std::sync::Arc;

use async_trait::async_trait;

use crate::caching::redis::RedisClient;
use crate::config::InferenceConfig;
use crate::core::errors::AppResult;
use crate::core::lifecycle::ServiceConstructors;
use crate::db::Database;
use crate::domain::{OcrRequest, OcrResponse, TranslationRequest, TranslationResponse};

pub use ocr::RemoteOcrService;
pub use translation::RemoteTranslationService;

/// 번역 도메인 서비스
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// 서비스 이름 (로그 식별용)
    fn name(&self) -> &str;

    async fn translate(&self, request: &TranslationRequest) -> AppResult<TranslationResponse>;
}

/// OCR 도메인 서비스
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// 서비스 이름 (로그 식별용)
    fn name(&self) -> &str;

    async fn recognize(&self, request: &OcrRequest) -> AppResult<OcrResponse>;
}

/// 원격 추론 백엔드를 사용하는 운영용 생성자 묶음을 구성합니다.
///
/// 생성자는 오케스트레이터가 MongoDB와 Redis 초기화를 마친 뒤에만 호출합니다.
pub fn remote_constructors(
    config: &InferenceConfig,
    database: Arc<Database>,
    cache: Arc<RedisClient>,
) -> ServiceConstructors {
    let translation_config = config.clone();
    let ocr_config = config.clone();

    ServiceConstructors {
        translation: Box::new(move || {
            let service = RemoteTranslationService::new(
                &translation_config,
                Arc::clone(&database),
                Arc::clone(&cache),
            )?;
            Ok(Arc::new(service) as Arc<dyn TranslationEngine>)
        }),
        ocr: Box::new(move || {
            let service = RemoteOcrService::new(&ocr_config)?;
            Ok(Arc::new(service) as Arc<dyn OcrEngine>)
        }),
    }
}
