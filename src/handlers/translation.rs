//! 번역 HTTP 핸들러

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::registry::ServiceRegistry;
use crate::domain::TranslationRequest;

/// 텍스트를 번역합니다
///
/// ```json
/// POST /api/v1/translate
/// { "text": "こんにちは", "source_lang": "ja", "target_lang": "en" }
/// ```
///
/// 번역 서비스가 설치되지 않았으면 503 `service_unavailable`을 반환합니다.
#[post("/translate")]
pub async fn translate(
    registry: web::Data<ServiceRegistry>,
    payload: web::Json<TranslationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let engine = registry.snapshot().translation()?;
    let response = engine.translate(&payload).await?;

    Ok(HttpResponse::Ok().json(response))
}
