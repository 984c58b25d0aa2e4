//! OCR HTTP 핸들러

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::registry::ServiceRegistry;
use crate::domain::OcrRequest;

/// base64 이미지에서 텍스트를 인식합니다
///
/// ```json
/// POST /api/v1/ocr
/// { "image_base64": "iVBORw0KGgo...", "language": "ja" }
/// ```
#[post("/ocr")]
pub async fn recognize(
    registry: web::Data<ServiceRegistry>,
    payload: web::Json<OcrRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let engine = registry.snapshot().ocr()?;
    let response = engine.recognize(&payload).await?;

    Ok(HttpResponse::Ok().json(response))
}
