//! 요청/응답 DTO 모듈
//!
//! 모든 요청 DTO는 `validator::Validate`를 구현하며, 핸들러에서
//! `payload.validate()?`로 검증한 뒤 도메인 서비스에 전달합니다.
//! 검증 실패는 `AppError::InvalidPayload`로 변환되어 필드별 상세와 함께
//! 400 Bad Request envelope로 응답됩니다.

pub mod ocr;
pub mod translation;

pub use ocr::{OcrRegion, OcrRequest, OcrResponse};
pub use translation::{TranslationRequest, TranslationResponse};

use validator::ValidationError;

/// 언어 코드 형식 검증 (`en`, `ko`, `zh-Hans`, `auto` 등)
pub(crate) fn validate_language_code(code: &str) -> Result<(), ValidationError> {
    let valid = !code.is_empty()
        && code.len() <= 16
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        return Err(ValidationError::new("invalid_language_code")
            .with_message("언어 코드는 영문, 숫자, '-', '_'만 사용할 수 있습니다".into()));
    }
    Ok(())
}
