//! HTTP 요청 핸들러 모듈
//!
//! 핸들러는 `web::Data<ServiceRegistry>`에서 스냅샷을 얻어 도메인 서비스를 호출하고,
//! 모든 실패는 `AppError`를 통해 구조화된 에러 응답으로 변환됩니다.
//!
//! - [`system`] - `/`, `/health`, `/metrics`, 404 기본 핸들러
//! - [`translation`] - `POST /api/v1/translate`
//! - [`ocr`] - `POST /api/v1/ocr`

pub mod ocr;
pub mod system;
pub mod translation;
