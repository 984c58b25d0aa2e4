//! OCR 서비스 모듈
//!
//! 이미지 데이터를 검증한 뒤 원격 OCR 백엔드로 전달하는 [`RemoteOcrService`]를 제공합니다.

pub mod ocr_service;

pub use ocr_service::RemoteOcrService;
