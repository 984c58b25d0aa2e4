//! # Domain Layer
//!
//! 번역/OCR 요청과 응답을 표현하는 데이터 전송 객체(DTO)를 정의합니다.
//! 추론 알고리즘 자체는 외부 백엔드의 책임이며, 이 계층은 HTTP 경계에서
//! 주고받는 데이터의 형태와 검증 규칙만 다룹니다.

pub mod dto;

pub use dto::*;
