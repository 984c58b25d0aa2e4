//! # Application Error Handling System
//!
//! ML 서비스 백엔드의 통합 에러 처리 시스템입니다.
//! 모든 실패는 이 모듈의 [`AppError`]로 모이고, HTTP 경계에서
//! 클라이언트에게 안전한 [`ErrorEnvelope`] JSON으로 변환됩니다.
//!
//! ## 설계 원칙
//!
//! - **안정적인 에러 종류**: 클라이언트는 `error` 필드의 [`ErrorKind`]만으로 분기할 수 있습니다.
//! - **내부 정보 비노출**: 서버 측 장애(DB, 캐시, 추론 백엔드, 초기화)는 고정된
//!   일반 메시지로만 응답하고 원인은 서버 로그에만 남깁니다.
//! - **정책 위반은 클라이언트 에러**: Host/Origin 거부는 `warn` 레벨로만 기록합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | ErrorKind | HTTP Status |
//! |----------|-----------|-------------|
//! | `InitializationError` | `initialization` | 500 Internal Server Error |
//! | `PolicyViolation` | `policy_violation` | 400 Bad Request |
//! | `ValidationError` / `InvalidPayload` / `MalformedJson` | `validation` | 400 Bad Request |
//! | `NotFound` | `not_found` | 404 Not Found |
//! | `RateLimited` | `rate_limited` | 429 Too Many Requests |
//! | `ServiceUnavailable` | `service_unavailable` | 503 Service Unavailable |
//! | `ExternalServiceError` | `upstream_failure` | 502 Bad Gateway |
//! | `DatabaseError` / `RedisError` / `InternalError` | `internal` | 500 Internal Server Error |
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "error": "service_unavailable",
//!   "message": "translation 서비스가 아직 준비되지 않았습니다",
//!   "detail": { "service": "translation" }
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::core::registry::ServiceKind;

/// 클라이언트에게 노출되는 안정적인 에러 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Initialization,
    PolicyViolation,
    Validation,
    NotFound,
    RateLimited,
    ServiceUnavailable,
    UpstreamFailure,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Initialization => "initialization",
            ErrorKind::PolicyViolation => "policy_violation",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::UpstreamFailure => "upstream_failure",
            ErrorKind::Internal => "internal",
        }
    }

    /// 상태 코드만 알려진 에러 응답의 종류를 추정합니다.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimited,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::SERVICE_UNAVAILABLE => ErrorKind::ServiceUnavailable,
            StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => ErrorKind::UpstreamFailure,
            status if status.is_client_error() => ErrorKind::Validation,
            _ => ErrorKind::Internal,
        }
    }

    /// 서버 측 장애 여부. 이 종류들은 원인 메시지를 클라이언트에 전달하지 않습니다.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            ErrorKind::Initialization | ErrorKind::UpstreamFailure | ErrorKind::Internal
        )
    }
}

/// 클라이언트에게 전달되는 정규화된 에러 표현
///
/// 어떤 내부 실패든 이 형태로만 경계를 넘습니다. 저장되지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    /// 안정적인 에러 종류
    pub error: ErrorKind,
    /// 사람이 읽을 수 있는 메시지
    pub message: String,
    /// 선택적 상세 정보 (검증 실패 필드, 미준비 서비스 종류 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// 다른 미들웨어가 만든 에러 응답을 상태 코드 기준의 고정 메시지로 정규화합니다.
    pub fn for_status(status: StatusCode) -> Self {
        let error = ErrorKind::from_status(status);
        let message = match error {
            ErrorKind::RateLimited => "요청이 너무 많습니다. 잠시 후 다시 시도해주세요",
            ErrorKind::NotFound => "요청한 리소스를 찾을 수 없습니다",
            ErrorKind::ServiceUnavailable => "서비스를 일시적으로 사용할 수 없습니다",
            ErrorKind::UpstreamFailure => "추론 백엔드 호출에 실패했습니다",
            ErrorKind::Validation => "요청을 처리할 수 없습니다",
            _ => "내부 서버 오류가 발생했습니다",
        };

        Self {
            error,
            message: message.to_string(),
            detail: None,
        }
    }

    pub fn into_response(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 인프라 초기화부터 요청 처리까지 발생할 수 있는 모든 실패를 포괄합니다.
/// `actix_web::ResponseError`를 구현하므로 핸들러에서 `?`로 그대로 전파하면
/// [`ErrorEnvelope`] 응답으로 변환됩니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // 추론 백엔드 호출 실패
/// response.json::<BackendReply>().await
///     .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;
///
/// // 시작 단계 실패 (프로세스가 트래픽을 받지 않아야 함)
/// Err(AppError::initialization("mongodb", "ping timeout"))
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 의존성 초기화 또는 도메인 서비스 생성 실패 (치명적, 재시도 없음)
    #[error("Initialization error ({component}): {message}")]
    InitializationError { component: String, message: String },

    /// 허용되지 않은 Host/Origin 요청 (400 Bad Request)
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// `validator` 필드 단위 검증 실패 (400 Bad Request, 상세 포함)
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] validator::ValidationErrors),

    /// JSON 본문 역직렬화 실패 (400 Bad Request, 위치 정보만 노출)
    #[error("Malformed JSON body: {0}")]
    MalformedJson(serde_json::Error),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 요청 빈도 제한 초과 (429 Too Many Requests)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// 도메인 서비스가 레지스트리에 없음 (503 Service Unavailable)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(ServiceKind),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 추론 백엔드 등 외부 서비스 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 초기화 에러를 생성합니다.
    pub fn initialization(component: impl Into<String>, message: impl std::fmt::Display) -> Self {
        AppError::InitializationError {
            component: component.into(),
            message: message.to_string(),
        }
    }

    /// 이 에러의 안정적인 종류
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InitializationError { .. } => ErrorKind::Initialization,
            AppError::PolicyViolation(_) => ErrorKind::PolicyViolation,
            AppError::ValidationError(_)
            | AppError::InvalidPayload(_)
            | AppError::MalformedJson(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::RateLimited(_) => ErrorKind::RateLimited,
            AppError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            AppError::ExternalServiceError(_) => ErrorKind::UpstreamFailure,
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// 클라이언트에게 안전한 [`ErrorEnvelope`]를 생성합니다.
    ///
    /// 서버 측 장애는 종류별 고정 메시지만 담고, 원본 메시지는 포함하지 않습니다.
    pub fn envelope(&self) -> ErrorEnvelope {
        let kind = self.kind();
        let (message, detail) = match self {
            AppError::PolicyViolation(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::RateLimited(msg) => (msg.clone(), None),
            AppError::InvalidPayload(errors) => (
                "요청 데이터가 유효하지 않습니다".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            AppError::MalformedJson(err) => {
                let message = match err.classify() {
                    serde_json::error::Category::Data => "요청 필드가 올바르지 않습니다",
                    _ => "JSON 형식이 올바르지 않습니다",
                };
                (
                    message.to_string(),
                    Some(serde_json::json!({ "line": err.line(), "column": err.column() })),
                )
            }
            AppError::ServiceUnavailable(service) => (
                format!("{} 서비스가 아직 준비되지 않았습니다", service),
                Some(serde_json::json!({ "service": service })),
            ),
            AppError::InitializationError { .. } => {
                ("서비스 초기화에 실패했습니다".to_string(), None)
            }
            AppError::ExternalServiceError(_) => {
                ("추론 백엔드 호출에 실패했습니다".to_string(), None)
            }
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                ("내부 서버 오류가 발생했습니다".to_string(), None)
            }
        };

        ErrorEnvelope {
            error: kind,
            message,
            detail,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::PolicyViolation(_)
            | AppError::ValidationError(_)
            | AppError::InvalidPayload(_)
            | AppError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 계열은 원인을 서버 로그에만 기록하고, 클라이언트에는 envelope만 전달합니다.
    fn error_response(&self) -> HttpResponse {
        let envelope = self.envelope();

        if envelope.error.is_server_fault() {
            log::error!("❌ 요청 처리 실패 [{}]: {}", envelope.error.as_str(), self);
        } else {
            log::debug!("요청 거부 [{}]: {}", envelope.error.as_str(), self);
        }

        envelope.into_response(self.status_code())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let body = serde_json::to_vec(&payload).context("Failed to encode payload")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use validator::Validate;

    async fn envelope_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::PolicyViolation("bad host".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ValidationError("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("nope".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::RateLimited("slow down".into()).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::ServiceUnavailable(ServiceKind::Ocr).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::ExternalServiceError("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::initialization("redis", "refused").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_server_faults_do_not_leak_cause() {
        let (status, body) = envelope_json(AppError::DatabaseError(
            "connection refused at 10.0.0.7:27017".into(),
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal");
        assert!(!body.to_string().contains("10.0.0.7"));
        assert!(body.get("detail").is_none());

        let (status, body) =
            envelope_json(AppError::ExternalServiceError("panic in worker: oom".into())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "upstream_failure");
        assert!(!body.to_string().contains("oom"));
    }

    #[actix_web::test]
    async fn test_policy_violation_envelope() {
        let (status, body) =
            envelope_json(AppError::PolicyViolation("허용되지 않은 Host".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "policy_violation");
        assert_eq!(body["message"], "허용되지 않은 Host");
    }

    #[actix_web::test]
    async fn test_service_unavailable_carries_kind() {
        let (_, body) = envelope_json(AppError::ServiceUnavailable(ServiceKind::Translation)).await;

        assert_eq!(body["error"], "service_unavailable");
        assert_eq!(body["detail"]["service"], "translation");
    }

    #[test]
    fn test_envelope_for_foreign_status() {
        let limited = ErrorEnvelope::for_status(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(limited.error, ErrorKind::RateLimited);
        assert!(limited.detail.is_none());

        assert_eq!(
            ErrorEnvelope::for_status(StatusCode::METHOD_NOT_ALLOWED).error,
            ErrorKind::Validation
        );
        assert_eq!(
            ErrorEnvelope::for_status(StatusCode::INTERNAL_SERVER_ERROR).error,
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_malformed_json_exposes_position_only() {
        let err = serde_json::from_str::<serde_json::Value>("{\"text\": ").unwrap_err();
        let envelope = AppError::MalformedJson(err).envelope();

        assert_eq!(envelope.error, ErrorKind::Validation);
        assert_eq!(envelope.message, "JSON 형식이 올바르지 않습니다");
        let detail = envelope.detail.expect("position detail");
        assert_eq!(detail["line"], 1);
        assert!(detail.get("column").is_some());
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        text: String,
    }

    #[test]
    fn test_invalid_payload_has_field_detail() {
        let errors = Sample { text: String::new() }.validate().unwrap_err();
        let envelope = AppError::from(errors).envelope();

        assert_eq!(envelope.error, ErrorKind::Validation);
        let detail = envelope.detail.expect("field detail");
        assert!(detail.get("text").is_some());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
