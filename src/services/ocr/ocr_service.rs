//! 원격 OCR 서비스
//!
//! 요청 이미지는 백엔드로 보내기 전에 base64 디코딩 가능 여부와 크기 제한을 확인합니다.
//! 잘못된 이미지는 클라이언트 에러(400)이고, 백엔드 장애만 502로 보고됩니다.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::{OcrRegion, OcrRequest, OcrResponse};
use crate::services::OcrEngine;
use crate::services::inference::InferenceClient;

#[derive(Serialize)]
struct BackendRequest<'a> {
    image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

#[derive(Deserialize)]
struct BackendReply {
    regions: Vec<OcrRegion>,
}

/// 원격 추론 백엔드 기반 OCR 서비스
pub struct RemoteOcrService {
    client: InferenceClient,
    max_image_bytes: usize,
}

impl RemoteOcrService {
    pub fn new(config: &InferenceConfig) -> AppResult<Self> {
        let client = InferenceClient::new(
            "ocr",
            &config.ocr_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self {
            client,
            max_image_bytes: config.max_image_bytes,
        })
    }

    /// base64 이미지를 디코딩하여 크기 제한을 검사하고, 디코딩된 바이트 수를 반환합니다.
    pub fn check_image(&self, image_base64: &str) -> AppResult<usize> {
        let bytes = STANDARD
            .decode(image_base64.trim())
            .map_err(|_| AppError::ValidationError("이미지가 올바른 base64 형식이 아닙니다".to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::ValidationError("이미지 데이터가 비어 있습니다".to_string()));
        }
        if bytes.len() > self.max_image_bytes {
            return Err(AppError::ValidationError(format!(
                "이미지 크기가 제한({} bytes)을 초과했습니다",
                self.max_image_bytes
            )));
        }

        Ok(bytes.len())
    }
}

#[async_trait]
impl OcrEngine for RemoteOcrService {
    fn name(&self) -> &str {
        "remote-ocr"
    }

    async fn recognize(&self, request: &OcrRequest) -> AppResult<OcrResponse> {
        let size = self.check_image(&request.image_base64)?;
        log::debug!("OCR 요청 전달: {} bytes", size);

        let reply: BackendReply = self
            .client
            .post_json(
                "ocr",
                &BackendRequest {
                    image: request.image_base64.trim(),
                    language: request.language.as_deref(),
                },
            )
            .await?;

        Ok(OcrResponse::from_regions(reply.regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(max_image_bytes: usize) -> RemoteOcrService {
        RemoteOcrService::new(&InferenceConfig {
            max_image_bytes,
            ..InferenceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_check_image_accepts_valid_payload() {
        // "hello" -> aGVsbG8=
        assert_eq!(service(1024).check_image("aGVsbG8=").unwrap(), 5);
    }

    #[test]
    fn test_check_image_rejects_garbage() {
        let result = service(1024).check_image("%%%not-base64%%%");
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_check_image_enforces_limit() {
        let result = service(4).check_image("aGVsbG8=");
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
