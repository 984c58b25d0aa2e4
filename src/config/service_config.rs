//! 요청 게이트웨이 및 추론 백엔드 설정

use super::{read_bool, read_list, read_or, read_string, ConfigSource};

/// 요청 게이트웨이 정책 설정
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// 허용 Host 패턴 (`ALLOWED_HOSTS`). `*`, 정확한 이름, `*.suffix`를 지원합니다.
    pub allowed_hosts: Vec<String>,
    /// 허용 Origin 목록 (`ALLOWED_ORIGINS`). `*`는 모든 Origin을 허용합니다.
    pub allowed_origins: Vec<String>,
    /// `Forwarded` / `X-Forwarded-Host`로 Host를 판단할지 여부 (`TRUST_FORWARDED_HOST`).
    /// 신뢰할 수 있는 리버스 프록시 뒤에서만 켭니다. 기본값은 `Host` 헤더만 사용합니다.
    pub trust_forwarded_host: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst_size: u32,
    /// JSON 본문 최대 크기 (바이트)
    pub json_limit_bytes: usize,
}

impl GatewayConfig {
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self {
            allowed_hosts: read_list(source, "ALLOWED_HOSTS", &["localhost", "127.0.0.1"]),
            allowed_origins: read_list(
                source,
                "ALLOWED_ORIGINS",
                &["http://localhost:3000", "http://127.0.0.1:3000"],
            ),
            trust_forwarded_host: read_bool(source, "TRUST_FORWARDED_HOST", false),
            rate_limit_per_second: read_or(source, "RATE_LIMIT_PER_SECOND", 100u64).max(1),
            rate_limit_burst_size: read_or(source, "RATE_LIMIT_BURST_SIZE", 200u32).max(1),
            json_limit_bytes: read_or(source, "JSON_LIMIT_BYTES", 10 * 1024 * 1024),
        }
    }

    /// 모든 Origin 허용 여부
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

/// 추론 백엔드 설정
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// `TRANSLATION_BACKEND_URL`
    pub translation_url: String,
    /// `OCR_BACKEND_URL`
    pub ocr_url: String,
    /// 백엔드 요청 타임아웃 (`INFERENCE_TIMEOUT_SECS`)
    pub request_timeout_secs: u64,
    /// 번역 결과 캐시 TTL (`TRANSLATION_CACHE_TTL_SECS`)
    pub translation_cache_ttl_secs: u64,
    /// 디코딩된 OCR 이미지 최대 크기 (`OCR_MAX_IMAGE_BYTES`)
    pub max_image_bytes: usize,
}

impl InferenceConfig {
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self {
            translation_url: read_string(source, "TRANSLATION_BACKEND_URL", "http://localhost:9001"),
            ocr_url: read_string(source, "OCR_BACKEND_URL", "http://localhost:9002"),
            request_timeout_secs: read_or(source, "INFERENCE_TIMEOUT_SECS", 60),
            translation_cache_ttl_secs: read_or(source, "TRANSLATION_CACHE_TTL_SECS", 86_400),
            max_image_bytes: read_or(source, "OCR_MAX_IMAGE_BYTES", 8 * 1024 * 1024),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::from_source(&std::collections::HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source_of;

    #[test]
    fn test_gateway_defaults() {
        let config = GatewayConfig::from_source(&source_of(&[]));

        assert_eq!(config.rate_limit_per_second, 100);
        assert_eq!(config.rate_limit_burst_size, 200);
        assert_eq!(config.json_limit_bytes, 10 * 1024 * 1024);
        assert!(!config.allows_any_origin());
        assert!(!config.trust_forwarded_host);
    }

    #[test]
    fn test_gateway_forwarded_host_opt_in() {
        let config = GatewayConfig::from_source(&source_of(&[("TRUST_FORWARDED_HOST", "true")]));
        assert!(config.trust_forwarded_host);
    }

    #[test]
    fn test_gateway_wildcard_origin() {
        let config = GatewayConfig::from_source(&source_of(&[("ALLOWED_ORIGINS", "*")]));
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_inference_overrides() {
        let config = InferenceConfig::from_source(&source_of(&[
            ("TRANSLATION_BACKEND_URL", "http://translator:9001"),
            ("INFERENCE_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(config.translation_url, "http://translator:9001");
        assert_eq!(config.ocr_url, "http://localhost:9002");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.translation_cache_ttl_secs, 86_400);
    }
}
