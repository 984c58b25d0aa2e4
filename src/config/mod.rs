//! # Configuration Module
//!
//! ML 서비스 백엔드의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수(및 `.env` 프로필 파일)에서 값을 읽어 프로세스 시작 시 한 번
//! [`AppSettings`]로 고정하고, 이후에는 명시적으로 전달합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, 데이터 저장소 설정
//! - [`service_config`] - 요청 게이트웨이, 추론 백엔드 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8000"
//! export DEBUG="false"
//!
//! # 데이터 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 게이트웨이
//! export ALLOWED_HOSTS="api.mtlverse.com,*.mtlverse.com"
//! export ALLOWED_ORIGINS="https://mtlverse.com"
//!
//! # 추론 백엔드
//! export TRANSLATION_BACKEND_URL="http://translator:9001"
//! export OCR_BACKEND_URL="http://ocr:9002"
//! ```
//!
//! 숫자/불리언 값의 파싱에 실패하면 에러 로그를 남기고 기본값을 사용합니다.

pub mod data_config;
pub mod service_config;

pub use data_config::*;
pub use service_config::*;

use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use log::error;

/// 설정 값 조회 소스
///
/// 운영에서는 [`EnvSource`], 테스트에서는 `HashMap`을 사용합니다.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// 프로세스 환경 변수
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

pub(crate) fn read_string(source: &dyn ConfigSource, key: &str, default: &str) -> String {
    source
        .get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn read_or<T>(source: &dyn ConfigSource, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match source.get(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            error!("{} 파싱 실패: {}. 기본값 사용", key, e);
            default
        }),
        None => default,
    }
}

pub(crate) fn read_bool(source: &dyn ConfigSource, key: &str, default: bool) -> bool {
    match source.get(key) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            other => {
                error!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, other, default);
                default
            }
        },
        None => default,
    }
}

/// 쉼표로 구분된 목록을 읽습니다. 빈 항목은 무시합니다.
pub(crate) fn read_list(source: &dyn ConfigSource, key: &str, default: &[&str]) -> Vec<String> {
    match source.get(key) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        None => default.iter().map(|item| item.to_string()).collect(),
    }
}

/// 프로세스 전체 설정 스냅샷
///
/// 오케스트레이터가 실행되기 전에 한 번 로드됩니다.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub environment: Environment,
    pub server: ServerConfig,
    pub data_stores: DataStoreConfig,
    pub gateway: GatewayConfig,
    pub inference: InferenceConfig,
}

impl AppSettings {
    /// 프로세스 환경 변수에서 설정을 로드합니다.
    pub fn load() -> Self {
        Self::from_source(&EnvSource)
    }

    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let environment = Environment::from_source(source);

        Self {
            server: ServerConfig::from_source(source, &environment),
            data_stores: DataStoreConfig::from_source(source),
            gateway: GatewayConfig::from_source(source),
            inference: InferenceConfig::from_source(source),
            environment,
        }
    }
}

#[cfg(test)]
pub(crate) fn source_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
