//! 실행 환경, 서버 및 데이터 저장소 설정 관리 모듈

use super::{read_bool, read_or, read_string, ConfigSource};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 디버그 로깅 기본 활성화
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 값으로 실행 환경을 결정합니다. 없으면 `Production`입니다.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self::from_str(&read_string(source, "ENVIRONMENT", "production"))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// 서버 바인딩 및 프로세스 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩 호스트 (`HOST`, 기본값 "0.0.0.0")
    pub host: String,
    /// 바인딩 포트 (`PORT`, 기본값 8000)
    pub port: u16,
    /// 워커 스레드 수 (`WORKERS`, 기본값 4)
    pub workers: usize,
    /// 디버그 모드 (`DEBUG`, 개발 환경에서는 기본 활성화)
    pub debug: bool,
    /// 종료 시 진행 중 요청을 기다리는 최대 시간 (`SHUTDOWN_TIMEOUT_SECS`, 기본값 30)
    pub shutdown_timeout_secs: u64,
    /// `/` 엔드포인트에 노출되는 서비스 이름 (`SERVICE_NAME`)
    pub service_name: String,
}

impl ServerConfig {
    pub fn from_source(source: &dyn ConfigSource, environment: &Environment) -> Self {
        Self {
            host: read_string(source, "HOST", "0.0.0.0"),
            port: read_or(source, "PORT", 8000),
            workers: read_or(source, "WORKERS", 4usize).max(1),
            debug: read_bool(source, "DEBUG", environment.is_development()),
            shutdown_timeout_secs: read_or(source, "SHUTDOWN_TIMEOUT_SECS", 30),
            service_name: read_string(source, "SERVICE_NAME", "MTLverse ML Services"),
        }
    }

    /// 로그 출력용 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MongoDB / Redis 연결 설정
#[derive(Debug, Clone)]
pub struct DataStoreConfig {
    /// `MONGODB_URI`, 기본값 "mongodb://localhost:27017"
    pub mongodb_uri: String,
    /// `DATABASE_NAME`, 기본값 "mtlverse_ml"
    pub database_name: String,
    /// `REDIS_URL`, 기본값 "redis://localhost:6379"
    pub redis_url: String,
}

impl DataStoreConfig {
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self {
            mongodb_uri: read_string(source, "MONGODB_URI", "mongodb://localhost:27017"),
            database_name: read_string(source, "DATABASE_NAME", "mtlverse_ml"),
            redis_url: read_string(source, "REDIS_URL", "redis://localhost:6379"),
        }
    }
}
