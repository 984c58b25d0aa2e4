//! 상태 조회 (health / readiness)
//!
//! 레지스트리 스냅샷을 읽기만 하므로 어떤 생명주기 단계에서도 실패하지 않습니다.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::registry::{ServiceKind, ServiceRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// `GET /health` 응답 본문
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub services: BTreeMap<ServiceKind, bool>,
}

/// 레지스트리 기반 상태 보고기
#[derive(Clone)]
pub struct HealthReporter {
    registry: Arc<ServiceRegistry>,
}

impl HealthReporter {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// 모든 서비스 종류가 존재할 때만 `healthy`입니다.
    pub fn health(&self) -> HealthSnapshot {
        let services = self.registry.snapshot().presence();
        let status = if services.values().all(|present| *present) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthSnapshot { status, services }
    }
}

/// `GET /` 응답 본문
#[derive(Debug, Clone, Serialize)]
pub struct ServiceIdentity {
    pub message: String,
    pub version: String,
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
}

impl ServiceIdentity {
    pub fn new(service_name: &str) -> Self {
        Self {
            message: service_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running",
            started_at: Utc::now(),
        }
    }
}
