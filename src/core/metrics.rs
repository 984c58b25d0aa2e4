//! Prometheus 메트릭 노출
//!
//! `metrics` 파사드로 기록하고, 설치된 레코더가 있으면 `GET /metrics`에서
//! Prometheus 텍스트 형식으로 렌더링합니다.

use std::time::Duration;

use log::warn;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const GATEWAY_POLICY_REJECTIONS_TOTAL: &str = "gateway_policy_rejections_total";

const RECORDER_UNAVAILABLE: &str = "# Prometheus metrics not available (recorder not initialized)\n";

/// Prometheus 레코더 핸들 보관자
#[derive(Clone)]
pub struct MetricsExporter {
    handle: Option<PrometheusHandle>,
}

impl MetricsExporter {
    /// 전역 레코더를 설치합니다. 이미 설치되어 있으면 비활성 상태로 동작합니다.
    pub fn install() -> Self {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Self {
                handle: Some(handle),
            },
            Err(e) => {
                warn!("⚠️ Prometheus 레코더 설치 실패: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { handle: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn render(&self) -> String {
        match &self.handle {
            Some(handle) => handle.render(),
            None => RECORDER_UNAVAILABLE.to_string(),
        }
    }
}

/// 처리된 요청 하나를 기록합니다.
pub fn record_request(method: &str, status: u16, elapsed: Duration) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(HTTP_REQUEST_DURATION_SECONDS, "method" => method.to_string())
        .record(elapsed.as_secs_f64());
}

/// 게이트웨이 정책 거부를 기록합니다. `reason`은 `host` 또는 `origin`입니다.
pub fn record_policy_rejection(reason: &'static str) {
    counter!(GATEWAY_POLICY_REJECTIONS_TOTAL, "reason" => reason).increment(1);
}
