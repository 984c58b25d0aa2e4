//! 요청 게이트웨이 미들웨어
//!
//! 가장 바깥쪽에 등록되어 Host / Origin 정책을 검사하고 요청 메트릭을 기록합니다.
//! 정책 위반 요청은 내부 미들웨어나 핸들러가 실행되기 전에 거부됩니다.
//! 안쪽 미들웨어가 만든 에러 응답(Rate Limiting 429, CORS 거부 등)도 여기서
//! `ErrorEnvelope` 형태로 다시 씁니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::config::GatewayConfig;
use crate::middlewares::gateway_inner::RequestGatewayService;
use crate::middlewares::policy::{HostPolicy, OriginPolicy};

/// 요청 게이트웨이 미들웨어
///
/// ```rust,ignore
/// App::new()
///     .wrap(Governor::new(&governor_conf))
///     .wrap(configure_cors(&settings.gateway))
///     .wrap(RequestGateway::from_config(&settings.gateway)) // 마지막 wrap = 가장 바깥
/// ```
#[derive(Clone)]
pub struct RequestGateway {
    hosts: Arc<HostPolicy>,
    origins: Arc<OriginPolicy>,
    trust_forwarded_host: bool,
}

impl RequestGateway {
    pub fn new(hosts: Arc<HostPolicy>, origins: Arc<OriginPolicy>) -> Self {
        Self {
            hosts,
            origins,
            trust_forwarded_host: false,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            Arc::new(HostPolicy::new(&config.allowed_hosts)),
            Arc::new(OriginPolicy::new(&config.allowed_origins)),
        )
        .trust_forwarded_host(config.trust_forwarded_host)
    }

    /// 리버스 프록시가 넘겨준 `Forwarded` / `X-Forwarded-Host`로 Host를 판단합니다.
    pub fn trust_forwarded_host(mut self, trust: bool) -> Self {
        self.trust_forwarded_host = trust;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestGateway
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequestGatewayService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestGatewayService {
            service: Rc::new(service),
            hosts: Arc::clone(&self.hosts),
            origins: Arc::clone(&self.origins),
            trust_forwarded_host: self.trust_forwarded_host,
        }))
    }
}
