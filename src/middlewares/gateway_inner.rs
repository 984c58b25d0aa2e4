//! RequestGateway 정책 검사, 에러 응답 정규화, 메트릭 기록의 핵심 로직
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use actix_cors::CorsError;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::core::errors::{AppError, ErrorEnvelope};
use crate::core::metrics::{record_policy_rejection, record_request};
use crate::middlewares::policy::{HostPolicy, OriginPolicy};

pub struct RequestGatewayService<S> {
    pub service: Rc<S>,
    pub hosts: Arc<HostPolicy>,
    pub origins: Arc<OriginPolicy>,
    pub trust_forwarded_host: bool,
}

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

struct Rejection {
    reason: &'static str,
    message: String,
}

impl<S, B> Service<ServiceRequest> for RequestGatewayService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let rejection = check_policies(&req, &self.hosts, &self.origins, self.trust_forwarded_host);

        Box::pin(async move {
            let started = Instant::now();
            let method = req.method().to_string();
            let request_id = request_id(&req);

            if let Some(rejection) = rejection {
                record_policy_rejection(rejection.reason);
                log::warn!(
                    "🚫 게이트웨이 정책 위반 ({}): {} {} [{}]",
                    rejection.reason,
                    method,
                    req.path(),
                    request_id.to_str().unwrap_or("-")
                );

                let mut response = AppError::PolicyViolation(rejection.message).error_response();
                response.headers_mut().insert(REQUEST_ID, request_id);
                record_request(&method, response.status().as_u16(), started.elapsed());

                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            // 내부 체인이 Err를 돌려주면 요청이 소비되므로 미리 보관합니다
            let http_req = req.request().clone();

            let mut res = match service.call(req).await {
                Ok(res) => normalize_response(res),
                Err(e) => ServiceResponse::new(http_req, envelope_for(&e)).map_into_right_body(),
            };

            res.headers_mut().insert(REQUEST_ID, request_id);
            record_request(&method, res.status().as_u16(), started.elapsed());
            Ok(res)
        })
    }
}

/// 들어온 `x-request-id`를 유지하고, 없으면 새로 발급합니다.
fn request_id(req: &ServiceRequest) -> HeaderValue {
    req.headers()
        .get(&REQUEST_ID)
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok())
        .unwrap_or_else(|| HeaderValue::from_static("-"))
}

/// 정책 검사에 사용할 Host
///
/// 기본적으로 `Host` 헤더(HTTP/2는 `:authority`)만 봅니다. 클라이언트가 임의로 넣을 수 있는
/// `Forwarded` / `X-Forwarded-Host`는 `trust_forwarded`일 때만 반영합니다.
fn request_host(req: &ServiceRequest, trust_forwarded: bool) -> String {
    if trust_forwarded {
        return req.connection_info().host().to_string();
    }

    match req.headers().get(header::HOST) {
        Some(value) => value.to_str().unwrap_or_default().to_string(),
        None => req
            .uri()
            .authority()
            .map(|authority| authority.as_str().to_string())
            .unwrap_or_default(),
    }
}

fn check_policies(
    req: &ServiceRequest,
    hosts: &HostPolicy,
    origins: &OriginPolicy,
    trust_forwarded_host: bool,
) -> Option<Rejection> {
    let host = request_host(req, trust_forwarded_host);
    if !hosts.is_allowed(&host) {
        return Some(Rejection {
            reason: "host",
            message: format!("허용되지 않은 Host입니다: {}", host),
        });
    }

    // Origin은 헤더가 있을 때만 검사합니다
    let origin = req.headers().get(header::ORIGIN)?;
    match origin.to_str() {
        Ok(value) if origins.is_allowed(value) => None,
        Ok(value) => Some(Rejection {
            reason: "origin",
            message: format!("허용되지 않은 Origin입니다: {}", value),
        }),
        Err(_) => Some(Rejection {
            reason: "origin",
            message: "Origin 헤더를 해석할 수 없습니다".to_string(),
        }),
    }
}

/// 내부 미들웨어(Rate Limiting, CORS 등)가 만든 에러 응답을 envelope으로 바꿉니다.
///
/// `AppError`에서 만들어진 응답은 이미 envelope이므로 그대로 둡니다.
fn normalize_response<B>(res: ServiceResponse<B>) -> ServiceResponse<EitherBody<B>> {
    let status = res.status();
    if !status.is_client_error() && !status.is_server_error() {
        return res.map_into_left_body();
    }

    let replacement = match res.response().error() {
        Some(err) if err.as_error::<AppError>().is_some() => None,
        Some(err) => Some(envelope_for(err)),
        None => Some(ErrorEnvelope::for_status(status).into_response(status)),
    };

    match replacement {
        None => res.map_into_left_body(),
        Some(mut response) => {
            let (req, original) = res.into_parts();
            carry_headers(original.headers(), response.headers_mut());
            ServiceResponse::new(req, response).map_into_right_body()
        }
    }
}

fn envelope_for(err: &Error) -> HttpResponse {
    if let Some(app_error) = err.as_error::<AppError>() {
        return app_error.error_response();
    }

    if let Some(cors_error) = err.as_error::<CorsError>() {
        return AppError::PolicyViolation(cors_error.to_string()).error_response();
    }

    let status = err.as_response_error().status_code();
    if status.is_server_error() {
        log::error!("❌ 내부 미들웨어 에러 [{}]: {}", status, err);
    }
    ErrorEnvelope::for_status(status).into_response(status)
}

/// `Retry-After`, CORS 헤더 등은 유지하고 본문 관련 헤더만 버립니다.
fn carry_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            to.append(name.clone(), value.clone());
        }
    }
}
