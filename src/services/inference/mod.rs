//! 추론 백엔드 HTTP 클라이언트
//!
//! 번역/OCR 모델은 별도 프로세스의 추론 서버에서 실행됩니다. 이 모듈은 JSON 요청을
//! 보내고 응답을 역직렬화하는 얇은 `reqwest` 래퍼이며, 네트워크/상태 코드/디코딩
//! 실패를 모두 `AppError::ExternalServiceError`로 정규화합니다.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{AppError, AppResult, ErrorContext};

/// 단일 추론 백엔드에 대한 클라이언트
#[derive(Clone)]
pub struct InferenceClient {
    http: Client,
    base_url: Url,
}

impl InferenceClient {
    /// 새 클라이언트를 생성합니다.
    ///
    /// 잘못된 URL이나 HTTP 클라이언트 생성 실패는 초기화 에러로 보고됩니다.
    /// `http://infer/ml`처럼 경로가 있는 주소는 `http://infer/ml/` 아래로 요청을 보냅니다.
    pub fn new(component: &str, base_url: &str, timeout: Duration) -> AppResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AppError::initialization(component, format!("잘못된 백엔드 URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::initialization(
                component,
                format!("백엔드 URL은 http(s) 주소여야 합니다: {}", base_url),
            ));
        }

        // join()은 마지막 세그먼트를 교체하므로 디렉터리 형태로 맞춥니다
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::initialization(component, e))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 기본 URL 아래의 엔드포인트 주소. 앞의 `/`는 무시합니다.
    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("잘못된 엔드포인트 경로 '{}'", path))
    }

    /// `path`에 JSON 본문을 POST하고 JSON 응답을 역직렬화합니다.
    pub async fn post_json<Req, Res>(&self, path: &str, body: &Req) -> AppResult<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.endpoint(path)?;

        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 요청 실패: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "{} 응답 상태 {}",
                url, status
            )));
        }

        response
            .json::<Res>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 응답 디코딩 실패: {}", url, e)))
    }
}
