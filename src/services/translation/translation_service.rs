//! # 원격 번역 서비스
//!
//! ```text
//! translate(request)
//!   ├─ Redis 조회 (translation:<sha256>) ── hit ──▶ cached: true 응답
//!   └─ miss
//!       ├─ POST {TRANSLATION_BACKEND_URL}/translate
//!       ├─ Redis 저장 (TTL)              ← 실패해도 응답은 성공
//!       └─ translation_history 기록      ← 실패해도 응답은 성공
//! ```
//!
//! 캐시와 이력 기록은 보조 기능입니다. 이 단계의 실패는 `warn` 로그만 남기고
//! 번역 결과는 그대로 반환합니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use mongodb::bson::{doc, DateTime, Document};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::caching::redis::RedisClient;
use crate::config::InferenceConfig;
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::{TranslationRequest, TranslationResponse};
use crate::services::TranslationEngine;
use crate::services::inference::InferenceClient;

const HISTORY_COLLECTION: &str = "translation_history";

/// 번역 백엔드 요청 본문
#[derive(Serialize)]
struct BackendRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

/// 번역 백엔드 응답 본문
#[derive(Deserialize)]
struct BackendReply {
    translated_text: String,
    #[serde(default)]
    detected_lang: Option<String>,
}

/// 원격 추론 백엔드 기반 번역 서비스
pub struct RemoteTranslationService {
    client: InferenceClient,
    cache: Arc<RedisClient>,
    database: Arc<Database>,
    cache_ttl_secs: u64,
}

impl RemoteTranslationService {
    pub fn new(
        config: &InferenceConfig,
        database: Arc<Database>,
        cache: Arc<RedisClient>,
    ) -> AppResult<Self> {
        let client = InferenceClient::new(
            "translation",
            &config.translation_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self {
            client,
            cache,
            database,
            cache_ttl_secs: config.translation_cache_ttl_secs,
        })
    }

    /// 원문과 언어쌍으로 결정되는 캐시 키
    pub fn cache_key(request: &TranslationRequest) -> String {
        let mut hasher = Sha256::new();
        hasher.update(request.source_lang.as_bytes());
        hasher.update([0u8]);
        hasher.update(request.target_lang.as_bytes());
        hasher.update([0u8]);
        hasher.update(request.text.as_bytes());
        format!("translation:{:x}", hasher.finalize())
    }

    async fn record_history(&self, request: &TranslationRequest, response: &TranslationResponse) {
        let database = match self.database.get_database() {
            Ok(database) => database,
            Err(e) => {
                warn!("번역 이력 기록 건너뜀: {}", e);
                return;
            }
        };

        let entry = doc! {
            "source_lang": response.source_lang.as_str(),
            "target_lang": response.target_lang.as_str(),
            "source_chars": request.text.chars().count() as i64,
            "created_at": DateTime::now(),
        };

        if let Err(e) = database
            .collection::<Document>(HISTORY_COLLECTION)
            .insert_one(entry)
            .await
        {
            warn!("번역 이력 기록 실패: {}", e);
        }
    }
}

#[async_trait]
impl TranslationEngine for RemoteTranslationService {
    fn name(&self) -> &str {
        "remote-translation"
    }

    async fn translate(&self, request: &TranslationRequest) -> AppResult<TranslationResponse> {
        let key = Self::cache_key(request);

        match self.cache.get::<TranslationResponse>(&key).await {
            Ok(Some(mut hit)) => {
                debug!("번역 캐시 적중: {}", key);
                hit.cached = true;
                return Ok(hit);
            }
            Ok(None) => {}
            Err(e) => warn!("번역 캐시 조회 실패, 백엔드로 진행: {}", e),
        }

        let reply: BackendReply = self
            .client
            .post_json(
                "translate",
                &BackendRequest {
                    text: &request.text,
                    source_lang: &request.source_lang,
                    target_lang: &request.target_lang,
                },
            )
            .await?;

        let response = TranslationResponse {
            translated_text: reply.translated_text,
            source_lang: reply
                .detected_lang
                .unwrap_or_else(|| request.source_lang.clone()),
            target_lang: request.target_lang.clone(),
            cached: false,
        };

        if let Err(e) = self
            .cache
            .set_with_expiry(&key, &response, self.cache_ttl_secs)
            .await
        {
            warn!("번역 결과 캐싱 실패: {}", e);
        }
        self.record_history(request, &response).await;

        Ok(response)
    }
}
