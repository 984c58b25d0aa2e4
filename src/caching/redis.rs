//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 캐시 클라이언트입니다. 값은 JSON으로 직렬화되어 저장되며,
//! 연결은 멀티플렉싱을 사용해 단일 TCP 연결에서 여러 동시 요청을 처리합니다.
//!
//! 생성 시에는 연결하지 않고, 생명주기 오케스트레이터의 `initialize()` 호출에서
//! 서버 가용성을 `PING`으로 확인합니다.

use async_trait::async_trait;
use log::info;
use once_cell::sync::OnceCell;
use redis::{AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::DataStoreConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::lifecycle::DependencyInitializer;

/// Redis 캐시 클라이언트 래퍼
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let redis = Arc::new(RedisClient::from_config(&settings.data_stores));
/// redis.initialize().await?;
///
/// redis.set_with_expiry("translation:ab12", &response, 86_400).await?;
/// let cached: Option<TranslationResponse> = redis.get("translation:ab12").await?;
/// ```
pub struct RedisClient {
    url: String,
    client: OnceCell<Client>,
}

impl RedisClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: OnceCell::new(),
        }
    }

    pub fn from_config(config: &DataStoreConfig) -> Self {
        Self::new(&config.redis_url)
    }

    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    fn client(&self) -> Result<&Client, RedisError> {
        self.client.get().ok_or_else(|| {
            RedisError::from((redis::ErrorKind::ClientError, "Redis client is not initialized"))
        })
    }

    /// 지정된 키에서 JSON 값을 조회합니다.
    ///
    /// - `Ok(Some(T))` - 키가 존재하고 역직렬화 성공
    /// - `Ok(None)` - 키가 존재하지 않음
    /// - `Err(RedisError)` - Redis 오류, 미초기화 또는 역직렬화 실패
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RedisError> {
        let mut conn = self.client()?.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json).map_err(|e| {
                    RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string()))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 만료 시간(초)과 함께 값을 JSON으로 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), RedisError> {
        let mut conn = self.client()?.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(|e| {
            RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string()))
        })?;
        conn.set_ex(key, json, seconds).await
    }
}

#[async_trait]
impl DependencyInitializer for RedisClient {
    fn name(&self) -> &str {
        "redis"
    }

    async fn initialize(&self) -> AppResult<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let client = Client::open(self.url.as_str()).map_err(|e| AppError::initialization(self.name(), e))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::initialization(self.name(), e))?;
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| AppError::initialization(self.name(), e))?;

        let _ = self.client.set(client);
        info!("✅ Redis 연결 성공");

        Ok(())
    }
}
