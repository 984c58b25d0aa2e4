//! # Domain Service Registry
//!
//! 생성된 도메인 서비스(번역, OCR) 인스턴스에 대한 참조를 보관하는 레지스트리입니다.
//! 전역 싱글톤 대신 [`LifecycleOrchestrator`](crate::core::lifecycle::LifecycleOrchestrator)가
//! 소유하고, `web::Data<ServiceRegistry>`로 요청 처리 계층에 명시적으로 주입됩니다.
//!
//! ## 상태 모델
//!
//! ```text
//! 시작 전 / 종료 후          시작 완료 ~ 종료 시작
//! ┌──────────────────┐      ┌──────────────────────┐
//! │ translation: ✗   │ ───▶ │ translation: ✓       │
//! │ ocr:         ✗   │ ◀─── │ ocr:         ✓       │
//! └──────────────────┘      └──────────────────────┘
//!        install() : 전체 채움 (1회)   clear() : 전체 비움 (1회)
//! ```
//!
//! 레지스트리는 생애 동안 정확히 두 번만 쓰여집니다. 읽는 쪽은 [`RegistrySnapshot`]의
//! `Arc`를 복제해 불변 스냅샷으로 작업하므로, 일부만 채워진 상태는 관찰될 수 없습니다.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::core::errors::{AppError, AppResult};
use crate::services::{OcrEngine, TranslationEngine};

/// 지원하는 도메인 서비스 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Translation,
    Ocr,
}

impl ServiceKind {
    /// 레지스트리가 기대하는 모든 서비스 종류
    pub const ALL: [ServiceKind; 2] = [ServiceKind::Translation, ServiceKind::Ocr];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Translation => "translation",
            ServiceKind::Ocr => "ocr",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 서비스 종류별 슬롯: 생성된 핸들이 있거나(`Present`) 없거나(`Absent`)
pub enum ServiceSlot<T: ?Sized> {
    Present(Arc<T>),
    Absent,
}

impl<T: ?Sized> ServiceSlot<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, ServiceSlot::Present(_))
    }

    pub fn get(&self) -> Option<&Arc<T>> {
        match self {
            ServiceSlot::Present(handle) => Some(handle),
            ServiceSlot::Absent => None,
        }
    }

    /// 핸들을 꺼내거나, 없으면 `ServiceUnavailable` 에러를 반환합니다.
    pub fn require(&self, kind: ServiceKind) -> AppResult<Arc<T>> {
        self.get()
            .cloned()
            .ok_or(AppError::ServiceUnavailable(kind))
    }
}

impl<T: ?Sized> Clone for ServiceSlot<T> {
    fn clone(&self) -> Self {
        match self {
            ServiceSlot::Present(handle) => ServiceSlot::Present(Arc::clone(handle)),
            ServiceSlot::Absent => ServiceSlot::Absent,
        }
    }
}

impl<T: ?Sized> Default for ServiceSlot<T> {
    fn default() -> Self {
        ServiceSlot::Absent
    }
}

/// 완전히 생성된 도메인 서비스 묶음
///
/// 레지스트리에는 이 묶음 단위로만 설치되므로, 일부 서비스만 존재하는 상태가 생기지 않습니다.
pub struct ServiceSet {
    pub translation: Arc<dyn TranslationEngine>,
    pub ocr: Arc<dyn OcrEngine>,
}

/// 특정 시점의 레지스트리 상태 (불변)
#[derive(Clone, Default)]
pub struct RegistrySnapshot {
    translation: ServiceSlot<dyn TranslationEngine>,
    ocr: ServiceSlot<dyn OcrEngine>,
}

impl RegistrySnapshot {
    /// 모든 종류가 비어 있는 스냅샷
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_set(set: ServiceSet) -> Self {
        Self {
            translation: ServiceSlot::Present(set.translation),
            ocr: ServiceSlot::Present(set.ocr),
        }
    }

    /// 번역 서비스 핸들
    pub fn translation(&self) -> AppResult<Arc<dyn TranslationEngine>> {
        self.translation.require(ServiceKind::Translation)
    }

    /// OCR 서비스 핸들
    pub fn ocr(&self) -> AppResult<Arc<dyn OcrEngine>> {
        self.ocr.require(ServiceKind::Ocr)
    }

    pub fn is_present(&self, kind: ServiceKind) -> bool {
        match kind {
            ServiceKind::Translation => self.translation.is_present(),
            ServiceKind::Ocr => self.ocr.is_present(),
        }
    }

    /// 종류별 존재 여부
    pub fn presence(&self) -> BTreeMap<ServiceKind, bool> {
        ServiceKind::ALL
            .iter()
            .map(|kind| (*kind, self.is_present(*kind)))
            .collect()
    }

    fn present_count(&self) -> usize {
        ServiceKind::ALL
            .iter()
            .filter(|kind| self.is_present(**kind))
            .count()
    }
}

/// 도메인 서비스 레지스트리
///
/// 쓰기는 생명주기 전환 시점(`install`, `clear`)에만 일어나며 오케스트레이터만 수행합니다.
/// 요청 핸들러는 [`ServiceRegistry::snapshot`]으로 읽기만 합니다.
pub struct ServiceRegistry {
    current: RwLock<Arc<RegistrySnapshot>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(RegistrySnapshot::empty())),
        }
    }

    /// 현재 상태의 불변 스냅샷을 반환합니다. 실패하지 않습니다.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// 전체 서비스 묶음을 한 번에 설치합니다.
    pub(crate) fn install(&self, set: ServiceSet) {
        let snapshot = Arc::new(RegistrySnapshot::from_set(set));
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }

    /// 모든 핸들을 해제하고 해제된 개수를 반환합니다.
    pub(crate) fn clear(&self) -> usize {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let released = guard.present_count();
        *guard = Arc::new(RegistrySnapshot::empty());
        released
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
