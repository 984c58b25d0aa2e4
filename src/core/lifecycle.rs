//! # Service Lifecycle Orchestration
//!
//! 프로세스 시작 시 외부 의존성(MongoDB, Redis)을 정해진 순서로 초기화하고
//! 도메인 서비스를 생성해 [`ServiceRegistry`]에 설치하며, 종료 시 레지스트리를 비웁니다.
//!
//! ```text
//! startup():  persistent store ──▶ cache ──▶ services (local set) ──▶ registry.install()
//! shutdown(): Draining ──▶ registry.clear() ──▶ Stopped
//! ```
//!
//! ## 상태 전이
//!
//! ```text
//! Uninitialized ──▶ Ready ──▶ Draining ──▶ Stopped
//!       │
//!       └──────▶ Failed (종료 상태)
//! ```
//!
//! 어느 단계든 실패하면 `Failed`로 전이하고 레지스트리는 비어 있는 채로 남습니다.
//! 실패한 초기화는 재시도하지 않습니다.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use log::{error, info, warn};

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{ServiceKind, ServiceRegistry, ServiceSet};
use crate::services::{OcrEngine, TranslationEngine};
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_failed,
    print_step_start, print_sub_task,
};

/// 시작 시 한 번 초기화되는 외부 의존성
///
/// 구현체는 멱등이어야 합니다. 두 번째 호출은 이미 준비된 연결을 그대로 둡니다.
#[async_trait]
pub trait DependencyInitializer: Send + Sync {
    /// 로그와 에러의 `component`에 사용되는 이름
    fn name(&self) -> &str;

    async fn initialize(&self) -> AppResult<()>;
}

/// 오케스트레이터가 관리하는 의존성의 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyRole {
    PersistentStore,
    Cache,
}

impl DependencyRole {
    fn label(&self) -> &'static str {
        match self {
            DependencyRole::PersistentStore => "persistent store",
            DependencyRole::Cache => "cache",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyState {
    Uninitialized,
    Ready,
    Failed,
}

/// 오케스트레이터 생명주기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Ready,
    Draining,
    Stopped,
    Failed,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Ready => "ready",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
            LifecycleState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// 도메인 서비스 생성자
pub type ServiceConstructor<T> = Box<dyn Fn() -> AppResult<Arc<T>> + Send + Sync>;

/// 서비스 종류별 생성자 묶음
pub struct ServiceConstructors {
    pub translation: ServiceConstructor<dyn TranslationEngine>,
    pub ocr: ServiceConstructor<dyn OcrEngine>,
}

struct DependencyStates {
    store: DependencyState,
    cache: DependencyState,
}

/// 서비스 생명주기 오케스트레이터
///
/// 레지스트리를 소유하며, `startup()`과 `shutdown()`만이 레지스트리를 변경합니다.
pub struct LifecycleOrchestrator {
    store: Arc<dyn DependencyInitializer>,
    cache: Arc<dyn DependencyInitializer>,
    constructors: ServiceConstructors,
    registry: Arc<ServiceRegistry>,
    started: AtomicBool,
    state: Mutex<LifecycleState>,
    dependencies: Mutex<DependencyStates>,
}

impl LifecycleOrchestrator {
    pub fn new(
        store: Arc<dyn DependencyInitializer>,
        cache: Arc<dyn DependencyInitializer>,
        constructors: ServiceConstructors,
    ) -> Self {
        Self {
            store,
            cache,
            constructors,
            registry: Arc::new(ServiceRegistry::new()),
            started: AtomicBool::new(false),
            state: Mutex::new(LifecycleState::Uninitialized),
            dependencies: Mutex::new(DependencyStates {
                store: DependencyState::Uninitialized,
                cache: DependencyState::Uninitialized,
            }),
        }
    }

    /// 요청 처리 계층에 주입할 레지스트리 핸들
    pub fn registry(&self) -> Arc<ServiceRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_ready(&self) -> bool {
        self.state() == LifecycleState::Ready
    }

    pub fn dependency_state(&self, role: DependencyRole) -> DependencyState {
        let states = self.dependencies.lock().unwrap_or_else(PoisonError::into_inner);
        match role {
            DependencyRole::PersistentStore => states.store,
            DependencyRole::Cache => states.cache,
        }
    }

    /// 의존성을 초기화하고 도메인 서비스를 설치합니다.
    ///
    /// 프로세스당 한 번만 호출할 수 있습니다. 두 번째 호출은 아무것도 실행하지 않고
    /// `InternalError`를 반환합니다.
    pub async fn startup(&self) -> AppResult<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("⚠️ startup()이 이미 호출되었습니다 (상태: {})", self.state());
            return Err(AppError::InternalError(
                "라이프사이클 startup()은 한 번만 호출할 수 있습니다".to_string(),
            ));
        }

        print_boxed_title("🔄 STARTING ML SERVICES");

        let result = self.run_startup().await;
        match &result {
            Ok(installed) => {
                self.set_state(LifecycleState::Ready);
                print_final_summary(2, *installed);
                info!("✅ 서비스 시작 완료: 서비스 {}개 설치", installed);
            }
            Err(e) => {
                self.set_state(LifecycleState::Failed);
                error!("❌ 서비스 시작 실패: {}", e);
            }
        }

        result.map(|_| ())
    }

    async fn run_startup(&self) -> AppResult<usize> {
        self.initialize_dependency(1, DependencyRole::PersistentStore)
            .await?;
        self.initialize_dependency(2, DependencyRole::Cache).await?;

        print_step_start(3, "Constructing domain services");
        let set = self.construct_services().map_err(|e| {
            print_step_failed(3, "Domain service construction failed");
            e
        })?;

        self.registry.install(set);
        let installed = ServiceKind::ALL.len();
        print_step_complete(3, "Domain services installed", installed);

        Ok(installed)
    }

    async fn initialize_dependency(&self, step: u8, role: DependencyRole) -> AppResult<()> {
        let dependency = match role {
            DependencyRole::PersistentStore => &self.store,
            DependencyRole::Cache => &self.cache,
        };
        let name = dependency.name().to_string();

        print_step_start(step, &format!("Initializing {} ({})", role.label(), name));
        info!("🔌 {} 초기화 시작: {}", role.label(), name);

        match dependency.initialize().await {
            Ok(()) => {
                self.set_dependency_state(role, DependencyState::Ready);
                print_sub_task(&name, "✓ Ready");
                print_step_complete(step, &format!("{} ready", role.label()), 1);
                Ok(())
            }
            Err(e) => {
                self.set_dependency_state(role, DependencyState::Failed);
                print_sub_task(&name, "✗ Failed");
                print_step_failed(step, &format!("{} initialization failed", role.label()));
                Err(into_initialization_error(&name, e))
            }
        }
    }

    /// 모든 서비스를 지역 묶음으로 생성합니다. 하나라도 실패하면 아무것도 남기지 않습니다.
    fn construct_services(&self) -> AppResult<ServiceSet> {
        let translation = (self.constructors.translation)()
            .map_err(|e| into_initialization_error(ServiceKind::Translation.as_str(), e))?;
        print_sub_task(ServiceKind::Translation.as_str(), translation.name());

        let ocr = (self.constructors.ocr)()
            .map_err(|e| into_initialization_error(ServiceKind::Ocr.as_str(), e))?;
        print_sub_task(ServiceKind::Ocr.as_str(), ocr.name());

        Ok(ServiceSet { translation, ocr })
    }

    /// 레지스트리를 비우고 `Stopped`로 전이합니다. 실패하지 않습니다.
    ///
    /// 시작에 실패한 경우 상태는 `Failed`로 유지됩니다.
    pub async fn shutdown(&self) {
        let previous = self.state();

        if previous == LifecycleState::Stopped {
            info!("이미 종료된 상태입니다");
            return;
        }

        if previous != LifecycleState::Failed {
            self.set_state(LifecycleState::Draining);
        }
        info!("🛑 서비스 종료 시작 (이전 상태: {})", previous);

        let released = self.registry.clear();
        info!("🧹 도메인 서비스 {}개 해제", released);

        if previous != LifecycleState::Failed {
            self.set_state(LifecycleState::Stopped);
        }
        info!("✅ 서비스 종료 완료 (상태: {})", self.state());
    }

    fn set_state(&self, next: LifecycleState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn set_dependency_state(&self, role: DependencyRole, next: DependencyState) {
        let mut states = self.dependencies.lock().unwrap_or_else(PoisonError::into_inner);
        match role {
            DependencyRole::PersistentStore => states.store = next,
            DependencyRole::Cache => states.cache = next,
        }
    }
}

fn into_initialization_error(component: &str, error: AppError) -> AppError {
    match error {
        AppError::InitializationError { .. } => error,
        other => AppError::initialization(component, other),
    }
}
