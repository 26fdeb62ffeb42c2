//! 테스트 공용 도우미: 메모리 DB, 가짜 게이트웨이, 테스트용 상태

use crate::{
    db::{self, SqliteStore},
    routes::AppState,
    services::{
        gateway::{CompletionError, Gateway, GatewayError, Language},
        practice::PracticeManager,
        sentences::SentenceService,
    },
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// 마이그레이션이 적용된 인메모리 SQLite 풀
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 1개로 제한합니다.
pub async fn memory_pool() -> SqlitePool {
    db::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database")
}

/// 입력을 그대로 변형해 돌려주는 가짜 게이트웨이
///
/// - 생성: `"Example with {word}."`
/// - 번역: `"[ja] {text}"` / `"[en] {text}"`
/// - `fail_generation`/`fail_translation`이 켜져 있으면 해당 단계에서 실패
#[derive(Default)]
pub struct FakeGateway {
    pub fail_generation: bool,
    pub fail_translation: bool,
    pub calls: AtomicUsize,
}

impl FakeGateway {
    pub fn failing_translation() -> Self {
        Self {
            fail_translation: true,
            ..Self::default()
        }
    }

    pub fn failing_generation() -> Self {
        Self {
            fail_generation: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn generate_example_sentence(&self, word: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_generation {
            return Err(GatewayError::Generation(CompletionError::EmptyChoices));
        }
        Ok(format!("Example with {word}."))
    }

    async fn translate(
        &self,
        text: &str,
        _source: Language,
        target: Language,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_translation {
            return Err(GatewayError::Translation(CompletionError::EmptyChoices));
        }
        let tag = match target {
            Language::Japanese => "ja",
            Language::English => "en",
        };
        Ok(format!("[{tag}] {text}"))
    }
}

/// 메모리 DB와 주어진 게이트웨이로 서비스를 만듭니다.
pub async fn service_with(gateway: Arc<FakeGateway>) -> SentenceService {
    let store = SqliteStore::new(memory_pool().await);
    SentenceService::new(Arc::new(store), gateway)
}

/// 라우터 테스트용 상태
pub async fn app_state() -> AppState {
    state_with_pool(memory_pool().await)
}

/// 주어진 풀 위에 가짜 게이트웨이를 얹은 상태 (닫힌 풀로 저장소 장애를 흉내 냅니다)
pub fn state_with_pool(pool: SqlitePool) -> AppState {
    let store = SqliteStore::new(pool);
    AppState {
        sentences: SentenceService::new(Arc::new(store), Arc::new(FakeGateway::default())),
        practice: PracticeManager::default(),
    }
}
