//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들과, 서비스 계층이 의존하는
//! 저장소 트레이트(`SentenceStore`)를 정의합니다.
//!
//! - `sentences`: 예문 쌍 CRUD 쿼리
//!
//! 서비스는 구체적인 `SqlitePool` 대신 `Arc<dyn SentenceStore>`를 주입받습니다.
//! 전역 DB 클라이언트 없이 `main`에서 한 번 만들어 넘겨주는 구조입니다.

pub mod sentences;

pub use sentences::*;

use crate::error::AppError;
use crate::models::{NewSentencePair, SentencePair};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// 예문 쌍 저장소
///
/// `#[async_trait]`: 트레이트 메서드를 async로 선언하면서도
/// `dyn SentenceStore` 트레이트 객체로 쓸 수 있게 해줍니다.
/// `Send + Sync`: 여러 요청(스레드)이 동시에 공유할 수 있어야 합니다.
#[async_trait]
pub trait SentenceStore: Send + Sync {
    async fn insert(&self, pair: &NewSentencePair) -> Result<SentencePair, AppError>;
    async fn list(&self, include_checked: bool) -> Result<Vec<SentencePair>, AppError>;
    async fn set_checked(&self, id: i64, value: bool) -> Result<Option<SentencePair>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
    /// 저장소에 닿을 수 있는지 확인합니다 (헬스체크용).
    async fn ping(&self) -> Result<(), AppError>;
}

/// SQLite 기반 저장소
///
/// `SqlitePool`은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SentenceStore for SqliteStore {
    async fn insert(&self, pair: &NewSentencePair) -> Result<SentencePair, AppError> {
        create_sentence(&self.pool, pair).await
    }

    async fn list(&self, include_checked: bool) -> Result<Vec<SentencePair>, AppError> {
        list_sentences(&self.pool, include_checked).await
    }

    async fn set_checked(&self, id: i64, value: bool) -> Result<Option<SentencePair>, AppError> {
        set_sentence_checked(&self.pool, id, value).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        delete_sentence(&self.pool, id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// 연결 풀을 만들고 마이그레이션을 실행합니다.
///
/// `sqlx::migrate!`는 컴파일 타임에 `./migrations` 폴더의 SQL 파일을 바이너리에 포함시킵니다.
/// 아직 실행되지 않은 마이그레이션만 순서대로 실행됩니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
