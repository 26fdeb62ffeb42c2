//! # 예문 쌍 데이터베이스 쿼리 모듈
//!
//! `sentence_pairs` 테이블의 CRUD 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.
//!
//! ## 테이블 구조
//! - `id`: INTEGER PRIMARY KEY AUTOINCREMENT — 삭제된 번호는 재사용되지 않음
//! - `japanese`, `english`: 비어 있을 수 없는 TEXT (CHECK 제약)
//! - `is_checked`: 연습 완료 표시 (0/1)
//! - `created_at`: DB 기본값으로 채워지는 생성 시각

use crate::error::AppError;
use crate::models::{NewSentencePair, SentencePair};
use sqlx::SqlitePool;

/// 모든 조회 쿼리가 공유하는 컬럼 목록
const COLUMNS: &str = "id, japanese, english, is_checked, created_at";

/// 예문 쌍 목록을 최신순으로 조회합니다.
///
/// `include_checked`가 false면 `is_checked = 0`인 행만 가져옵니다.
/// 같은 밀리초에 생성된 행은 `id DESC`로 순서를 고정합니다.
pub async fn list_sentences(
    pool: &SqlitePool,
    include_checked: bool,
) -> Result<Vec<SentencePair>, AppError> {
    // 필터는 두 가지뿐이므로 동적 쿼리 빌딩 대신 고정된 SQL 두 개를 사용합니다
    let sql = if include_checked {
        format!("SELECT {COLUMNS} FROM sentence_pairs ORDER BY created_at DESC, id DESC")
    } else {
        format!(
            "SELECT {COLUMNS} FROM sentence_pairs WHERE is_checked = 0 \
             ORDER BY created_at DESC, id DESC"
        )
    };

    let sentences = sqlx::query_as::<_, SentencePair>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(sentences)
}

/// ID로 예문 쌍 하나를 조회합니다.
///
/// `fetch_optional`: 0행이면 None, 1행이면 Some을 반환합니다.
pub async fn get_sentence(pool: &SqlitePool, id: i64) -> Result<Option<SentencePair>, AppError> {
    let sentence = sqlx::query_as::<_, SentencePair>(&format!(
        "SELECT {COLUMNS} FROM sentence_pairs WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(sentence)
}

/// 새 예문 쌍을 저장하고 저장된 행을 반환합니다.
///
/// ## 처리 흐름
/// 1. INSERT — `is_checked`와 `created_at`은 DB 기본값이 채웁니다
/// 2. `last_insert_rowid()`로 SQLite가 부여한 ID를 얻습니다
/// 3. 방금 저장한 행을 다시 조회하여 반환 (기본값이 적용된 완전한 데이터)
///
/// ID 부여는 SQLite가 쓰기 잠금 안에서 처리하므로 동시 생성에서도 중복되지 않습니다.
pub async fn create_sentence(
    pool: &SqlitePool,
    pair: &NewSentencePair,
) -> Result<SentencePair, AppError> {
    let result = sqlx::query("INSERT INTO sentence_pairs (japanese, english) VALUES (?, ?)")
        .bind(pair.japanese())
        .bind(pair.english())
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_sentence(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created sentence".to_string()))
}

/// 연습 완료 표시를 변경합니다.
///
/// ## 반환값
/// - `Ok(Some(SentencePair))`: 변경 성공, 최신 상태 반환
/// - `Ok(None)`: 해당 ID의 예문이 없음 → 라우트에서 404 처리
pub async fn set_sentence_checked(
    pool: &SqlitePool,
    id: i64,
    is_checked: bool,
) -> Result<Option<SentencePair>, AppError> {
    let result = sqlx::query("UPDATE sentence_pairs SET is_checked = ? WHERE id = ?")
        .bind(is_checked)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_sentence(pool, id).await
}

/// ID로 예문 쌍을 영구 삭제합니다.
///
/// ## 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 예문이 없어 삭제된 행이 없음
pub async fn delete_sentence(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM sentence_pairs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, test_support::memory_pool};
    use std::collections::HashSet;

    fn pair(japanese: &str, english: &str) -> NewSentencePair {
        NewSentencePair::new(japanese, english).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_defaults() {
        let pool = memory_pool().await;

        let first = create_sentence(&pool, &pair("こんにちは", "Hello")).await.unwrap();
        let second = create_sentence(&pool, &pair("ありがとう", "Thank you")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(!first.is_checked);
        assert!(first.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filters_checked() {
        let pool = memory_pool().await;
        let older = create_sentence(&pool, &pair("一", "One")).await.unwrap();
        let newer = create_sentence(&pool, &pair("二", "Two")).await.unwrap();

        let all = list_sentences(&pool, true).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);

        set_sentence_checked(&pool, newer.id, true).await.unwrap();
        let unchecked = list_sentences(&pool, false).await.unwrap();
        assert_eq!(unchecked.len(), 1);
        assert_eq!(unchecked[0].id, older.id);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let pool = memory_pool().await;
        let first = create_sentence(&pool, &pair("一", "One")).await.unwrap();
        assert!(delete_sentence(&pool, first.id).await.unwrap());

        let second = create_sentence(&pool, &pair("二", "Two")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn missing_rows_report_absence() {
        let pool = memory_pool().await;
        assert!(set_sentence_checked(&pool, 42, true).await.unwrap().is_none());
        assert!(!delete_sentence(&pool, 42).await.unwrap());
        assert!(get_sentence(&pool, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn closed_pool_surfaces_database_error() {
        let pool = memory_pool().await;
        pool.close().await;

        let listed = list_sentences(&pool, true).await;
        assert!(matches!(listed, Err(AppError::Database(_))));

        let created = create_sentence(&pool, &pair("一", "One")).await;
        assert!(matches!(created, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("reibun.db").display());
        let pool = db::connect(&url, 5).await.unwrap();

        let tasks: Vec<_> = (0..40)
            .map(|n| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let new_pair = pair(&format!("文{n}"), &format!("Sentence {n}"));
                    create_sentence(&pool, &new_pair).await
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            let created = task.await.unwrap().unwrap();
            assert!(ids.insert(created.id), "duplicate id {}", created.id);
        }
        assert_eq!(ids.len(), 40);
        assert_eq!(list_sentences(&pool, true).await.unwrap().len(), 40);

        pool.close().await;
    }
}
