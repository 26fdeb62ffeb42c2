//! # 예문 쌍 서비스
//!
//! 저장소(`SentenceStore`)와 게이트웨이(`Gateway`)를 묶어 예문 쌍의 생애주기를 관리합니다.
//!
//! ## 생성 흐름
//! ```text
//! 직접 생성:   {japanese, english} ──────────────────────────────→ 저장
//! 생성 흐름:   word → [생성] 영어 예문 → [번역 en→ja] 일본어 ──→ 저장
//! 번역 흐름:   japanese → [번역 ja→en] 영어 ───────────────────→ 저장
//! ```
//!
//! 게이트웨이가 실패하면 아무것도 저장하지 않고 에러를 그대로 돌려줍니다.

use crate::{
    db::SentenceStore,
    error::AppError,
    models::{GeneratedSentence, NewSentencePair, SentencePair},
    services::gateway::{Gateway, Language},
};
use std::sync::Arc;

/// 예문 쌍 서비스
///
/// `Arc<dyn Trait>`: 구체 타입을 숨긴 채 여러 핸들러가 같은 구현을 공유합니다.
/// clone은 Arc 참조 카운트만 올리므로 가볍습니다.
#[derive(Clone)]
pub struct SentenceService {
    store: Arc<dyn SentenceStore>,
    gateway: Arc<dyn Gateway>,
}

impl SentenceService {
    pub fn new(store: Arc<dyn SentenceStore>, gateway: Arc<dyn Gateway>) -> Self {
        Self { store, gateway }
    }

    /// 예문 쌍을 그대로 저장합니다.
    ///
    /// 어느 한쪽이라도 비어 있으면 `Validation` 에러를 반환합니다.
    pub async fn create(&self, japanese: &str, english: &str) -> Result<SentencePair, AppError> {
        let pair = NewSentencePair::new(japanese, english).map_err(AppError::Validation)?;
        let stored = self.store.insert(&pair).await?;
        tracing::info!(id = stored.id, "Stored sentence pair");
        Ok(stored)
    }

    /// 예문 쌍 목록 (최신순)
    pub async fn list(&self, include_checked: bool) -> Result<Vec<SentencePair>, AppError> {
        self.store.list(include_checked).await
    }

    /// 연습 완료 표시를 바꾸고 변경된 예문 쌍을 반환합니다.
    pub async fn set_checked(&self, id: i64, value: bool) -> Result<SentencePair, AppError> {
        let updated = self
            .store
            .set_checked(id, value)
            .await?
            .ok_or(AppError::NotFound)?;
        tracing::debug!(id, is_checked = value, "Updated checked flag");
        Ok(updated)
    }

    /// 예문 쌍을 영구 삭제합니다. 없는 ID면 `NotFound`.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(id, "Deleted sentence pair");
        Ok(())
    }

    /// 저장소 연결 확인
    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    /// 영어 단어/구로 예문을 만들고 일본어로 번역해 저장합니다.
    pub async fn create_from_generation(&self, word: &str) -> Result<GeneratedSentence, AppError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AppError::Validation(
                "English word or phrase is required".to_string(),
            ));
        }

        let english = self.gateway.generate_example_sentence(word).await?;
        let japanese = self
            .gateway
            .translate(&english, Language::English, Language::Japanese)
            .await?;

        let pair = self.create(&japanese, &english).await?;
        Ok(GeneratedSentence {
            pair,
            word: word.to_string(),
        })
    }

    /// 일본어 문장을 영어로 번역해 저장합니다.
    pub async fn create_from_translation(&self, japanese: &str) -> Result<SentencePair, AppError> {
        let japanese = japanese.trim();
        if japanese.is_empty() {
            return Err(AppError::Validation("Japanese text is required".to_string()));
        }

        let english = self
            .gateway
            .translate(japanese, Language::Japanese, Language::English)
            .await?;

        self.create(japanese, &english).await
    }
}
