//! # 예문 쌍(SentencePair) 모델 정의
//!
//! 일본어/영어 예문 쌍과 관련 요청 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `SentencePair`: DB에 저장된 예문 쌍 (응답용)
//! - `NewSentencePair`: 검증을 통과한 저장 직전의 예문 쌍
//! - `CreateSentenceRequest`: 예문 쌍을 직접 저장할 때의 JSON 본문
//! - `GenerateSentenceRequest`: 영어 단어로 예문을 생성할 때의 JSON 본문
//! - `TranslateSentenceRequest`: 일본어 문장을 번역해 저장할 때의 JSON 본문
//! - `SetCheckedRequest`: 연습 완료 표시를 바꿀 때의 JSON 본문
//! - `ListSentencesQuery`: 목록 조회 쿼리 문자열
//!
//! API의 JSON 필드명은 camelCase(`isChecked`, `createdAt`)입니다.
//! `#[serde(rename_all = "camelCase")]`가 Rust의 snake_case 필드명을 변환합니다.

use serde::{Deserialize, Serialize};

/// 예문 쌍 엔티티 — DB의 `sentence_pairs` 테이블 한 행(row)에 대응합니다.
///
/// `sqlx::FromRow`는 Rust 필드명(snake_case) 그대로 컬럼을 찾고,
/// serde는 camelCase로 직렬화하므로 DB와 API 이름이 각자 자연스럽게 유지됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SentencePair {
    /// 저장소가 부여하는 정수 ID (재사용되지 않음)
    pub id: i64,
    /// 일본어 문장
    pub japanese: String,
    /// 영어 문장
    pub english: String,
    /// 연습 완료(체크) 여부 — SQLite INTEGER(0/1)가 bool로 매핑됩니다
    pub is_checked: bool,
    /// 생성 시각 (ISO 8601, 예: "2026-10-19T12:00:00.000Z")
    pub created_at: String,
}

/// 저장 직전의 예문 쌍
///
/// `new()`를 거쳐야만 만들 수 있으므로, 이 타입의 값은 항상
/// 양쪽 문장이 비어 있지 않다는 것이 보장됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSentencePair {
    japanese: String,
    english: String,
}

impl NewSentencePair {
    /// 앞뒤 공백을 제거하고 빈 문장을 거부합니다.
    ///
    /// 실패 시 어떤 필드가 비었는지 담은 메시지를 반환합니다.
    pub fn new(japanese: &str, english: &str) -> Result<Self, String> {
        let japanese = japanese.trim();
        let english = english.trim();
        if japanese.is_empty() {
            return Err("japanese must not be empty".to_string());
        }
        if english.is_empty() {
            return Err("english must not be empty".to_string());
        }
        Ok(Self {
            japanese: japanese.to_string(),
            english: english.to_string(),
        })
    }

    pub fn japanese(&self) -> &str {
        &self.japanese
    }

    pub fn english(&self) -> &str {
        &self.english
    }
}

/// 예문 쌍 직접 생성 요청 — `POST /api/v1/sentences`
#[derive(Debug, Deserialize)]
pub struct CreateSentenceRequest {
    pub japanese: String,
    pub english: String,
}

/// 영어 단어/구로 예문 생성 요청 — `POST /api/v1/sentences/generate`
///
/// 예: `{ "word": "break the ice" }`
#[derive(Debug, Deserialize)]
pub struct GenerateSentenceRequest {
    /// 예문에 사용할 영어 단어 또는 구
    pub word: String,
}

/// 일본어 문장 번역 요청 — `POST /api/v1/sentences/translate`
#[derive(Debug, Deserialize)]
pub struct TranslateSentenceRequest {
    /// 음성 인식이나 키보드로 입력된 일본어 문장
    pub japanese: String,
}

/// 생성 흐름의 응답 — 저장된 예문 쌍에 입력 단어를 덧붙입니다.
///
/// `#[serde(flatten)]`: 내부 구조체의 필드를 같은 JSON 객체 레벨로 펼칩니다.
/// 결과: `{ "id": 1, "japanese": "...", ..., "word": "break the ice" }`
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedSentence {
    #[serde(flatten)]
    pub pair: SentencePair,
    pub word: String,
}

/// 체크 상태 변경 요청 — `PATCH /api/v1/sentences/{id}`
///
/// `{ "isChecked": true }` — 문자열 "true" 같은 잘못된 타입은 역직렬화 단계에서 거부됩니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCheckedRequest {
    pub is_checked: bool,
}

/// 목록 조회 쿼리 — `GET /api/v1/sentences?includeChecked=true`
///
/// `#[serde(default)]`: 쿼리 문자열에 값이 없으면 `false`(체크된 문장 제외)로 처리합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSentencesQuery {
    #[serde(default)]
    pub include_checked: bool,
}
