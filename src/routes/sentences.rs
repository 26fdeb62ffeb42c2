//! # 예문 쌍 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/sentences?includeChecked= | `list_sentences` | 예문 목록 (최신순) |
//! | POST | /api/v1/sentences | `create_sentence` | 예문 쌍 직접 저장 |
//! | POST | /api/v1/sentences/generate | `generate_sentence` | 영어 단어 → 예문 생성 + 일본어 번역 |
//! | POST | /api/v1/sentences/translate | `translate_sentence` | 일본어 → 영어 번역 |
//! | PATCH | /api/v1/sentences/{id} | `set_sentence_checked` | 연습 완료 표시 변경 |
//! | DELETE | /api/v1/sentences/{id} | `delete_sentence` | 영구 삭제 |
//!
//! ## 추출자 거부 처리
//! `Result<Json<T>, JsonRejection>`처럼 추출자를 Result로 감싸면
//! 잘못된 JSON을 핸들러가 직접 받아 `AppError::Validation`(400)으로 돌려줍니다.
//!
//! 체크 변경과 삭제는 성공 후 진행 중인 연습 세션에도 반영됩니다.

use crate::{error::AppError, models::*, routes::AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// 예문 목록을 조회합니다.
///
/// `GET /api/v1/sentences?includeChecked=true` → `{ "sentences": [...] }`
pub async fn list_sentences(
    State(state): State<AppState>,
    query: Result<Query<ListSentencesQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let sentences = state.sentences.list(query.include_checked).await?;
    Ok(Json(json!({ "sentences": sentences })))
}

/// 예문 쌍을 그대로 저장합니다.
///
/// `POST /api/v1/sentences` + `{ "japanese": "...", "english": "..." }` → `201 Created`
pub async fn create_sentence(
    State(state): State<AppState>,
    payload: Result<Json<CreateSentenceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SentencePair>), AppError> {
    let Json(req) = payload?;
    let pair = state.sentences.create(&req.japanese, &req.english).await?;
    Ok((StatusCode::CREATED, Json(pair)))
}

/// 영어 단어/구로 예문을 생성하고 일본어로 번역해 저장합니다.
///
/// `POST /api/v1/sentences/generate` + `{ "word": "break the ice" }`
pub async fn generate_sentence(
    State(state): State<AppState>,
    payload: Result<Json<GenerateSentenceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GeneratedSentence>), AppError> {
    let Json(req) = payload?;
    let generated = state.sentences.create_from_generation(&req.word).await?;
    Ok((StatusCode::CREATED, Json(generated)))
}

/// 일본어 문장을 영어로 번역해 저장합니다.
///
/// `POST /api/v1/sentences/translate` + `{ "japanese": "..." }`
pub async fn translate_sentence(
    State(state): State<AppState>,
    payload: Result<Json<TranslateSentenceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SentencePair>), AppError> {
    let Json(req) = payload?;
    let pair = state.sentences.create_from_translation(&req.japanese).await?;
    Ok((StatusCode::CREATED, Json(pair)))
}

/// 연습 완료 표시를 변경합니다.
///
/// `PATCH /api/v1/sentences/{id}` + `{ "isChecked": true }`
///
/// `Path(id)`: URL의 `{id}`를 i64로 파싱합니다. 숫자가 아니면 400.
pub async fn set_sentence_checked(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SetCheckedRequest>, JsonRejection>,
) -> Result<Json<SentencePair>, AppError> {
    let Path(id) = id?;
    let Json(req) = payload?;

    let updated = state.sentences.set_checked(id, req.is_checked).await?;
    state.practice.apply_checked(id, updated.is_checked).await;
    Ok(Json(updated))
}

/// 예문 쌍을 영구 삭제합니다.
///
/// `DELETE /api/v1/sentences/{id}` → `204 No Content`
pub async fn delete_sentence(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.sentences.delete(id).await?;
    let affected = state.practice.remove_by_id(id).await;
    if affected > 0 {
        tracing::debug!(
            id,
            sessions = affected,
            "Removed deleted sentence from practice sessions"
        );
    }
    Ok(StatusCode::NO_CONTENT)
}
