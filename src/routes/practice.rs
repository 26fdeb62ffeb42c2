//! # 연습 세션 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/v1/practice | `start_practice` | 목록 스냅샷으로 세션 시작 |
//! | GET | /api/v1/practice/{id} | `get_practice` | 현재 카드 |
//! | POST | /api/v1/practice/{id}/reveal | `reveal_answer` | 정답 공개 |
//! | POST | /api/v1/practice/{id}/advance | `advance_practice` | 다음 카드 |
//! | DELETE | /api/v1/practice/{id} | `exit_practice` | 연습 종료 (세션 폐기) |
//!
//! ## 사용 흐름
//! ```text
//! 1. POST /practice { includeChecked } → 첫 카드 (일본어만)
//! 2. POST /practice/{id}/reveal       → 영어 정답 포함
//! 3. PATCH /sentences/{cardId}        → (선택) 연습 완료 표시
//! 4. POST /practice/{id}/advance      → continuing / sessionEnded
//! 5. DELETE /practice/{id}            → 종료
//! ```

use crate::{error::AppError, models::*, routes::AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

/// 현재 목록으로 연습 세션을 시작합니다.
///
/// JSON 본문이 없으면(Content-Type 없음) 체크되지 않은 문장만 사용합니다.
/// 목록 조회는 세션 레지스트리 잠금 안에서 실행되므로, 조회 직후에 끝난
/// 삭제/체크 변경도 새 세션에 반영됩니다.
pub async fn start_practice(
    State(state): State<AppState>,
    payload: Result<Option<Json<StartPracticeRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<PracticeView>), AppError> {
    let req = payload?.map(|Json(req)| req).unwrap_or_default();

    let sentences = state.sentences.list(req.include_checked);
    let view = state.practice.start(sentences).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_practice(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PracticeView>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.practice.view(id).await?))
}

pub async fn reveal_answer(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PracticeView>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.practice.reveal(id).await?))
}

/// 다음 카드로 넘어갑니다.
///
/// 마지막 카드에서 호출하면 `{ "outcome": "sessionEnded", ... }`를 반환합니다.
/// 이 경우에도 200이며, 세션은 exit 전까지 조회할 수 있습니다.
pub async fn advance_practice(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AdvanceResponse>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.practice.advance(id).await?))
}

pub async fn exit_practice(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.practice.exit(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
