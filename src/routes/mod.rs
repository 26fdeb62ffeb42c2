//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 API 라우터를 정의합니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `sentences`: 예문 쌍 생성/조회/체크/삭제 핸들러
//! - `practice`: 연습 세션 핸들러

pub mod health;
pub mod practice;
pub mod sentences;

pub use health::*;
pub use practice::*;
pub use sentences::*;

use crate::services::{PracticeManager, SentenceService};
use axum::{
    routing::{get, patch, post},
    Router,
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// Axum의 State Extractor는 요청마다 AppState를 clone하므로,
/// 내부 필드는 모두 Arc 기반이라 clone이 가볍습니다.
#[derive(Clone)]
pub struct AppState {
    /// 예문 쌍 서비스 (저장소 + 게이트웨이)
    pub sentences: SentenceService,
    /// 진행 중인 연습 세션들
    pub practice: PracticeManager,
}

/// `/api/v1` 아래에 중첩될 API 라우터를 만듭니다.
///
/// axum 0.8의 경로 변수 문법은 `{id}`입니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // 예문 쌍 CRUD API
        .route("/sentences", get(list_sentences).post(create_sentence))
        .route("/sentences/generate", post(generate_sentence))
        .route("/sentences/translate", post(translate_sentence))
        .route(
            "/sentences/{id}",
            patch(set_sentence_checked).delete(delete_sentence),
        )
        // 연습 세션 API
        .route("/practice", post(start_practice))
        .route("/practice/{id}", get(get_practice).delete(exit_practice))
        .route("/practice/{id}/reveal", post(reveal_answer))
        .route("/practice/{id}/advance", post(advance_practice))
        // 헬스체크 API
        .route("/health", get(health_check))
        .with_state(state)
}
