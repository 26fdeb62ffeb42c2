//! # 연습 세션 응답/요청 모델
//!
//! 연습 세션 자체(`PracticeSession`)는 서버 메모리에만 존재하며
//! `services::practice`에 정의되어 있습니다.
//! 이 모듈은 클라이언트와 주고받는 형태만 정의합니다.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 연습 시작 요청 — `POST /api/v1/practice`
///
/// 본문의 `includeChecked`가 없으면 체크되지 않은 문장만으로 큐를 만듭니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartPracticeRequest {
    #[serde(default)]
    pub include_checked: bool,
}

/// 현재 카드 — 정답(영어)은 공개(reveal)된 뒤에만 포함됩니다.
///
/// `skip_serializing_if`: `english`가 None이면 JSON에서 필드 자체를 생략합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeCard {
    pub id: i64,
    pub japanese: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    pub is_checked: bool,
}

/// 연습 세션의 현재 상태 스냅샷
///
/// 화면의 "Card {position + 1} of {total}" 표시에 필요한 정보를 모두 담습니다.
/// 세션이 끝났거나 큐가 비었으면 `card`는 None입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeView {
    pub session_id: Uuid,
    pub position: usize,
    pub total: usize,
    pub revealed: bool,
    pub ended: bool,
    pub card: Option<PracticeCard>,
}

/// `advance()`의 결과
///
/// JSON에서는 `"continuing"` / `"sessionEnded"` 문자열로 표현됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Advance {
    /// 다음 카드로 이동함
    Continuing,
    /// 마지막 카드였으므로 세션이 끝남 (위치는 그대로)
    SessionEnded,
}

/// `POST /api/v1/practice/{id}/advance` 응답
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceResponse {
    pub outcome: Advance,
    pub view: PracticeView,
}
