//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok", "database": "ok" }`
//!
//! 데이터베이스에 닿지 못하면 503과 함께 `"status": "degraded"`를 반환합니다.
//! 외부 AI 게이트웨이는 호출 비용이 있으므로 확인하지 않습니다.

use crate::routes::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 저장소 상태를 확인합니다.
///
/// 실패해도 에러 응답이 아니라 상태 본문을 돌려주므로 `Result`를 쓰지 않습니다.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.sentences.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unreachable" })),
            )
        }
    }
}
