//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//! - axum 추출자 거부(rejection) → `AppError::Validation` 변환
//!
//! 어떤 에러도 프로세스를 죽이지 않습니다. 클라이언트는 언제든 같은 요청을
//! 다시 시도할 수 있으며, 서버는 스스로 재시도하지 않습니다.

use crate::services::{gateway::GatewayError, practice::PracticeError};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 에러 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 예문 쌍이나 연습 세션이 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 입력 — 클라이언트가 고쳐서 다시 보낼 수 있음 (HTTP 400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 예문 생성/번역 서비스가 쓸 수 있는 결과를 주지 못함 (HTTP 502)
    /// #[from]: `?` 연산자로 GatewayError를 AppError로 자동 변환합니다.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// 연습 세션 오용 — 빈 큐로 시작, 끝난 세션 조작 (HTTP 409)
    #[error(transparent)]
    Practice(#[from] PracticeError),

    /// 데이터베이스 오류 (HTTP 500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 마이그레이션 실패 (시작 시점)
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::Gateway(ref e) => {
                // 클라이언트에는 단계 메시지만, 원인(상태 코드, 응답 본문)은 로그에만
                tracing::warn!(cause = %e.cause(), "Gateway error: {}", e);
                let code = match e {
                    GatewayError::Generation(_) => "generation_error",
                    GatewayError::Translation(_) => "translation_error",
                };
                (StatusCode::BAD_GATEWAY, code, e.to_string())
            }
            AppError::Practice(ref e) => {
                let code = match e {
                    PracticeError::EmptyQueue => "empty_queue",
                    PracticeError::SessionEnded => "session_ended",
                };
                (StatusCode::CONFLICT, code, e.to_string())
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

// ── axum 추출자 거부 변환 ──
// 핸들러가 `Result<Json<T>, JsonRejection>`을 받으면, 잘못된 JSON이나
// 타입이 맞지 않는 필드(예: isChecked에 문자열)를 직접 처리할 수 있습니다.
// 아래 From 구현 덕분에 `payload?`만으로 400 validation_error 응답이 됩니다.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
