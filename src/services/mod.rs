//! # 비즈니스 로직 모듈
//!
//! 라우트 핸들러와 데이터베이스 계층 사이의 로직을 담당합니다.
//!
//! - `gateway`: 외부 AI 예문 생성/번역 협력자
//! - `sentences`: 예문 쌍 생성/조회/체크/삭제
//! - `practice`: 무작위 복습 큐와 연습 세션 관리

pub mod gateway;
pub mod practice;
pub mod sentences;

pub use gateway::{GatewayConfig, OpenAiGateway};
pub use practice::PracticeManager;
pub use sentences::SentenceService;
