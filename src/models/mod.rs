//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `sentence`: 예문 쌍(SentencePair)과 관련 요청 구조체
//! - `practice`: 연습 세션의 요청/응답 구조체
//!
//! `pub use X::*;`로 재공개하여 `crate::models::SentencePair`처럼 짧게 접근합니다.

pub mod practice;
pub mod sentence;

pub use practice::*;
pub use sentence::*;
