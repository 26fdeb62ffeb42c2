//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `OPENAI_API_KEY`: 예문 생성/번역 API 키 (필수)
//! - `LLM_MODEL`: 사용할 모델 이름 (기본값: gpt-4)
//! - `LLM_API_ENDPOINT`: OpenAI 호환 API 주소 (기본값: https://api.openai.com/v1)
//! - `LLM_TIMEOUT_SECS`: API 호출 타임아웃 초 (기본값: 60)
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리 (기본값: ../frontend/dist)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

use crate::services::GatewayConfig;
use std::{env, time::Duration};

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `main`에서 각 구성요소에 나눠 줍니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/reibun.db?mode=rwc")
    pub database_url: String,
    /// Chat Completions API 키
    pub openai_api_key: String,
    /// 모델 이름
    pub llm_model: String,
    /// API 베이스 주소 (`/chat/completions`가 뒤에 붙습니다)
    pub llm_api_endpoint: String,
    /// API 호출 타임아웃 (초)
    pub llm_timeout_secs: u64,
    /// 정적 파일로 서빙할 프론트엔드 빌드 디렉토리
    pub frontend_dist: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `OPENAI_API_KEY`는 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            openai_api_key: env::var("OPENAI_API_KEY")?,
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            llm_api_endpoint: env::var("LLM_API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            // 숫자 설정은 파싱 실패 시에도 기본값을 사용합니다
            llm_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            frontend_dist: env::var("FRONTEND_DIST")
                .unwrap_or_else(|_| "../frontend/dist".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }

    /// 게이트웨이 구성에 필요한 부분만 떼어 냅니다.
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            api_key: self.openai_api_key.clone(),
            model: self.llm_model.clone(),
            api_endpoint: self.llm_api_endpoint.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}
