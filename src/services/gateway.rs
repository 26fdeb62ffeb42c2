//! # 예문 생성/번역 게이트웨이
//!
//! 외부 AI(대규모 언어 모델) 서비스를 감싸는 경계입니다.
//! 서비스 계층은 `Gateway` 트레이트만 알고, 실제 구현은 `main`에서 주입됩니다.
//!
//! - `OpenAiGateway`: OpenAI 호환 Chat Completions API (`POST {endpoint}/chat/completions`)
//! - 테스트에서는 가짜 구현을 주입합니다
//!
//! 호출은 한 번의 왕복으로 끝나며 재시도하지 않습니다.
//! 실패는 `GatewayError`로 호출자에게 전달되고, 실제 원인(`CompletionError`)은
//! `source()` 체인으로 남습니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// 번역 언어
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Japanese,
    English,
}

impl Language {
    /// 프롬프트에 들어가는 언어 이름
    pub fn name(self) -> &'static str {
        match self {
            Language::Japanese => "Japanese",
            Language::English => "English",
        }
    }
}

/// 한 번의 완성(completion) 호출이 실패한 원인
#[derive(Debug, Error)]
pub enum CompletionError {
    /// 연결 실패, 타임아웃 등 전송 단계 오류
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 2xx가 아닌 응답. 본문은 운영자 진단용으로 그대로 보관합니다.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// 응답 본문이 Chat Completions 형식이 아님
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// 선택지가 없거나 본문이 공백뿐
    #[error("empty completion")]
    EmptyChoices,
}

/// 게이트웨이 실패. 어느 단계에서 실패했는지 구분하고 원인을 감쌉니다.
///
/// `Display`는 단계만 말하고, 원인은 `source()`로 꺼냅니다.
/// 클라이언트 응답에는 단계 메시지만 나가고 원인은 로그에만 남습니다.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 예문 생성 결과가 없거나 쓸 수 없음
    #[error("Failed to generate sentence")]
    Generation(#[source] CompletionError),

    /// 번역 결과가 없거나 쓸 수 없음
    #[error("Translation failed")]
    Translation(#[source] CompletionError),
}

impl GatewayError {
    /// 실패 원인
    pub fn cause(&self) -> &CompletionError {
        match self {
            GatewayError::Generation(cause) | GatewayError::Translation(cause) => cause,
        }
    }
}

/// 예문 생성/번역 협력자
#[async_trait]
pub trait Gateway: Send + Sync {
    /// 주어진 영어 단어/구를 사용한 자연스러운 영어 예문 한 문장을 만듭니다.
    async fn generate_example_sentence(&self, word: &str) -> Result<String, GatewayError>;

    /// `text`를 `source` 언어에서 `target` 언어로 번역합니다.
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, GatewayError>;
}

// ── OpenAI 호환 구현 ──

const GENERATION_PROMPT: &str = "You are a helpful English teacher. Create ONE natural, \
conversational English sentence that uses the given word or phrase. The sentence should be \
an example of how the word is commonly used in real conversation or speech. \
Return ONLY the sentence, nothing else.";

const GENERATION_TEMPERATURE: f32 = 0.7;
const TRANSLATION_TEMPERATURE: f32 = 0.3;

/// 게이트웨이 설정 (`Config`에서 만들어집니다)
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub api_endpoint: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// 첫 번째 선택지의 본문을 다듬어 꺼냅니다. 공백뿐이면 None.
    fn first_content(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// OpenAI 호환 Chat Completions 게이트웨이
///
/// `reqwest::Client`는 내부적으로 연결 풀을 공유하므로 한 번 만들어 재사용합니다.
#[derive(Clone)]
pub struct OpenAiGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl OpenAiGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// 시스템 프롬프트 + 사용자 입력으로 한 번 완성(completion)을 요청합니다.
    ///
    /// 전송 실패, 비정상 HTTP 상태, 해석할 수 없는 본문, 빈 응답을
    /// `CompletionError`로 돌려주며 호출자가 단계에 맞는 `GatewayError`로 감쌉니다.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_endpoint.trim_end_matches('/')
        );
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::HttpStatus { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;

        parsed.first_content().ok_or(CompletionError::EmptyChoices)
    }
}

/// 번역용 시스템 프롬프트
fn translation_prompt(source: Language, target: Language) -> String {
    format!(
        "You are a professional translator. Translate the following {} sentence into \
         natural, conversational {}. Only respond with the {} translation, nothing else.",
        source.name(),
        target.name(),
        target.name()
    )
}

#[async_trait]
impl Gateway for OpenAiGateway {
    async fn generate_example_sentence(&self, word: &str) -> Result<String, GatewayError> {
        tracing::debug!(word, "Generating example sentence");
        self.complete(GENERATION_PROMPT, word, GENERATION_TEMPERATURE)
            .await
            .map_err(GatewayError::Generation)
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, GatewayError> {
        tracing::debug!(
            source = source.name(),
            target = target.name(),
            "Translating sentence"
        );
        let prompt = translation_prompt(source, target);
        self.complete(&prompt, text, TRANSLATION_TEMPERATURE)
            .await
            .map_err(GatewayError::Translation)
    }
}
