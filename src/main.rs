//! # reibun 웹 서버 진입점
//!
//! 영어 단어나 일본어 문장으로 예문 쌍을 만들고, 플래시카드로 복습하는
//! 언어 학습 앱의 백엔드입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션
//! 4. 저장소/게이트웨이를 만들어 서비스에 주입
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use axum::Router;
use config::Config;
use db::SqliteStore;
use routes::AppState;
use services::{OpenAiGateway, PracticeManager, SentenceService};
use std::{path::Path, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 reibun, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reibun=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting reibun server on {}:{}", config.host, config.port);

    // ── 4단계: 데이터베이스 연결 + 마이그레이션 ──
    let pool = db::connect(&config.database_url, 5).await?;

    // ── 5단계: 협력자 생성과 주입 ──
    // 전역 클라이언트 대신 여기서 한 번 만들어 서비스에 넘겨줍니다.
    let store = Arc::new(SqliteStore::new(pool));
    let gateway = Arc::new(OpenAiGateway::new(config.gateway())?);
    tracing::info!(model = %config.llm_model, "Sentence gateway ready");

    let state = AppState {
        sentences: SentenceService::new(store, gateway),
        practice: PracticeManager::default(),
    };

    let api_routes = routes::api_router(state);

    // ── 6단계: CORS 미들웨어 설정 ──
    // 개발 환경에서는 Any(모두 허용)로 설정합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 7단계: 프론트엔드 정적 파일 서빙 설정 ──
    // SPA이므로, 찾을 수 없는 경로는 index.html로 돌려보냅니다.
    let frontend_dist = Path::new(&config.frontend_dist);
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);

        let serve_dir = ServeDir::new(frontend_dist)
            .not_found_service(ServeFile::new(frontend_dist.join("index.html")));

        Router::new()
            .nest("/api/v1", api_routes)
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");

        Router::new()
            .nest("/api/v1", api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
