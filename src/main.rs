//! AMR Steward - educational chat about antimicrobial resistance
//!
//! Serves a chat transcript that mixes free-form questions answered by an
//! LLM with a scripted quiz and an FAQ browser.

mod api;
mod content;
mod faq;
mod llm;
mod quiz;
mod runtime;
mod state_machine;
mod system_prompt;
mod transcript;

use api::{create_router, AppState};
use llm::LlmConfig;
use runtime::{LlmChatSession, UninitializedBackend};
use state_machine::{ChatContext, QuizPacing};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amr_steward=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("AMR_STEWARD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let pacing = quiz_pacing(std::env::var("AMR_STEWARD_QUIZ_PACING_MS").ok().as_deref());
    let context = ChatContext::new(pacing);

    // Backend session, created once
    let llm_config = LlmConfig::from_env();
    let chat = match llm::connect(&llm_config)? {
        Some(service) => {
            tracing::info!(model = %service.model_id(), gateway = llm_config.gateway.is_some(), "Chat session initialized");
            let session = LlmChatSession::new(service, system_prompt::SYSTEM_INSTRUCTION);
            runtime::spawn(context, Arc::new(session))
        }
        None => {
            tracing::warn!("No API key configured. Set GEMINI_API_KEY or LLM_GATEWAY.");
            runtime::spawn(context, Arc::new(UninitializedBackend))
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("AMR Steward listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `0` disables delays; any other value replaces the 500ms base step
fn quiz_pacing(raw: Option<&str>) -> QuizPacing {
    match raw.and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(0) => QuizPacing::immediate(),
        Some(ms) => QuizPacing::from_unit(Duration::from_millis(ms)),
        None => QuizPacing::default(),
    }
}
