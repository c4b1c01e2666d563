// src/main.rs

use std::sync::Arc;

use axum::http::HeaderValue;
use clap::Parser;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tower_http::cors::CorsLayer;

use rehearsal::api::http::router;
use rehearsal::config::CONFIG;
use rehearsal::llm::client::OpenAiClient;
use rehearsal::retrieval::{HttpQuestionBank, HttpRetrievalClient};
use rehearsal::state::create_app_state;

#[derive(Parser, Debug)]
#[command(name = "rehearsal", about = "Mock-interview turn engine")]
struct Args {
    /// Bind host (overrides REHEARSAL_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides REHEARSAL_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level: Level = CONFIG.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting rehearsal interview engine");
    info!("Model: {}", CONFIG.model);

    let database_url = args.database_url.unwrap_or_else(|| CONFIG.database_url.clone());
    let pool = SqlitePoolOptions::new()
        .max_connections(CONFIG.sqlite_max_connections)
        .connect(&database_url)
        .await?;

    let llm = Arc::new(OpenAiClient::new()?);
    let retrieval = Arc::new(HttpRetrievalClient::new()?);
    let question_bank = Arc::new(HttpQuestionBank::new()?);

    let app_state = Arc::new(create_app_state(pool, llm, retrieval, question_bank).await?);

    let cors = CorsLayer::new()
        .allow_origin(CONFIG.cors_origin.parse::<HeaderValue>()?)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);
    let app = router(app_state).layer(cors);

    let host = args.host.unwrap_or_else(|| CONFIG.host.clone());
    let port = args.port.unwrap_or(CONFIG.port);
    let bind_address = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Listening on http://{bind_address}");
    axum::serve(listener, app).await?;

    Ok(())
}
