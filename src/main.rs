use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use interview_coach::feedback::{FeedbackService, OpenAiClient};
use interview_coach::questions::QuestionService;
use interview_coach::store::MongoStore;
use interview_coach::{create_router, AppState, Config};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "interview-coach", about = "Behavioral interview practice")]
struct Cli {
    /// Config file, without extension
    #[arg(long, default_value = "config/interview-coach")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve,
    /// Run a practice session in the terminal
    Practice,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve => serve(cfg).await,
        Command::Practice => interview_coach::interview::practice::run(&cfg).await,
    }
}

async fn serve(cfg: Config) -> Result<()> {
    info!("{} v0.1.0", cfg.service.name);

    let store = MongoStore::connect(&cfg.store.url, &cfg.store.database).await?;
    let questions = QuestionService::new(Arc::new(store), cfg.interview.questions_per_session);

    let api = OpenAiClient::new(&cfg.openai)?;
    let feedback = FeedbackService::new(Arc::new(api));

    let router = create_router(AppState::new(questions, feedback));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
