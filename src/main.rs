use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};

use cekviral::config::Config;
use cekviral::db::{self, HistoryStore};
use cekviral::extract::fetch::HttpPageFetcher;
use cekviral::extract::media::YtDlpDownloader;
use cekviral::extract::speech::GoogleSpeechRecognizer;
use cekviral::extract::storage::GcsObjectStore;
use cekviral::extract::transcribe::CloudTranscriber;
use cekviral::inference::InferenceEngine;
use cekviral::pipeline::Verifier;

/// CekViral: hoax verification for viral Indonesian content.
///
/// Classifies free text, news articles and short videos as HOAX, FAKTA or
/// BELUM DIVERIFIKASI with a fine-tuned language model.
#[derive(Parser)]
#[command(name = "cekviral", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the history database
    Init,

    /// Verify a piece of text or a URL
    Verify {
        /// The text, article URL or video URL to verify
        content: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a URL would be routed
    Classify {
        /// The URL to classify
        url: String,
    },

    /// Show the normalized form of a text, as the classifier sees it
    Normalize {
        /// The text to normalize
        text: String,
    },

    /// Download the hoax classifier (model.onnx + tokenizer.json)
    DownloadModel,

    /// List recently saved verifications
    History {
        /// Number of entries to show
        #[arg(long, default_value = "10")]
        limit: u32,
    },

    /// Show system status (DB stats, model files, video tools)
    Status,

    /// Run the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Issue an API bearer token for a user
    #[cfg(feature = "web")]
    Token {
        /// User id the token identifies
        user: String,

        /// Token lifetime in hours
        #[arg(long, default_value_t = cekviral::web::auth::TOKEN_TTL_SECS / 3600)]
        ttl_hours: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cekviral=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing CekViral history store...");
            let config = Config::load()?;
            init_database(&config).await?;
            println!("\nCekViral is ready. Next step: set up your .env file");
            println!("  (see .env.example for the available variables)");
            println!("\nThen run: cekviral download-model");
        }

        Commands::Verify { content, json } => {
            let config = Config::load()?;
            let history = db::open_store(&config).await?;
            let verifier = build_verifier(&config, history)?;

            let result = verifier.verify(&content, None).await;
            verifier.flush_pending().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                cekviral::output::terminal::display_result(&result);
            }
        }

        Commands::Classify { url } => {
            if cekviral::classify::is_url(&url) {
                let category = cekviral::classify::classify(&url);
                println!("{} → {}", url, category.to_string().bold());
            } else {
                println!("Not a URL; it would be verified as plain text.");
            }
        }

        Commands::Normalize { text } => {
            let normalized = cekviral::normalize::normalize(&text);
            if normalized.is_empty() {
                println!("{}", "(nothing left after normalization)".dimmed());
            } else {
                println!("{normalized}");
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            config.require_model_url()?;
            let model_dir = &config.model_dir;

            println!("Downloading hoax classifier...");
            println!("  Destination: {}", model_dir.display());

            cekviral::inference::download::download_model(model_dir, &config.model_url).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `cekviral verify \"<text or URL>\"`.");
        }

        Commands::History { limit } => {
            let config = Config::load()?;
            let history = db::open_store(&config).await?;
            let records = history.recent(None, limit).await?;
            cekviral::output::terminal::display_history(&records);
        }

        Commands::Status => {
            let config = Config::load()?;
            let history = db::open_store(&config).await?;
            cekviral::status::show(&config, &history).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let history = db::open_store(&config).await?;
            let verifier = Arc::new(build_verifier(&config, Arc::clone(&history))?);
            cekviral::web::run_server(config, verifier, history, port, &bind).await?;
        }

        #[cfg(feature = "web")]
        Commands::Token { user, ttl_hours } => {
            let config = Config::load()?;
            if config.token_secret.is_empty() {
                anyhow::bail!(
                    "CEKVIRAL_TOKEN_SECRET not set. Tokens are only checked when a secret is configured."
                );
            }
            let ttl = cekviral::web::auth::ttl_from_hours(ttl_hours);
            let token = cekviral::web::auth::create_token(&config.token_secret, &user, ttl);
            println!("{token}");
        }
    }

    Ok(())
}

/// Wire the production collaborators into a Verifier. Missing model files
/// or cloud credentials degrade the pipeline instead of stopping it.
fn build_verifier(config: &Config, history: Arc<dyn HistoryStore>) -> Result<Verifier> {
    let engine = Arc::new(InferenceEngine::initialize(&config.model_dir));
    if !engine.is_ready() {
        warn!("Hoax classifier unavailable; run `cekviral download-model`");
    }
    if let Err(e) = config.require_transcription() {
        warn!("{e}");
    }

    let fetcher = Arc::new(HttpPageFetcher::new()?);
    let store = Arc::new(GcsObjectStore::new(
        &config.audio_bucket,
        &config.gcp_access_token,
    )?);
    let recognizer = Arc::new(GoogleSpeechRecognizer::new(
        &config.gcp_access_token,
        &config.speech_language,
    )?);
    let transcriber = Arc::new(CloudTranscriber::new(
        Arc::new(YtDlpDownloader::default()),
        store,
        recognizer,
        config.temp_dir.clone(),
    ));

    Ok(Verifier::new(engine, fetcher, transcriber, history))
}

/// Create the history store and report what was set up.
async fn init_database(config: &Config) -> Result<()> {
    #[cfg(feature = "sqlite")]
    if !db::wants_postgres(config) {
        let store = db::open_sqlite(&config.db_path)?;
        println!("Database initialized at: {}", config.db_path);
        println!("Tables created: {}", store.table_count().await?);
        return Ok(());
    }

    let history = db::open_store(config).await?;
    println!(
        "History store ready ({} saved verifications)",
        history.count().await?
    );
    Ok(())
}
