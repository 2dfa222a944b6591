use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use askcsv::config::Config;
use askcsv::data::{CsvSource, RemoteCsvSource};
use askcsv::llm::{self, LlmProvider};
use askcsv::prompt;
use askcsv::server::{self, AppState};

#[derive(Parser)]
#[command(name = "askcsv")]
#[command(author, version, about = "Ask questions about a hosted CSV attendance log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server for the question page and ask API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8808")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Ask a single question from the command line
    Ask {
        /// CSV file name on the configured host
        #[arg(short, long)]
        file: String,

        /// The question to ask about the file
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // The Groq API key usually lives in a .env file next to the binary
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "askcsv=debug"
    } else {
        "askcsv=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().unwrap_or_default();
    let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();

    match cli.command {
        Commands::Serve { port, host } => {
            let provider: Arc<dyn LlmProvider> =
                Arc::from(llm::create_provider(&config, &api_key)?);
            let source: Arc<dyn CsvSource> =
                Arc::new(RemoteCsvSource::new(config.data.base_url.clone()));
            let state = Arc::new(AppState {
                provider,
                source,
                model: config.llm.groq.model.clone(),
            });

            tracing::info!(
                "askcsv {} listening on {}:{}, CSV host: {}",
                askcsv::version_string(),
                host,
                port,
                config.data.base_url
            );
            server::run_server(&host, port, state).await?;
        }
        Commands::Ask { file, question } => {
            let provider = llm::create_provider(&config, &api_key)?;
            let source = RemoteCsvSource::new(config.data.base_url.clone());

            let csv_text = source.fetch(&file).await?;
            let messages = prompt::build_messages(&csv_text, &question);
            let response = provider.chat(&messages).await?;

            println!("{}", response.text);
        }
    }

    Ok(())
}
