//! askcsv: ask natural-language questions about a hosted CSV attendance log
//!
//! This library provides:
//! - HTTP server with a single-page question form and a JSON ask API
//! - CSV retrieval from the configured attendance log host
//! - Groq chat-completions client (OpenAI-compatible wire format)
//! - Prompt assembly for the attendance assistant

pub mod config;
pub mod data;
pub mod llm;
pub mod prompt;
pub mod server;

pub use config::Config;

/// Full version string, including the dev suffix embedded by build.rs.
pub fn version_string() -> String {
    format!(
        "{}{}",
        env!("CARGO_PKG_VERSION"),
        env!("ASKCSV_VERSION_SUFFIX")
    )
}
