mod artifacts;
mod client;
mod config;
mod extract;
mod models;
mod persist;
mod pipeline;
mod prompt;
mod report;

use std::path::PathBuf;

use client::openai::OpenAiClient;
use config::Config;

#[tokio::main]
async fn main() {
    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = Config::load(&workspace);

    // An explicit report path on the command line beats the configured one.
    if let Some(path) = std::env::args().nth(1) {
        config.report_path = PathBuf::from(path);
    }

    let client = match OpenAiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to set up the model client: {:#}", e);
            return;
        }
    };

    pipeline::analyze_test_failure(&config, &client).await;
}
