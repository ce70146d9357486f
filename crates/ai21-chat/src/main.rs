use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ai21_chat::chat::{ChatKind, Params, chat_adapter};
use ai21_chat::client::HttpClient;
use ai21_chat::config::{API_KEY_ENV, Config};
use ai21_chat::message::ChatMessage;

/// Send a one-shot conversation to AI21 Studio and print the reply.
#[derive(Debug, Parser)]
#[command(name = "ai21-chat", version)]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "ai21-chat.yaml")]
    config: PathBuf,

    /// Model name (overrides config); `j2-*` or `jamba*`
    #[arg(short, long)]
    model: Option<String>,

    /// System prompt
    #[arg(short, long)]
    system: Option<String>,

    #[arg(long)]
    temperature: Option<f32>,

    #[arg(long)]
    max_tokens: Option<u32>,

    /// User prompt
    #[arg(required = true, trailing_var_arg = true)]
    prompt: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .await
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let model = cli.model.clone().unwrap_or_else(|| config.model.clone());

    let api_key = config.api_key();
    if api_key.is_none() {
        warn!("No AI21 API key configured. Set {API_KEY_ENV} or api.api_key.");
    }
    let client = HttpClient::from_config(&config.api, api_key).context("building HTTP client")?;

    let adapter = chat_adapter(&model)?;
    info!(model = %model, format = %adapter.kind(), "Sending chat request");

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &cli.system {
        messages.push(ChatMessage::system(system.as_str()));
    }
    messages.push(ChatMessage::human(cli.prompt.join(" ")));

    let conversion = adapter.convert_messages(&messages)?;
    let params = adapter.build_params(&model, conversion, extra_params(&cli, adapter.kind()));

    let reply = adapter.call(&client, params).await?;
    println!("{}", reply.text().unwrap_or_default());

    Ok(())
}

/// Sampling options, named the way each endpoint expects them.
fn extra_params(cli: &Cli, kind: ChatKind) -> Params {
    let max_tokens_key = match kind {
        ChatKind::Legacy => "maxTokens",
        ChatKind::Completions => "max_tokens",
    };

    let mut params = Params::new();
    if let Some(temperature) = cli.temperature {
        params.insert("temperature".to_string(), serde_json::json!(temperature));
    }
    if let Some(max_tokens) = cli.max_tokens {
        params.insert(max_tokens_key.to_string(), serde_json::json!(max_tokens));
    }
    params
}
