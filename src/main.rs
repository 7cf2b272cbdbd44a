use anyhow::{Context, Result};
use clap::Parser;
use openai_chat_gateway::dispatcher::Dispatcher;
use openai_chat_gateway::event::{HttpEvent, RequestContext};
use openai_chat_gateway::models::Config;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "openai-chat-gateway")]
#[command(about = "Run one gateway invocation against an event JSON")]
struct CliArgs {
    /// Path to an event JSON file; reads stdin when omitted.
    #[arg(value_name = "EVENT_FILE")]
    event_file: Option<PathBuf>,
}

fn read_event(args: &CliArgs) -> Result<HttpEvent> {
    let raw = match &args.event_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading event from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("parsing event JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openai_chat_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let event = read_event(&args)?;

    let ctx = RequestContext {
        request_id: Uuid::new_v4().to_string(),
        function_name: "openai-chat-gateway".to_string(),
    };
    info!("Starting invocation {}", ctx.request_id);

    let dispatcher = Dispatcher::new(Config::from_env());
    let response = dispatcher.handle(&event, &ctx).await;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
