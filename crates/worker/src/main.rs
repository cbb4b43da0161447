//! `flowbridge-worker` -- run a single workflow tool call.
//!
//! Loads API settings from the environment, dispatches one tool call, and
//! prints the structured result as JSON on stdout. Logs go to stderr.
//!
//! ```text
//! flowbridge-worker --list
//! flowbridge-worker update_workflow '{"workflowId":"abc","name":"Renamed"}'
//! echo '{"workflowId":"abc"}' | flowbridge-worker get_workflow
//! ```
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default | Description                      |
//! |----------------------------|----------|---------|----------------------------------|
//! | `N8N_API_URL`              | yes      | --      | Base URL, e.g. `http://host:5678` |
//! | `N8N_API_KEY`              | yes      | --      | API key sent with every request  |
//! | `N8N_REQUEST_TIMEOUT_SECS` | no       | `30`    | Per-request timeout              |

use std::sync::Arc;

use flowbridge_n8n::{N8nApi, N8nConfig};
use flowbridge_tools::definitions::tool_definitions;
use flowbridge_tools::ToolDispatcher;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: flowbridge-worker --list | <tool> [json-args]";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowbridge_worker=info,flowbridge_tools=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let tool = args.next().unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });

    if tool == "--list" {
        print_json(&serde_json::json!({ "tools": tool_definitions() }));
        return;
    }

    let raw_args = match args.next() {
        Some(raw) => raw,
        None => read_stdin().await,
    };
    let tool_args: Value = serde_json::from_str(&raw_args).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Tool arguments must be a JSON object");
        std::process::exit(2);
    });

    let config = N8nConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let api = N8nApi::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build API client");
        std::process::exit(1);
    });

    tracing::info!(
        tool = %tool,
        api_url = %api.base_url(),
        timeout_secs = config.request_timeout_secs,
        "Dispatching tool call",
    );

    let dispatcher = ToolDispatcher::new(Arc::new(api));
    let result = dispatcher.call(&tool, tool_args).await;

    print_json(&result.to_json());
    if !result.is_success() {
        std::process::exit(1);
    }
}

async fn read_stdin() -> String {
    let mut buf = String::new();
    if let Err(e) = tokio::io::stdin().read_to_string(&mut buf).await {
        tracing::error!(error = %e, "Failed to read tool arguments from stdin");
        std::process::exit(2);
    }
    buf
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialise result");
            std::process::exit(1);
        }
    }
}
