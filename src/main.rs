use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use autotag::cli::{Args, TagPublisher};
use autotag::config;
use autotag::context::RepoContext;
use autotag::outputs::ActionOutputs;
use autotag::remote::GitHubClient;
use autotag::ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    // Failures are reported through the outputs; the process itself still succeeds
    let outputs = run(&args).await;
    outputs.emit()?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("AUTOTAG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Args) -> ActionOutputs {
    let context = match RepoContext::from_env() {
        Ok(context) => context,
        Err(e) => {
            ui::display_error(&e.to_string());
            return ActionOutputs::not_created(None);
        }
    };
    log_workspace(&context.workspace);

    let config = match config::load_config(args.config.as_deref(), &context.workspace) {
        Ok(file_config) => file_config.merge(args.to_config()),
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            return ActionOutputs::not_created(None);
        }
    };

    let client = match GitHubClient::with_base_url(&context.token, &context.api_url) {
        Ok(client) => client,
        Err(e) => {
            ui::display_error(&e.to_string());
            return ActionOutputs::not_created(None);
        }
    };

    let result = TagPublisher::new(&client, &context, &config).run().await;
    if let Err(failure) = &result {
        error!(stage = %failure.stage, error = %failure.error, "publish failed");
        ui::display_error(&failure.to_string());
    }

    ActionOutputs::from_result(&result)
}

/// Debug listing of the workspace root
fn log_workspace(workspace: &Path) {
    let Ok(entries) = fs::read_dir(workspace) else {
        debug!(workspace = %workspace.display(), "workspace is not readable");
        return;
    };

    let listing = entries
        .flatten()
        .map(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let marker = if is_dir { "> " } else { "  - " };
            format!("{}{}", marker, entry.file_name().to_string_lossy())
        })
        .collect::<Vec<_>>()
        .join("\n");

    debug!(workspace = %workspace.display(), "working directory:\n{}", listing);
}
