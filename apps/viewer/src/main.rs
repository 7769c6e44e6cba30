use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod script;
mod service;
mod terminal;

use app::Viewer;
use config::load_settings;
use script::Script;

#[derive(Parser, Debug)]
#[command(name = "task-viewer", about = "Replays a to-do list session on a text screen")]
struct Args {
    /// Viewer settings (TOML). Defaults to ./viewer.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON script with seed lists and user steps. Runs a built-in demo when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    #[arg(long)]
    large_font: bool,
    /// Log filter, e.g. `list_core=debug`.
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if args.large_font {
        settings.large_font = true;
    }
    if let Some(filter) = args.log {
        settings.log_filter = filter;
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::demo(),
    };
    info!(steps = script.steps.len(), "starting viewer");

    let mut viewer = Viewer::start(&settings, script, true);
    viewer.run().await;

    let views = viewer.controller().views();
    info!(
        focus = ?views.focus(),
        lines = views.transcript().len(),
        "script finished"
    );
    Ok(())
}
