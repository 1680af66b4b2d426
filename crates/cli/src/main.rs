mod args;
mod progress;
mod prompt;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediaconv_core::{
    load_config, load_default_config, load_supported_formats, plan, validate_config,
    BatchRunner, BatchSummary, Config, FfmpegTranscoder, FormatCatalog, RunState, RunnerConfig,
};

use args::Cli;

/// Exit status of a batch stopped by the user.
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_default_config().context("Failed to load configuration")?,
    };

    cli.apply_overrides(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn print_formats(catalog: &FormatCatalog) -> Result<ExitCode> {
    if catalog.is_empty() {
        bail!("No formats available; check the transcoder path");
    }
    for format in catalog.iter() {
        println!("{}", format);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &BatchSummary, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(summary).context("Failed to encode summary")?;
        println!("{}", text);
        return Ok(());
    }

    let state = match summary.state {
        RunState::Cancelled => "cancelled",
        _ => "completed",
    };
    println!(
        "Batch {}: {} converted, {} skipped, {} failed ({} of {} files processed)",
        state,
        summary.converted,
        summary.skipped,
        summary.failed,
        summary.completed,
        summary.total
    );
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode> {
    init_logging();

    let config = load(&cli)?;
    let transcoder = Arc::new(FfmpegTranscoder::new(config.transcoder.path.clone()));

    let catalog = load_supported_formats(transcoder.as_ref()).await;
    if cli.list_formats {
        return print_formats(&catalog);
    }
    if catalog.is_empty() {
        warn!("No formats available from {:?}", config.transcoder.path);
    }

    let settings = cli.settings(&config);
    let assume_yes = cli.yes;
    let request = plan(&settings, &catalog, |mismatch| {
        prompt::confirm_mismatch(mismatch, assume_yes)
    })?;

    if request.is_empty() {
        info!("No files to convert in {:?}", settings.input);
        return Ok(ExitCode::SUCCESS);
    }

    let total = request.total();
    let runner = BatchRunner::with_shared(RunnerConfig::from(&config), transcoder);
    let mut handle = runner.start(request)?;

    // Ctrl-C stops the batch once the current file is done.
    let token = handle.cancellation_token();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Cancelling; waiting for the current file to finish");
            token.cancel();
        }
    });

    progress::follow(&mut handle, total, cli.json).await;
    let summary = handle.wait().await?;

    print_summary(&summary, cli.json)?;

    Ok(match summary.state {
        RunState::Cancelled => ExitCode::from(EXIT_CANCELLED),
        _ => ExitCode::SUCCESS,
    })
}
