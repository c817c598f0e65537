// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use post_generator::{
    CommandLineInput, DirectoryPersister, HttpClient, Persister, PipelineConfig, PostGenerator,
    PublishTarget, RunReport, StdoutPersister, WordPressPersister,
};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Diagnostics go to stderr so stdout stays clean for the run report.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("post_generator.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the persister for the configured target.
fn build_persister(
    config: &PipelineConfig,
    http: &HttpClient,
) -> anyhow::Result<Arc<dyn Persister>> {
    let persister: Arc<dyn Persister> = match &config.target {
        PublishTarget::Directory(dir) => {
            log::info!("Writing posts to {}", dir.display());
            Arc::new(DirectoryPersister::new(dir.clone()))
        }
        PublishTarget::Stdout => Arc::new(StdoutPersister),
        PublishTarget::WordPress { site, credentials } => {
            log::info!("Publishing posts to {} as {}", site, credentials.username());
            Arc::new(
                WordPressPersister::new(http.inner().clone(), site, credentials.clone())
                    .context("Failed to prepare WordPress publishing")?,
            )
        }
    };
    Ok(persister)
}

/// Prints the run report the way the admin page showed it: headline, then each log line.
fn print_report(report: &RunReport, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let json = serde_json::to_string_pretty(report).context("Failed to encode run report")?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }
    Ok(())
}

async fn execute(config: PipelineConfig) -> anyhow::Result<bool> {
    log::debug!("Photo service access key: {}", config.access_key);

    let http = HttpClient::new(config.timeout).context("Failed to build HTTP client")?;
    let persister = build_persister(&config, &http)?;
    let generator = PostGenerator::new(&config, Arc::new(http), persister);

    let report = generator.run().await;
    print_report(&report, config.json)?;

    Ok(report.succeeded)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let config = PipelineConfig::resolve(cli).context("Invalid configuration")?;

    if execute(config).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
