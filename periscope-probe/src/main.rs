use anyhow::Result;
use clap::Parser;
use periscope_data_services::{load_config, load_config_from, MassiveClient};
use periscope_probe::{probe, Args};
use std::io::Write;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::registry()
        .with(args.env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.env_file {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    info!("Configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = config.ensure_complete() {
        probe::report_error(&mut out, &err)?;
        return Ok(ExitCode::FAILURE);
    }

    let client = MassiveClient::new(&config);
    let request = args.snapshot_request();
    info!("Fetching options chain for {}", request.underlying);

    let outcome = probe::run(&client, &request, args.output_mode(), &mut out).await?;
    out.flush()?;

    Ok(outcome.exit_code())
}
