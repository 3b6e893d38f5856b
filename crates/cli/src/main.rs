use telemetry::{custom_subscriber::TelemetrySubscriber, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();

    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    TelemetrySubscriber::init_with_level(std::io::stderr, level)?;

    cli::run(args).await?;

    Ok(())
}
