use clap::Parser;

mod cli;
pub mod result;

pub use crate::cli::*;
pub(crate) mod commands;

pub fn parse_args() -> Args {
    Args::parse()
}

#[telemetry::instrument(skip_all)]
pub async fn run(args: Args) -> anyhow::Result<()> {
    commands::exec(args).await?;

    Ok(())
}
