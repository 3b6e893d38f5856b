use ballot::CreatorCapability;
use ballot_service::BallotService;
use ballotbox_config::BallotBoxConfig;
use clap::Parser;
use primitives::{BallotId, DurationMs, OptionIndex, BALLOTBOX_IDENTITY_VAR_NAME};

use super::{parse_identity, Output};
use crate::result::Result;

#[derive(Parser, Debug)]
pub struct CreateOpts {
    /// Title shown to voters
    #[clap(long)]
    pub title: String,

    #[clap(long, default_value = "")]
    pub description: String,

    /// One option label, repeat the flag for each option in order
    #[clap(long = "option", value_name = "LABEL")]
    pub options: Vec<String>,

    /// How long the ballot accepts votes. Uses the configured default when
    /// left out
    #[clap(long, value_name = "MILLISECONDS")]
    pub duration_ms: Option<DurationMs>,

    /// Identity of the creator
    #[clap(long = "as", value_name = "IDENTITY", env = BALLOTBOX_IDENTITY_VAR_NAME)]
    pub identity: String,
}

#[derive(Parser, Debug)]
pub struct VoteOpts {
    #[clap(long, value_parser, value_name = "BALLOT_ID")]
    pub ballot: BallotId,

    /// Index of the chosen option, starting at 0
    #[clap(long, value_name = "INDEX")]
    pub option: OptionIndex,

    /// Identity of the voter
    #[clap(long = "as", value_name = "IDENTITY", env = BALLOTBOX_IDENTITY_VAR_NAME)]
    pub identity: String,
}

#[derive(Parser, Debug)]
pub struct EndOpts {
    #[clap(long, value_parser, value_name = "BALLOT_ID")]
    pub ballot: BallotId,

    /// Token printed by `create`
    #[clap(long, value_name = "TOKEN")]
    pub capability: String,
}

pub fn create(
    service: &BallotService,
    config: &BallotBoxConfig,
    opts: CreateOpts,
) -> Result<Output> {
    let creator = parse_identity(opts.identity)?;
    let duration = opts.duration_ms.unwrap_or(config.default_duration_ms);

    let (id, capability) =
        service.create_ballot(opts.title, opts.description, opts.options, duration, creator)?;

    Ok(Output::mutation(format!(
        "ballot: {id}\ncapability: {capability}\n"
    )))
}

pub fn vote(service: &BallotService, opts: VoteOpts) -> Result<Output> {
    let voter = parse_identity(opts.identity)?;

    service.cast_vote(opts.ballot, opts.option, &voter)?;

    Ok(Output::mutation(format!(
        "vote recorded for option {}\n",
        opts.option
    )))
}

pub fn end(service: &BallotService, opts: EndOpts) -> Result<Output> {
    let capability: CreatorCapability = opts.capability.parse()?;

    let outcome = service.end_voting(opts.ballot, &capability)?;

    Ok(Output::read(format!(
        "winner: {} ({} of {} votes)\n",
        outcome.winning_option, outcome.winning_votes, outcome.total_votes
    )))
}
