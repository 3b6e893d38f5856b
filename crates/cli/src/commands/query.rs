use std::fmt::Write;

use ballot_service::BallotService;
use clap::Parser;
use primitives::{BallotId, OptionIndex, BALLOTBOX_IDENTITY_VAR_NAME};

use super::{parse_identity, Output};
use crate::result::Result;

#[derive(Parser, Debug)]
pub struct BallotOpts {
    #[clap(long, value_parser, value_name = "BALLOT_ID")]
    pub ballot: BallotId,
}

#[derive(Parser, Debug)]
pub struct CountOpts {
    #[clap(long, value_parser, value_name = "BALLOT_ID")]
    pub ballot: BallotId,

    #[clap(long, value_name = "INDEX")]
    pub option: OptionIndex,
}

#[derive(Parser, Debug)]
pub struct HasVotedOpts {
    #[clap(long, value_parser, value_name = "BALLOT_ID")]
    pub ballot: BallotId,

    #[clap(long = "as", value_name = "IDENTITY", env = BALLOTBOX_IDENTITY_VAR_NAME)]
    pub identity: String,
}

pub fn info(service: &BallotService, opts: BallotOpts) -> Result<Output> {
    let info = service.get_info(opts.ballot)?;

    Ok(Output::read(format!(
        "title: {}\ndescription: {}\nstart time: {}\nend time: {}\ntotal votes: {}\n",
        info.title, info.description, info.start_time, info.end_time, info.total_votes
    )))
}

pub fn options(service: &BallotService, opts: BallotOpts) -> Result<Output> {
    let mut text = String::new();
    for (index, option) in service.get_options(opts.ballot)?.iter().enumerate() {
        let _ = writeln!(text, "{index}: {option}");
    }

    Ok(Output::read(text))
}

pub fn results(service: &BallotService, opts: BallotOpts) -> Result<Output> {
    let (results, leader) = service.get_standings(opts.ballot)?;

    let mut text = String::new();
    for (index, (option, count)) in results.iter().enumerate() {
        let _ = writeln!(text, "{index}: {option} {count}");
    }
    let _ = writeln!(
        text,
        "leader: {} ({} of {} votes)",
        leader.winning_option, leader.winning_votes, leader.total_votes
    );

    Ok(Output::read(text))
}

pub fn count(service: &BallotService, opts: CountOpts) -> Result<Output> {
    let count = service.get_vote_count(opts.ballot, opts.option)?;

    Ok(Output::read(format!("{count}\n")))
}

pub fn has_voted(service: &BallotService, opts: HasVotedOpts) -> Result<Output> {
    let identity = parse_identity(opts.identity)?;
    let voted = service.has_voted(opts.ballot, &identity)?;

    Ok(Output::read(format!("{voted}\n")))
}

pub fn active(service: &BallotService, opts: BallotOpts) -> Result<Output> {
    let active = service.is_active(opts.ballot)?;

    Ok(Output::read(format!("{active}\n")))
}

pub fn list(service: &BallotService) -> Result<Output> {
    let mut text = String::new();
    for summary in service.list_ballots() {
        let _ = writeln!(
            text,
            "{} {} ends {} votes {}",
            summary.id, summary.title, summary.end_time, summary.total_votes
        );
    }

    Ok(Output::read(text))
}
