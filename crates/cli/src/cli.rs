use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    ballots::{CreateOpts, EndOpts, VoteOpts},
    query::{BallotOpts, CountOpts, HasVotedOpts},
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help(true))]
pub struct Args {
    /// Sets a custom config file
    #[clap(short, long, value_parser, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overrides where the ballot snapshot is read from and written to
    #[clap(long, value_parser, value_name = "FILE")]
    pub db_path: Option<PathBuf>,

    /// Turn debugging information on
    #[clap(short, long)]
    pub debug: bool,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open a new ballot and print its id and creator capability
    Create(CreateOpts),

    /// Cast a vote on a ballot
    Vote(VoteOpts),

    /// Finalize a closed ballot and announce its winner
    End(EndOpts),

    /// Show a ballot's title, description, window and total votes
    Info(BallotOpts),

    /// List a ballot's options in index order
    Options(BallotOpts),

    /// Show the live tally and the current leader
    Results(BallotOpts),

    /// Show the vote count of a single option
    Count(CountOpts),

    /// Check whether an identity has voted on a ballot
    HasVoted(HasVotedOpts),

    /// Check whether a ballot is accepting votes right now
    Active(BallotOpts),

    /// List every stored ballot
    List,

    /// Print the effective configuration
    Config,
}
