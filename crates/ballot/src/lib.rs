//! Single-proposal ballots.
//!
//! A [`Ballot`] is opened with a fixed list of options and a voting window.
//! Every identity may vote once while the window is open, anyone may read the
//! tallies at any time, and once the window has closed the holder of the
//! ballot's [`CreatorCapability`] may finalize it to learn the winner.
//!
//! Nothing in this crate reads a clock, touches storage or publishes
//! notifications. Callers pass the current time into every time-gated
//! operation and decide what to do with the results.

mod ballot;
mod capability;
mod error;
mod tally;

pub use crate::{ballot::*, capability::*, error::*, tally::*};
