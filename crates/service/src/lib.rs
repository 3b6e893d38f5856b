//! Ballot operations keyed by [`BallotId`](primitives::BallotId).
//!
//! [`BallotService`] ties the ballot state machine to its collaborators: the
//! db that owns every ballot, the bus that announces what happened, and the
//! clock that decides when it happened.

mod result;
mod service;

pub use result::*;
pub use service::*;
