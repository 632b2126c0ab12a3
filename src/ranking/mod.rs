//! Ranking pipeline - from the n-gram graph to trust scores.
//!
//! Two passes share one power-iteration kernel:
//! - Authority (inverse-rank) with uniform teleportation
//! - Trust, teleporting only to the top authority nodes
//!
//! The trust vector then drives edge filtering and root selection for
//! extraction.

mod authority;
mod power;
mod trust;

pub use authority::InverseRanker;
pub use power::{RankOutcome, DAMPING};
pub use trust::{filter_edges, TrustRanker};
