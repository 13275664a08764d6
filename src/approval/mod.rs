//! Approval module
//!
//! Combines the three independent approval criteria (management chain,
//! group membership, project affiliation) into a single verdict.

pub mod checker;

pub use checker::{ApprovalChecker, Preapprovals, Rationale, Verdict};
