//! Approval checker
//!
//! Given one identity and the three configured allow-lists, computes the
//! final approval verdict and logs the human-readable rationale. The three
//! checks are independent and each performs its own directory lookups; with
//! single-shot invocations and tiny data volumes, deduplicating lookups is
//! not worth a caching layer.

use crate::config::PreapprovalConfig;
use crate::directory::{DEFAULT_MAX_CHAIN_DEPTH, DirectoryClient};
use crate::error::DirectoryResult;
use std::collections::HashSet;
use tracing::{debug, info};

/// The three allow-lists, as sets.
///
/// Always passed explicitly at construction; an empty set makes the
/// corresponding check vacuously false.
#[derive(Debug, Clone, Default)]
pub struct Preapprovals {
    pub managers: HashSet<String>,
    pub groups: HashSet<String>,
    pub projects: HashSet<String>,
}

impl From<&PreapprovalConfig> for Preapprovals {
    fn from(config: &PreapprovalConfig) -> Self {
        Self {
            managers: config.managers.iter().cloned().collect(),
            groups: config.groups.iter().cloned().collect(),
            projects: config.projects.iter().cloned().collect(),
        }
    }
}

/// Why a verdict came out the way it did.
///
/// Presentational only: the precedence below never changes the boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rationale {
    /// The group check matched; membership in an approved group usually
    /// means access is already granted, not merely approved.
    AlreadyHasAccess,
    /// Some check matched, but not the group check.
    AutoApproved,
    /// Nothing matched; manual verification required.
    NotApproved,
}

impl Rationale {
    pub fn describe(&self) -> &'static str {
        match self {
            Rationale::AlreadyHasAccess => "already has access via group membership",
            Rationale::AutoApproved => "auto-approved, access not yet granted",
            Rationale::NotApproved => "not approved, manual verification required",
        }
    }
}

/// Outcome of a full approval check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub approved: bool,
    pub rationale: Rationale,
}

/// Evaluates the three approval criteria against a directory.
pub struct ApprovalChecker<C: DirectoryClient> {
    client: C,
    allow: Preapprovals,
    max_chain_depth: usize,
}

impl<C: DirectoryClient> ApprovalChecker<C> {
    pub fn new(client: C, allow: Preapprovals) -> Self {
        Self {
            client,
            allow,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    #[cfg(test)]
    fn with_max_chain_depth(mut self, max_chain_depth: usize) -> Self {
        self.max_chain_depth = max_chain_depth;
        self
    }

    /// True iff anyone in the identity's management chain is a
    /// pre-approved manager. Exact membership, not a subtree match.
    pub fn check_managers(&mut self, user: &str) -> DirectoryResult<bool> {
        let chain = self.client.management_chain(user, self.max_chain_depth)?;
        debug!(user = %user, chain = ?chain, "resolved management chain");
        let matched = chain.iter().any(|m| self.allow.managers.contains(m));
        info!(user = %user, approved = matched, "management-chain check");
        Ok(matched)
    }

    /// True iff the identity belongs to a pre-approved group.
    pub fn check_groups(&mut self, user: &str) -> DirectoryResult<bool> {
        let groups = self.client.lookup(user)?.groups();
        debug!(user = %user, groups = ?groups, "directory groups");
        let matched = groups.iter().any(|g| self.allow.groups.contains(g));
        info!(user = %user, approved = matched, "group check");
        Ok(matched)
    }

    /// True iff any of the identity's product, subproduct, project, or
    /// component affiliations is pre-approved.
    pub fn check_projects(&mut self, user: &str) -> DirectoryResult<bool> {
        let projects = self.client.lookup(user)?.projects();
        debug!(user = %user, projects = ?projects, "project affiliations");
        let matched = projects.iter().any(|p| self.allow.projects.contains(p));
        info!(user = %user, approved = matched, "project check");
        Ok(matched)
    }

    /// Run all three checks and combine them.
    ///
    /// The verdict is the plain OR of the checks. All three are evaluated
    /// fully; they are pure apart from logging, and seeing every check's
    /// result in the log is worth the extra lookups.
    ///
    /// An identity absent from the directory propagates
    /// [`crate::error::DirectoryError::NotFound`]; absence is an error,
    /// not a negative verdict.
    pub fn check_approval(&mut self, user: &str) -> DirectoryResult<Verdict> {
        let by_manager = self.check_managers(user)?;
        let by_group = self.check_groups(user)?;
        let by_project = self.check_projects(user)?;

        let approved = by_manager || by_group || by_project;
        let rationale = if by_group {
            Rationale::AlreadyHasAccess
        } else if approved {
            Rationale::AutoApproved
        } else {
            Rationale::NotApproved
        };

        info!(
            user = %user,
            approved,
            by_manager,
            by_group,
            by_project,
            "verdict: {}",
            rationale.describe()
        );
        Ok(Verdict { approved, rationale })
    }
}
