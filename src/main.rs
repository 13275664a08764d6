//! Pre-approval checker CLI
//!
//! Checks whether a user is pre-approved for access based on LDAP
//! organizational metadata.

use clap::Parser;
use preapprove::{
    approval::{ApprovalChecker, Preapprovals},
    config::load_config,
    directory::LdapDirectoryClient,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Exit code when the user is not pre-approved (distinct from operational
/// errors, which exit 1).
const EXIT_NOT_APPROVED: u8 = 2;

/// Check whether a user is pre-approved for access
#[derive(Parser, Debug)]
#[command(name = "preapprove")]
#[command(version, about, long_about = None)]
struct Args {
    /// Identity (uid) to check
    user: String,

    /// Path to configuration file
    #[arg(short, long, env = "PREAPPROVE_CONFIG")]
    config: Option<String>,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let config = load_config(args.config.as_deref())
        .inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;

    let client = LdapDirectoryClient::connect(&config.ldap_server, &config.base_dn)
        .inspect_err(|e| error!(error = %e, "Failed to connect to the directory"))?;

    let allow = Preapprovals::from(&config.preapprovals);
    let mut checker = ApprovalChecker::new(client, allow);

    let verdict = checker.check_approval(&args.user)?;
    info!("user {}: {}", args.user, verdict.rationale.describe());

    Ok(verdict.approved)
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging (RUST_LOG overrides --verbose)
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NOT_APPROVED),
        Err(e) => {
            error!(error = %e, "check failed");
            ExitCode::FAILURE
        }
    }
}
