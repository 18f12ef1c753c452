//! Error display for the CLI.

use byon_compute::PoolError;
use byon_hostgroups::HostGroupError;
use colored::Colorize;

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(pool_err) = err.downcast_ref::<PoolError>() {
        return match pool_err {
            PoolError::MissingConfig { .. } => {
                Some("Set BYON_HOSTS, add `hosts` to the config file, or pass --hosts.")
            }
            PoolError::InsufficientCapacity { .. } => {
                Some("Lower --min-count or add hosts to the pool expression.")
            }
            PoolError::EmptyPool { .. } => Some("The pool expression must name at least one host."),
            PoolError::Expression(_) => Some(EXPRESSION_HINT),
            PoolError::InvalidHost { .. } => {
                Some("Hosts must be IP addresses or valid DNS names.")
            }
        };
    }

    err.downcast_ref::<HostGroupError>().map(|_| EXPRESSION_HINT)
}

const EXPRESSION_HINT: &str =
    "Groups are comma separated; each may hold one range like {1..5}, {1-5} or [1-5].";
