//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Courier - notification config access administration
#[derive(Parser, Debug)]
#[command(name = "courier", version)]
#[command(about = "Courier notification config access administration", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the configuration file
    Config {
        /// Config operation
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Inspect access policy decisions
    Policy {
        /// Policy operation
        #[command(subcommand)]
        action: PolicyAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. `policy.filter_by`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config dir)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config as COURIER_* environment variables
    Export {
        /// Format as `docker run --env` flags
        #[arg(long)]
        docker_env: bool,
    },
}

/// `policy` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PolicyAction {
    /// Show how the loaded policy treats an identity
    Explain {
        /// User name
        #[arg(long)]
        user: Option<String>,
        /// Role (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Backend role (repeatable)
        #[arg(long = "backend-role")]
        backend_roles: Vec<String>,
        /// Requested tenant
        #[arg(long)]
        tenant: Option<String>,
        /// Explain for an absent identity (security disabled)
        #[arg(long, conflicts_with_all = ["user", "roles", "backend_roles", "tenant"])]
        no_identity: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
