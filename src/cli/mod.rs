//! The `hrms` command line: drives the slices against a live backend.

mod commands;
mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

pub use commands::run;

/// Env var holding the password for `hrms login`.
pub const PASSWORD_ENV: &str = "HRMS_PASSWORD";

#[derive(Parser, Debug)]
#[command(name = "hrms")]
#[command(version)]
#[command(about = "Command-line client for the HR management backend")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: <config dir>/hrms-client/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override `api.base_url`
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override `auth.access_token`
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// User management
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// List roles
    Roles,
    /// Approval queue
    Approvals {
        #[command(subcommand)]
        command: ApprovalCommands,
    },
    /// Sign in; the password is read from HRMS_PASSWORD
    Login {
        #[arg(long)]
        email: String,

        /// Print the access token so it can be passed with --token
        #[arg(long)]
        print_token: bool,
    },
    /// Exchange the configured refresh token for a new session
    Refresh,
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        /// Filter by name or email
        #[arg(long)]
        search: Option<String>,

        /// Users per page (default: listing.page_size)
        #[arg(long)]
        page_size: Option<u32>,

        /// Fetch every page
        #[arg(long)]
        all: bool,
    },
    /// Create a user
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        role: String,

        #[arg(long)]
        designation: Option<String>,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ApprovalCommands {
    /// List pending tickets
    List {
        /// Only tickets with this status
        #[arg(long)]
        status: Option<String>,

        /// Fetch every page
        #[arg(long)]
        all: bool,
    },
    /// Approve a ticket and reload the queue
    Approve {
        id: String,

        #[arg(long)]
        remark: Option<String>,
    },
    /// Reject a ticket and reload the queue
    Reject {
        id: String,

        #[arg(long)]
        remark: Option<String>,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration (tokens masked)
    Show,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Load the config file and apply the command-line overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load_from(&self.config_path())?;
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            config.auth.access_token = Some(token.clone());
        }
        config.validate()?;
        Ok(config)
    }
}
