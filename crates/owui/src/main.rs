// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! owui - run OpenWebUI workflow nodes from the command line.

mod commands;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use clap::{Args, Parser, Subcommand};
use owui_config::OwuiConfig;
use owui_config::credentials::JWT_TOKEN_ENV;
use owui_security::{RedactingWriter, redact};

/// owui - run OpenWebUI workflow nodes from the command line.
#[derive(Parser, Debug)]
#[command(name = "owui", version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the standard lookup locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a node over a batch of JSON items.
    Run(RunArgs),
    /// List the models offered for the chat `model` parameter.
    Models {
        /// Credential name (defaults to `execution.credential`).
        #[arg(long)]
        credential: Option<String>,
    },
    /// List the built-in nodes, optionally filtered.
    Nodes {
        /// Case-insensitive search over name and description.
        query: Option<String>,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Load and validate configuration, then print a summary.
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Node to run.
    #[arg(long, default_value = "openWebUi")]
    pub node: String,

    /// Feature selector (combined node only).
    #[arg(long)]
    pub feature: Option<String>,

    /// Operation within the feature.
    #[arg(long)]
    pub operation: Option<String>,

    /// JSON file holding an item array or a single item; `-` reads stdin.
    #[arg(long, value_name = "FILE")]
    pub input: Option<String>,

    /// Node-level parameter applied to items lacking the field.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Credential name (defaults to `execution.credential`).
    #[arg(long)]
    pub credential: Option<String>,

    /// Record per-item failures instead of aborting.
    #[arg(long, conflicts_with = "no_continue_on_fail")]
    pub continue_on_fail: bool,

    /// Abort on the first failure even if the config enables tolerant mode.
    #[arg(long)]
    pub no_continue_on_fail: bool,
}

impl RunArgs {
    /// Failure-tolerant mode after applying the command-line override to
    /// the configured default.
    pub fn tolerant(&self, configured: bool) -> bool {
        match (self.continue_on_fail, self.no_continue_on_fail) {
            (true, _) => true,
            (_, true) => false,
            _ => configured,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            owui_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let secrets = Arc::new(RwLock::new(Vec::new()));
    register_secrets(&config, &secrets);
    init_tracing(&config.general.log_level, secrets.clone());

    let result = match cli.command {
        Commands::Run(args) => commands::run(&config, &args).await,
        Commands::Models { credential } => commands::models(&config, credential).await,
        Commands::Nodes { query } => commands::nodes(query.as_deref().unwrap_or_default()),
        Commands::Config {
            action: ConfigCommands::Check,
        } => commands::config_check(&config),
    };

    if let Err(e) = result {
        let known = secrets.read().map(|v| v.clone()).unwrap_or_default();
        eprintln!("owui: {}", redact(&e.to_string(), &known));
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<OwuiConfig, Vec<owui_config::ConfigError>> {
    match path {
        Some(path) => owui_config::load_and_validate_path(path),
        None => owui_config::load_and_validate(),
    }
}

/// Registers every token the process may send so log output never carries it.
fn register_secrets(config: &OwuiConfig, secrets: &Arc<RwLock<Vec<String>>>) {
    for credential in config.credentials.values() {
        RedactingWriter::<std::io::Stderr>::add_secret(secrets, credential.jwt_token.clone());
    }
    if let Ok(token) = std::env::var(JWT_TOKEN_ENV) {
        RedactingWriter::<std::io::Stderr>::add_secret(secrets, token);
    }
}

fn init_tracing(log_level: &str, secrets: Arc<RwLock<Vec<String>>>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("owui={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .init();
}
