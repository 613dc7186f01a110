mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod test_helpers;
mod view;
mod workflow;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::export::{self, ExportArgs};
use crate::cmd::list::{self, FilterArgs};
use crate::cmd::show::{self, ShowArgs};
use crate::cmd::submit::{self, SubmitArgs};
use crate::cmd::update::{self, UpdateArgs};
use crate::cmd::watch;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::api::HttpTicketGateway;
use crate::infra::terminal::TerminalNavigator;

const LOG_ENV_VAR: &str = "TICKETDESK_LOG";

#[derive(Parser)]
#[command(name = "ticketdesk", author, version, about = "Helpdesk ticket client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new ticket.
    Submit(SubmitArgs),
    /// List tickets, newest first.
    List(FilterArgs),
    /// Interactive listing that refreshes as filters change.
    Watch(FilterArgs),
    /// Show one ticket in full.
    Show(ShowArgs),
    /// Change the status, priority or severity of a ticket.
    Update(UpdateArgs),
    /// Export all tickets as CSV.
    Export(ExportArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> AppResult<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Submit(args) => submit::run(&client_context()?, args).await,
        Commands::List(args) => list::run(&client_context()?, args).await,
        Commands::Watch(args) => watch::run(&client_context()?, args).await,
        Commands::Show(args) => {
            show::run(&client_context()?, args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Update(args) => {
            update::run(&client_context()?, args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Export(args) => {
            export::run(&client_context()?, args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn client_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;
    let gateway = Arc::new(HttpTicketGateway::new(config.api_base_url.clone()));
    Ok(AppContext::new(config, gateway, Arc::new(TerminalNavigator)))
}
