use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{AppConfig, DEFAULT_API_URL, EnvOverrides, StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration and the values in effect.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring ticketdesk.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt(
        &format!("Ticket API base URL (default {DEFAULT_API_URL})"),
        &mut cfg.api_base_url,
    )?;
    apply_prompt("Tickets per page", &mut cfg.page_limit)?;
    apply_prompt("Default status filter (or 'all')", &mut cfg.default_status)?;
    apply_prompt(
        "Default priority filter (or 'all')",
        &mut cfg.default_priority,
    )?;

    AppConfig::resolve(&cfg, &EnvOverrides::default())?;
    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;
    let effective = AppConfig::resolve(&cfg, &EnvOverrides::from_env())?;

    println!("Configuration file: {}", path.display());
    println!("API base URL: {}", display_value(cfg.api_base_url.as_deref()));
    println!("Tickets per page: {}", display_value(cfg.page_limit.as_deref()));
    println!("Default status: {}", display_value(cfg.default_status.as_deref()));
    println!("Default priority: {}", display_value(cfg.default_priority.as_deref()));
    println!();
    println!("In effect (including environment overrides):");
    println!("  API base URL: {}", effective.api_base_url);
    println!("  Tickets per page: {}", effective.page.limit);
    println!(
        "  Filters: status {}, priority {}",
        effective.default_filters.status, effective.default_filters.priority
    );

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>) -> AppResult<()> {
    match prompt(field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match current {
        Some(value) => write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::from_input(&input))
}

const UNSET: &str = "<not set>";

fn display_value(value: Option<&str>) -> &str {
    match value {
        Some(stored) if !stored.is_empty() => stored,
        _ => UNSET,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
