use std::process::ExitCode;

use clap::Args;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::filter::{FilterValue, Page, TicketQuery};
use crate::error::AppResult;
use crate::workflow::listing::{ListingComponent, RefreshOutcome};

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only tickets with this status ("all" for any).
    #[arg(long)]
    pub status: Option<String>,
    /// Only tickets with this priority ("all" for any).
    #[arg(long)]
    pub priority: Option<String>,
    /// Only tickets in this category ("all" for any).
    #[arg(long)]
    pub category: Option<String>,
    /// Number of tickets to skip.
    #[arg(long, default_value_t = 0)]
    pub skip: u32,
    /// Page size; defaults to the configured page limit.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,
}

impl FilterArgs {
    pub fn to_query(&self, config: &AppConfig) -> TicketQuery {
        let mut filters = config.default_filters.clone();
        if let Some(status) = &self.status {
            filters.status = FilterValue::parse(Some(status));
        }
        if let Some(priority) = &self.priority {
            filters.priority = FilterValue::parse(Some(priority));
        }
        if let Some(category) = &self.category {
            filters.category = FilterValue::parse(Some(category));
        }

        TicketQuery {
            filters,
            page: Page {
                skip: self.skip,
                limit: self.limit.unwrap_or(config.page.limit),
            },
        }
    }
}

pub async fn run(ctx: &AppContext, args: FilterArgs) -> AppResult<ExitCode> {
    let query = args.to_query(&ctx.config);
    let mut listing = ListingComponent::new(ctx.gateway.clone(), query, ctx.render.clone());

    match listing.refresh_list().await {
        RefreshOutcome::Rendered { .. } => {
            print_listing(&listing);
            Ok(ExitCode::SUCCESS)
        }
        RefreshOutcome::Failed { notice } => {
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
        RefreshOutcome::Stale => Ok(ExitCode::SUCCESS),
    }
}

pub fn print_listing(listing: &ListingComponent) {
    let filters = listing.filters();
    let page = listing.page();
    println!(
        "Tickets (status: {}, priority: {}, category: {}, skip: {}, limit: {})",
        filters.status, filters.priority, filters.category, page.skip, page.limit
    );
    for entry in listing.displayed() {
        println!("{entry}");
        println!();
    }
}
