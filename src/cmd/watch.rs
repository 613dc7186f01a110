use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::cmd::list::{FilterArgs, print_listing};
use crate::context::AppContext;
use crate::domain::filter::{FilterAxis, FilterValue, Page};
use crate::domain::ticket::Ticket;
use crate::error::AppResult;
use crate::services::TicketGateway;
use crate::view::Notice;
use crate::view::list::ViewAction;
use crate::workflow::detail::view_ticket;
use crate::workflow::export::export_csv;
use crate::workflow::listing::{ListingComponent, RefreshOutcome, RefreshRequest, RefreshToken, fetch};

const HELP: &str = "\
Commands:
  status <value|all>      filter by status
  priority <value|all>    filter by priority
  category <value|all>    filter by category
  page <skip> <limit>     change the pagination window
  refresh                 fetch again with the current filters
  view <ticket_id>        show one ticket in full
  export                  print the CSV export link
  help                    show this help
  quit                    leave";

type FetchResult = (RefreshToken, AppResult<Vec<Ticket>>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Filter(FilterAxis, FilterValue),
    Page(Page),
    Refresh,
    View(String),
    Export,
    Help,
    Quit,
}

impl WatchCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };
        let rest = words.collect::<Vec<_>>();

        if let Some(axis) = FilterAxis::from_str(verb) {
            let value = rest.join(" ");
            return Ok(WatchCommand::Filter(axis, FilterValue::parse(Some(&value))));
        }

        match (verb.to_lowercase().as_str(), rest.as_slice()) {
            ("page", [skip, limit]) => {
                let skip = skip
                    .parse::<u32>()
                    .map_err(|_| format!("invalid skip '{skip}'"))?;
                let limit = match limit.parse::<u32>() {
                    Ok(limit) if limit > 0 => limit,
                    _ => return Err(format!("invalid limit '{limit}'")),
                };
                Ok(WatchCommand::Page(Page { skip, limit }))
            }
            ("page", _) => Err("usage: page <skip> <limit>".to_string()),
            ("refresh" | "r", []) => Ok(WatchCommand::Refresh),
            ("view", [ticket_id]) => Ok(WatchCommand::View(ticket_id.to_string())),
            ("view", _) => Err("usage: view <ticket_id>".to_string()),
            ("export", []) => Ok(WatchCommand::Export),
            ("help" | "?", _) => Ok(WatchCommand::Help),
            ("quit" | "q" | "exit", _) => Ok(WatchCommand::Quit),
            _ => Err(format!("unknown command '{}'; type 'help'", line.trim())),
        }
    }
}

fn spawn_fetch(
    gateway: Arc<dyn TicketGateway>,
    request: RefreshRequest,
    results: &UnboundedSender<FetchResult>,
) {
    let results = results.clone();
    tokio::spawn(async move {
        // The receiver is gone once the loop exits; late results are dropped.
        let _ = results.send(fetch(gateway, request).await);
    });
}

pub async fn run(ctx: &AppContext, args: FilterArgs) -> AppResult<ExitCode> {
    let query = args.to_query(&ctx.config);
    let mut listing = ListingComponent::new(ctx.gateway.clone(), query, ctx.render.clone());
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<FetchResult>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    let initial = listing.begin_refresh();
    spawn_fetch(listing.gateway(), initial, &results_tx);

    loop {
        tokio::select! {
            Some((token, result)) = results_rx.recv() => {
                match listing.apply(token, result) {
                    RefreshOutcome::Rendered { .. } => print_listing(&listing),
                    RefreshOutcome::Failed { notice } => eprintln!("{notice}"),
                    RefreshOutcome::Stale => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match WatchCommand::parse(&line) {
                    Ok(WatchCommand::Filter(axis, value)) => {
                        let request = listing.set_filter(axis, value);
                        spawn_fetch(listing.gateway(), request, &results_tx);
                    }
                    Ok(WatchCommand::Page(page)) => {
                        let request = listing.set_page(page);
                        spawn_fetch(listing.gateway(), request, &results_tx);
                    }
                    Ok(WatchCommand::Refresh) => {
                        let request = listing.begin_refresh();
                        spawn_fetch(listing.gateway(), request, &results_tx);
                    }
                    Ok(WatchCommand::View(ticket_id)) => {
                        let action = ViewAction { ticket_id };
                        match view_ticket(ctx.gateway.as_ref(), &action, listing.render_options()).await {
                            Ok(detail) => println!("{detail}\n"),
                            Err(err) => eprintln!("{}", Notice::error(err.to_string())),
                        }
                    }
                    Ok(WatchCommand::Export) => {
                        export_csv(ctx.gateway.as_ref(), ctx.navigator.as_ref())?;
                    }
                    Ok(WatchCommand::Help) => println!("{HELP}"),
                    Ok(WatchCommand::Quit) => break,
                    Err(message) => eprintln!("{}", Notice::warning(message)),
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_changes_with_spaces() {
        assert_eq!(
            WatchCommand::parse("status In Progress"),
            Ok(WatchCommand::Filter(
                FilterAxis::Status,
                FilterValue::Only("In Progress".to_string())
            ))
        );
        assert_eq!(
            WatchCommand::parse("priority all"),
            Ok(WatchCommand::Filter(FilterAxis::Priority, FilterValue::All))
        );
        assert_eq!(
            WatchCommand::parse("category"),
            Ok(WatchCommand::Filter(FilterAxis::Category, FilterValue::All))
        );
    }

    #[test]
    fn parses_page_and_actions() {
        assert_eq!(
            WatchCommand::parse("page 100 50"),
            Ok(WatchCommand::Page(Page {
                skip: 100,
                limit: 50
            }))
        );
        assert_eq!(
            WatchCommand::parse("view INC-2026-0001"),
            Ok(WatchCommand::View("INC-2026-0001".to_string()))
        );
        assert_eq!(WatchCommand::parse("refresh"), Ok(WatchCommand::Refresh));
        assert_eq!(WatchCommand::parse("q"), Ok(WatchCommand::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(WatchCommand::parse("page 0 0").is_err());
        assert!(WatchCommand::parse("page ten").is_err());
        assert!(WatchCommand::parse("view").is_err());
        assert!(WatchCommand::parse("delete INC-1").is_err());
    }
}
