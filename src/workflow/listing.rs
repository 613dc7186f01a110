use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::filter::{FilterAxis, FilterSelection, FilterValue, Page, TicketQuery};
use crate::domain::ticket::Ticket;
use crate::error::AppResult;
use crate::services::TicketGateway;
use crate::view::{ListEntry, Notice, RenderOptions, render_list};

/// Identifies one listing fetch. Only the most recently issued token is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken(u64);

#[derive(Debug, Clone)]
pub struct RefreshRequest {
    pub token: RefreshToken,
    pub query: TicketQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered { count: usize },
    Failed { notice: Notice },
    Stale,
}

/// Owns the filter selection and the rendering of the latest successful fetch.
pub struct ListingComponent {
    gateway: Arc<dyn TicketGateway>,
    query: TicketQuery,
    latest: u64,
    displayed: Vec<ListEntry>,
    options: RenderOptions,
}

impl ListingComponent {
    pub fn new(gateway: Arc<dyn TicketGateway>, query: TicketQuery, options: RenderOptions) -> Self {
        Self {
            gateway,
            query,
            latest: 0,
            displayed: Vec::new(),
            options,
        }
    }

    pub fn gateway(&self) -> Arc<dyn TicketGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.query.filters
    }

    pub fn page(&self) -> Page {
        self.query.page
    }

    pub fn displayed(&self) -> &[ListEntry] {
        &self.displayed
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    /// Changing a filter immediately starts a new fetch for the new selection.
    pub fn set_filter(&mut self, axis: FilterAxis, value: FilterValue) -> RefreshRequest {
        self.query.filters.set(axis, value);
        self.begin_refresh()
    }

    pub fn set_page(&mut self, page: Page) -> RefreshRequest {
        self.query.page = page;
        self.begin_refresh()
    }

    /// Issues a new token, invalidating every fetch still in flight.
    pub fn begin_refresh(&mut self) -> RefreshRequest {
        self.latest += 1;
        RefreshRequest {
            token: RefreshToken(self.latest),
            query: self.query.clone(),
        }
    }

    pub async fn refresh_list(&mut self) -> RefreshOutcome {
        let request = self.begin_refresh();
        let (token, result) = fetch(self.gateway(), request).await;
        self.apply(token, result)
    }

    /// Applies a fetch result. Stale results and failures leave the display untouched.
    pub fn apply(&mut self, token: RefreshToken, result: AppResult<Vec<Ticket>>) -> RefreshOutcome {
        if token.0 != self.latest {
            debug!(
                token = token.0,
                latest = self.latest,
                "discarding stale ticket listing"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(tickets) => {
                let count = tickets.len();
                self.displayed = render_list(tickets, &self.options);
                debug!(count, "rendered ticket listing");
                RefreshOutcome::Rendered { count }
            }
            Err(err) => {
                error!(error = %err, "error fetching tickets");
                RefreshOutcome::Failed {
                    notice: Notice::warning(format!(
                        "Could not refresh tickets ({err}); showing the previous list."
                    )),
                }
            }
        }
    }
}

/// Runs one listing request; suitable for spawning onto the runtime.
pub async fn fetch(
    gateway: Arc<dyn TicketGateway>,
    request: RefreshRequest,
) -> (RefreshToken, AppResult<Vec<Ticket>>) {
    let result = gateway.list_tickets(&request.query).await;
    (request.token, result)
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;

    use super::*;
    use crate::test_helpers::{FakeGateway, Recorded, Reply, ticket_json};
    use crate::view::list::EMPTY_PLACEHOLDER;

    fn component(gateway: Arc<FakeGateway>) -> ListingComponent {
        ListingComponent::new(
            gateway,
            TicketQuery::default(),
            RenderOptions {
                time_zone: TimeZone::UTC,
            },
        )
    }

    fn displayed_ids(listing: &ListingComponent) -> Vec<String> {
        listing
            .displayed()
            .iter()
            .filter_map(ListEntry::as_card)
            .map(|card| card.ticket_id.clone())
            .collect()
    }

    #[tokio::test]
    async fn renders_fetched_tickets_newest_first() {
        let gateway = Arc::new(FakeGateway::with_replies([Reply::Json(
            serde_json::json!([ticket_json(1, "Open"), ticket_json(2, "Resolved")]),
        )]));
        let mut listing = component(gateway);

        let outcome = listing.refresh_list().await;

        assert_eq!(outcome, RefreshOutcome::Rendered { count: 2 });
        assert_eq!(displayed_ids(&listing), ["INC-2026-0002", "INC-2026-0001"]);
    }

    #[tokio::test]
    async fn renders_tickets_without_priority() {
        let mut unprioritized = ticket_json(1, "Open");
        unprioritized["priority"] = serde_json::Value::Null;
        let gateway = Arc::new(FakeGateway::with_replies([Reply::Json(
            serde_json::json!([ticket_json(2, "Open"), unprioritized]),
        )]));
        let mut listing = component(gateway);

        let outcome = listing.refresh_list().await;

        assert_eq!(outcome, RefreshOutcome::Rendered { count: 2 });
        assert_eq!(displayed_ids(&listing), ["INC-2026-0002", "INC-2026-0001"]);
    }

    #[tokio::test]
    async fn renders_placeholder_for_empty_result() {
        let gateway = Arc::new(FakeGateway::with_replies([Reply::Json(
            serde_json::json!([]),
        )]));
        let mut listing = component(gateway);

        listing.refresh_list().await;

        assert_eq!(
            listing.displayed(),
            [ListEntry::Placeholder(EMPTY_PLACEHOLDER.to_string())]
        );
    }

    #[tokio::test]
    async fn keeps_previous_list_when_fetch_fails() {
        let gateway = Arc::new(FakeGateway::with_replies([
            Reply::Json(serde_json::json!([ticket_json(5, "Open")])),
            Reply::Offline,
            Reply::Text("<html>bad gateway</html>".to_string()),
        ]));
        let mut listing = component(gateway);

        listing.refresh_list().await;
        let offline = listing.refresh_list().await;
        let garbled = listing.refresh_list().await;

        assert!(matches!(offline, RefreshOutcome::Failed { .. }));
        assert!(matches!(garbled, RefreshOutcome::Failed { .. }));
        assert_eq!(displayed_ids(&listing), ["INC-2026-0005"]);
    }

    #[tokio::test]
    async fn filter_change_queries_with_new_selection() {
        let gateway = Arc::new(FakeGateway::with_replies([Reply::Json(
            serde_json::json!([]),
        )]));
        let mut listing = component(gateway.clone());

        let request = listing.set_filter(FilterAxis::Status, FilterValue::parse(Some("Open")));
        let (token, result) = fetch(listing.gateway(), request).await;
        listing.apply(token, result);

        match gateway.recorded().as_slice() {
            [Recorded::List(query)] => {
                assert_eq!(query.query_string(), "skip=0&limit=100&status=Open")
            }
            other => panic!("unexpected requests: {other:?}"),
        }
    }

    #[tokio::test]
    async fn discards_responses_for_superseded_filters() {
        let gateway = Arc::new(FakeGateway::with_replies([
            Reply::Json(serde_json::json!([ticket_json(1, "Open")])),
            Reply::Json(serde_json::json!([ticket_json(2, "Resolved")])),
        ]));
        let mut listing = component(gateway);

        let slow = listing.set_filter(FilterAxis::Status, FilterValue::parse(Some("Open")));
        let fast = listing.set_filter(FilterAxis::Status, FilterValue::parse(Some("Resolved")));
        let slow_response = fetch(listing.gateway(), slow).await;
        let fast_response = fetch(listing.gateway(), fast).await;

        assert_eq!(
            listing.apply(fast_response.0, fast_response.1),
            RefreshOutcome::Rendered { count: 1 }
        );
        assert_eq!(
            listing.apply(slow_response.0, slow_response.1),
            RefreshOutcome::Stale
        );
        assert_eq!(displayed_ids(&listing), ["INC-2026-0002"]);
    }
}
