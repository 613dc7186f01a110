use async_trait::async_trait;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::filter::TicketQuery;
use crate::domain::ticket::{CreatedTicket, Ticket, TicketDraft, TicketUpdate};
use crate::error::{AppError, AppResult};
use crate::services::TicketGateway;

pub struct HttpTicketGateway {
    http: Client,
    base_url: String,
}

impl HttpTicketGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn tickets_endpoint(&self) -> String {
        format!("{}/tickets", self.base_url.trim_end_matches('/'))
    }

    fn ticket_endpoint(&self, ticket_id: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.tickets_endpoint())
            .map_err(|err| AppError::Configuration(format!("invalid API base URL: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("API base URL cannot hold a path".to_string()))?
            .push(ticket_id.trim());
        Ok(url)
    }

    fn listing_url(&self, query: &TicketQuery) -> String {
        format!("{}?{}", self.tickets_endpoint(), query.query_string())
    }

    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        Err(AppError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        Self::check_status(response)
            .await?
            .json::<T>()
            .await
            .map_err(|err| AppError::Decode(format!("failed to parse response: {err}")))
    }
}

fn transport(err: reqwest::Error) -> AppError {
    AppError::Transport(format!("failed to reach ticket API: {err}"))
}

fn not_found_as(ticket_id: &str, err: AppError) -> AppError {
    match err {
        AppError::Http { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            AppError::NotFound(ticket_id.to_string())
        }
        other => other,
    }
}

#[async_trait]
impl TicketGateway for HttpTicketGateway {
    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<CreatedTicket> {
        debug!(fields = draft.len(), "submitting ticket");
        let response = self
            .http
            .post(self.tickets_endpoint())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(draft)
            .send()
            .await
            .map_err(transport)?;

        Self::read_json(response).await
    }

    async fn list_tickets(&self, query: &TicketQuery) -> AppResult<Vec<Ticket>> {
        let url = self.listing_url(query);
        debug!(%url, "fetching tickets");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        Self::read_json(response).await
    }

    async fn fetch_ticket(&self, ticket_id: &str) -> AppResult<Ticket> {
        let url = self.ticket_endpoint(ticket_id)?;
        debug!(%url, "fetching ticket");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        Self::read_json(response)
            .await
            .map_err(|err| not_found_as(ticket_id, err))
    }

    async fn update_ticket(&self, ticket_id: &str, update: &TicketUpdate) -> AppResult<Ticket> {
        let url = self.ticket_endpoint(ticket_id)?;
        debug!(%url, "updating ticket");
        let response = self
            .http
            .put(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(update)
            .send()
            .await
            .map_err(transport)?;

        Self::read_json(response)
            .await
            .map_err(|err| not_found_as(ticket_id, err))
    }

    async fn download_export(&self) -> AppResult<String> {
        let response = self
            .http
            .get(self.export_url())
            .send()
            .await
            .map_err(transport)?;

        Self::check_status(response)
            .await?
            .text()
            .await
            .map_err(|err| AppError::Decode(format!("failed to read export: {err}")))
    }

    fn export_url(&self) -> String {
        format!("{}/export", self.tickets_endpoint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{FilterValue, TicketQuery};

    #[test]
    fn builds_endpoints_from_base_url() {
        let gateway = HttpTicketGateway::new("http://localhost:8000/");
        assert_eq!(gateway.tickets_endpoint(), "http://localhost:8000/tickets");
        assert_eq!(gateway.export_url(), "http://localhost:8000/tickets/export");
    }

    #[test]
    fn escapes_ticket_identifiers_in_paths() {
        let gateway = HttpTicketGateway::new("http://localhost:8000");
        let url = gateway.ticket_endpoint("INC 2026/1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/tickets/INC%202026%2F1");
    }

    #[test]
    fn appends_query_to_listing_url() {
        let gateway = HttpTicketGateway::new("http://helpdesk.test/api");
        let mut query = TicketQuery::default();
        query.filters.priority = FilterValue::Only("Critical".to_string());
        assert_eq!(
            gateway.listing_url(&query),
            "http://helpdesk.test/api/tickets?skip=0&limit=100&priority=Critical"
        );
    }

    #[test]
    fn maps_missing_tickets_to_not_found() {
        let err = not_found_as(
            "INC-9",
            AppError::Http {
                status: 404,
                body: "{}".to_string(),
            },
        );
        assert!(matches!(err, AppError::NotFound(id) if id == "INC-9"));

        let err = not_found_as(
            "INC-9",
            AppError::Http {
                status: 500,
                body: String::new(),
            },
        );
        assert!(matches!(err, AppError::Http { status: 500, .. }));
    }
}
