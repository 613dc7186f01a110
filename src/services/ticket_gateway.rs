use async_trait::async_trait;

use crate::domain::filter::TicketQuery;
use crate::domain::ticket::{CreatedTicket, Ticket, TicketDraft, TicketUpdate};
use crate::error::AppResult;

#[async_trait]
pub trait TicketGateway: Send + Sync {
    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<CreatedTicket>;
    async fn list_tickets(&self, query: &TicketQuery) -> AppResult<Vec<Ticket>>;
    async fn fetch_ticket(&self, ticket_id: &str) -> AppResult<Ticket>;
    async fn update_ticket(&self, ticket_id: &str, update: &TicketUpdate) -> AppResult<Ticket>;
    async fn download_export(&self) -> AppResult<String>;
    fn export_url(&self) -> String;
}
