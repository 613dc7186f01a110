use crate::domain::ticket::TicketUpdate;
use crate::error::{AppError, AppResult};
use crate::services::TicketGateway;
use crate::view::list::ViewAction;
use crate::view::{RenderOptions, TicketDetail};

pub async fn view_ticket(
    gateway: &dyn TicketGateway,
    action: &ViewAction,
    options: &RenderOptions,
) -> AppResult<TicketDetail> {
    let ticket_id = action.ticket_id.trim();
    if ticket_id.is_empty() {
        return Err(AppError::Configuration(
            "ticket id must not be empty".to_string(),
        ));
    }

    let ticket = gateway.fetch_ticket(ticket_id).await?;
    Ok(TicketDetail::from_ticket(&ticket, options))
}

pub async fn update_ticket(
    gateway: &dyn TicketGateway,
    ticket_id: &str,
    update: TicketUpdate,
    options: &RenderOptions,
) -> AppResult<TicketDetail> {
    let ticket_id = ticket_id.trim();
    if ticket_id.is_empty() {
        return Err(AppError::Configuration(
            "ticket id must not be empty".to_string(),
        ));
    }
    if update.is_empty() {
        return Err(AppError::Configuration(
            "nothing to update; pass --status, --priority, --severity or --notes".to_string(),
        ));
    }

    let ticket = gateway.update_ticket(ticket_id, &update).await?;
    Ok(TicketDetail::from_ticket(&ticket, options))
}
