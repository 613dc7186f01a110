use clap::Args;

use crate::context::AppContext;
use crate::domain::ticket::TicketUpdate;
use crate::error::AppResult;
use crate::workflow::detail::update_ticket;

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    pub ticket_id: String,
    /// New workflow status, e.g. "In Progress" or "Resolved".
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub severity: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

pub async fn run(ctx: &AppContext, args: UpdateArgs) -> AppResult<()> {
    let update = TicketUpdate {
        status: args.status,
        priority: args.priority,
        severity: args.severity,
        notes: args.notes,
    };
    let detail = update_ticket(ctx.gateway.as_ref(), &args.ticket_id, update, &ctx.render).await?;
    println!("Ticket updated.\n{detail}");
    Ok(())
}
