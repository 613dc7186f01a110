use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::view::list::ViewAction;
use crate::workflow::detail::view_ticket;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Display identifier, e.g. INC-2026-0001.
    pub ticket_id: String,
}

pub async fn run(ctx: &AppContext, args: ShowArgs) -> AppResult<()> {
    let action = ViewAction {
        ticket_id: args.ticket_id,
    };
    let detail = view_ticket(ctx.gateway.as_ref(), &action, &ctx.render).await?;
    println!("{detail}");
    Ok(())
}
