use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::ticket::TicketDraft;
use crate::error::AppError;
use crate::services::TicketGateway;
use crate::view::Notice;

pub const SUBMIT_FAILED: &str = "Error submitting ticket. Please try again.";
pub const NETWORK_FAILED: &str = "Network error. Check the log for details.";

/// Named field values entered for a new ticket, in entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketForm {
    entries: Vec<(String, String)>,
}

impl TicketForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn to_draft(&self) -> TicketDraft {
        TicketDraft::from_entries(
            self.entries
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
    }
}

/// A 2xx reply whose body cannot be decoded counts as `Rejected`; only
/// transport failures are `NetworkFailure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted { ticket_id: String },
    Rejected { reason: String },
    NetworkFailure,
}

impl SubmissionOutcome {
    pub fn confirmation(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Submitted { ticket_id } => Some(ticket_id.as_str()),
            _ => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            SubmissionOutcome::Submitted { ticket_id } => {
                Notice::success(format!("Ticket {ticket_id} submitted."))
            }
            SubmissionOutcome::Rejected { .. } => Notice::error(SUBMIT_FAILED),
            SubmissionOutcome::NetworkFailure => Notice::error(NETWORK_FAILED),
        }
    }
}

pub struct SubmissionComponent {
    gateway: Arc<dyn TicketGateway>,
}

impl SubmissionComponent {
    pub fn new(gateway: Arc<dyn TicketGateway>) -> Self {
        Self { gateway }
    }

    /// Posts the form once. The form is cleared only when the ticket was created.
    pub async fn submit(&self, form: &mut TicketForm) -> SubmissionOutcome {
        let draft = form.to_draft();

        match self.gateway.create_ticket(&draft).await {
            Ok(created) => {
                info!(ticket_id = %created.ticket_id, "ticket submitted");
                form.reset();
                SubmissionOutcome::Submitted {
                    ticket_id: created.ticket_id,
                }
            }
            Err(err @ AppError::Transport(_)) => {
                error!(error = %err, "ticket submission could not reach the API");
                SubmissionOutcome::NetworkFailure
            }
            Err(err) => {
                warn!(error = %err, "ticket submission rejected");
                SubmissionOutcome::Rejected {
                    reason: err.to_string(),
                }
            }
        }
    }
}
