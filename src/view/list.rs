//! Pure rendering of a ticket result set into display entries.
//!
//! Nothing here touches the terminal; the CLI prints the entries through
//! their `Display` impls.

use std::fmt;

use jiff::tz::TimeZone;

use crate::domain::ticket::Ticket;

pub const EMPTY_PLACEHOLDER: &str = "No tickets found.";
pub const SUMMARY_CHARS: usize = 100;
pub const UNSET_PRIORITY: &str = "Unset";
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub time_zone: TimeZone,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            time_zone: TimeZone::system(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub class: String,
}

impl Badge {
    fn new(kind: &str, label: &str) -> Self {
        let token: String = label.split_whitespace().collect();
        Self {
            label: label.to_string(),
            class: format!("{kind}-{token}"),
        }
    }
}

/// Action attached to every card; resolves to a detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAction {
    pub ticket_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCard {
    pub ticket_id: String,
    pub status: Badge,
    pub priority: Badge,
    pub issue_type: String,
    pub summary: String,
    pub user_name: String,
    pub created: String,
    pub resolution: Option<String>,
    pub action: ViewAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Placeholder(String),
    Ticket(TicketCard),
}

impl ListEntry {
    pub fn as_card(&self) -> Option<&TicketCard> {
        match self {
            ListEntry::Ticket(card) => Some(card),
            ListEntry::Placeholder(_) => None,
        }
    }
}

pub fn render_list(mut tickets: Vec<Ticket>, options: &RenderOptions) -> Vec<ListEntry> {
    if tickets.is_empty() {
        return vec![ListEntry::Placeholder(EMPTY_PLACEHOLDER.to_string())];
    }

    tickets.sort_by(|a, b| b.id.cmp(&a.id));
    tickets
        .iter()
        .map(|ticket| ListEntry::Ticket(render_card(ticket, options)))
        .collect()
}

pub fn render_card(ticket: &Ticket, options: &RenderOptions) -> TicketCard {
    TicketCard {
        ticket_id: ticket.ticket_id.clone(),
        status: Badge::new("status", &ticket.status),
        priority: Badge::new(
            "priority",
            ticket.priority.as_deref().unwrap_or(UNSET_PRIORITY),
        ),
        issue_type: ticket.issue_type.clone(),
        summary: summarize(&ticket.description),
        user_name: ticket.user_name.clone(),
        created: ticket.created_at.format_in(&options.time_zone),
        resolution: resolution_label(ticket),
        action: ViewAction {
            ticket_id: ticket.ticket_id.clone(),
        },
    }
}

/// First characters of the description, always followed by an ellipsis.
pub fn summarize(description: &str) -> String {
    let mut summary: String = description.chars().take(SUMMARY_CHARS).collect();
    summary.push_str(ELLIPSIS);
    summary
}

/// Hours to resolution at one decimal, with exact halves rounded away from zero.
pub fn resolution_label(ticket: &Ticket) -> Option<String> {
    ticket.resolution_hours().map(|hours| {
        let tenths = (hours * 10.0).round() / 10.0;
        format!("{tenths:.1} hrs")
    })
}

impl fmt::Display for TicketCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}  [{}] [{}]",
            self.ticket_id, self.status.label, self.priority.label
        )?;
        writeln!(f, "    {}", self.issue_type)?;
        writeln!(f, "    {}", self.summary)?;
        write!(f, "    {} · {}", self.user_name, self.created)?;
        if let Some(resolution) = &self.resolution {
            write!(f, " · resolved in {resolution}")?;
        }
        write!(f, "\n    view details: show {}", self.action.ticket_id)
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListEntry::Placeholder(text) => write!(f, "    {text}"),
            ListEntry::Ticket(card) => fmt::Display::fmt(card, f),
        }
    }
}
