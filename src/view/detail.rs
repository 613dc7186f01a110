use std::fmt;

use crate::domain::ticket::Ticket;
use crate::view::list::{RenderOptions, resolution_label};

const NOT_SET: &str = "-";

/// Full field listing for a single ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetail {
    pub ticket_id: String,
    pub rows: Vec<(&'static str, String)>,
    pub description: String,
    pub context: Option<String>,
}

impl TicketDetail {
    pub fn from_ticket(ticket: &Ticket, options: &RenderOptions) -> Self {
        let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_SET.to_string());
        let rows = vec![
            ("Status", ticket.status.clone()),
            ("Priority", optional(&ticket.priority)),
            ("Severity", optional(&ticket.severity)),
            ("Category", optional(&ticket.category)),
            ("Issue type", ticket.issue_type.clone()),
            ("Submitted by", ticket.user_name.clone()),
            ("Created", ticket.created_at.format_in(&options.time_zone)),
            (
                "Updated",
                ticket
                    .updated_at
                    .map(|time| time.format_in(&options.time_zone))
                    .unwrap_or_else(|| NOT_SET.to_string()),
            ),
            (
                "Resolved",
                ticket
                    .resolved_at
                    .map(|time| time.format_in(&options.time_zone))
                    .unwrap_or_else(|| NOT_SET.to_string()),
            ),
            (
                "Resolution time",
                resolution_label(ticket).unwrap_or_else(|| NOT_SET.to_string()),
            ),
        ];

        Self {
            ticket_id: ticket.ticket_id.clone(),
            rows,
            description: ticket.description.clone(),
            context: ticket
                .context
                .as_deref()
                .map(str::trim)
                .filter(|context| !context.is_empty())
                .map(str::to_string),
        }
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for TicketDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.ticket_id)?;
        let width = self.rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in &self.rows {
            writeln!(f, "  {name:<width$}  {value}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.description)?;
        if let Some(context) = &self.context {
            write!(f, "\n\nContext:\n{context}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;

    use super::*;
    use crate::domain::ticket::TicketTime;

    #[test]
    fn renders_every_field_with_placeholders() {
        let ticket = Ticket {
            id: 3,
            ticket_id: "INC-2026-0003".to_string(),
            status: "Resolved".to_string(),
            priority: Some("Critical".to_string()),
            issue_type: "System error".to_string(),
            description: "Database crash after patch".to_string(),
            user_name: "lee".to_string(),
            category: Some("Incident Report".to_string()),
            context: Some("   ".to_string()),
            severity: None,
            created_at: TicketTime::parse("2026-01-05T10:00:00").unwrap(),
            updated_at: None,
            resolved_at: Some(TicketTime::parse("2026-01-05T13:00:00").unwrap()),
        };
        let options = RenderOptions {
            time_zone: TimeZone::UTC,
        };

        let detail = TicketDetail::from_ticket(&ticket, &options);

        assert_eq!(detail.field("Category"), Some("Incident Report"));
        assert_eq!(detail.field("Severity"), Some(NOT_SET));
        assert_eq!(detail.field("Resolved"), Some("2026-01-05 13:00"));
        assert_eq!(detail.field("Resolution time"), Some("3.0 hrs"));
        assert!(detail.context.is_none());
        assert!(detail.to_string().starts_with("INC-2026-0003\n"));
    }
}
