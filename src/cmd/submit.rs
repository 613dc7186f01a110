use std::process::ExitCode;

use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::submission::{SubmissionComponent, TicketForm};

#[derive(Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Name of the person reporting the issue.
    #[arg(long)]
    pub user_name: Option<String>,
    /// Ticket category, e.g. "Access Request" or "Incident Report".
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub issue_type: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// How the issue came about.
    #[arg(long)]
    pub context: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// Extra form field as name=value. Repeatable; later values win.
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

impl SubmitArgs {
    pub fn to_form(&self) -> TicketForm {
        let mut form = TicketForm::new();
        let named = [
            ("user_name", &self.user_name),
            ("category", &self.category),
            ("issue_type", &self.issue_type),
            ("description", &self.description),
            ("context", &self.context),
            ("priority", &self.priority),
        ];
        for (name, value) in named {
            if let Some(value) = value {
                form.set(name, value.as_str());
            }
        }
        for (name, value) in &self.fields {
            form.set(name.as_str(), value.as_str());
        }
        form
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name missing in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

pub async fn run(ctx: &AppContext, args: SubmitArgs) -> AppResult<ExitCode> {
    let mut form = args.to_form();
    let component = SubmissionComponent::new(ctx.gateway.clone());

    let outcome = component.submit(&mut form).await;
    let notice = outcome.notice();

    match outcome.confirmation() {
        Some(ticket_id) => {
            println!("{notice}");
            println!("Ticket ID: {ticket_id}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_assignments() {
        assert_eq!(
            parse_field("severity=SEV-2"),
            Ok(("severity".to_string(), "SEV-2".to_string()))
        );
        assert_eq!(
            parse_field("notes=a=b"),
            Ok(("notes".to_string(), "a=b".to_string()))
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn extra_fields_override_named_flags() {
        let args = SubmitArgs {
            user_name: Some("ana".to_string()),
            priority: Some("Medium".to_string()),
            fields: vec![("priority".to_string(), "High".to_string())],
            ..SubmitArgs::default()
        };

        let draft = args.to_form().to_draft();

        assert_eq!(draft.get("user_name"), Some("ana"));
        assert_eq!(draft.get("priority"), Some("High"));
        assert_eq!(draft.get("context"), None);
    }
}
