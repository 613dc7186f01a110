use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::filter::TicketQuery;
use crate::domain::ticket::{CreatedTicket, Ticket, TicketDraft, TicketUpdate};
use crate::error::{AppError, AppResult};
use crate::services::{Navigator, TicketGateway};

pub const FAKE_EXPORT_URL: &str = "http://helpdesk.test/tickets/export";

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Text(String),
    Status(u16),
    Offline,
}

impl Reply {
    fn into_json<T: DeserializeOwned>(self) -> AppResult<T> {
        match self {
            Reply::Json(value) => {
                serde_json::from_value(value).map_err(|err| AppError::Decode(err.to_string()))
            }
            Reply::Text(text) => Err(AppError::Decode(format!("not json: {text}"))),
            other => Err(other.into_error()),
        }
    }

    fn into_text(self) -> AppResult<String> {
        match self {
            Reply::Text(text) => Ok(text),
            Reply::Json(value) => Ok(value.to_string()),
            other => Err(other.into_error()),
        }
    }

    fn into_error(self) -> AppError {
        match self {
            Reply::Status(status) => AppError::Http {
                status,
                body: String::new(),
            },
            _ => AppError::Transport("connection refused".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Recorded {
    Create(TicketDraft),
    List(TicketQuery),
    Fetch(String),
    Update(String, TicketUpdate),
    Export,
}

/// Gateway double that answers from a queue of canned replies.
#[derive(Default)]
pub struct FakeGateway {
    replies: Mutex<VecDeque<Reply>>,
    recorded: Mutex<Vec<Recorded>>,
}

impl FakeGateway {
    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    fn next(&self, request: Recorded) -> Reply {
        self.recorded.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Offline)
    }
}

#[async_trait]
impl TicketGateway for FakeGateway {
    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<CreatedTicket> {
        self.next(Recorded::Create(draft.clone())).into_json()
    }

    async fn list_tickets(&self, query: &TicketQuery) -> AppResult<Vec<Ticket>> {
        self.next(Recorded::List(query.clone())).into_json()
    }

    async fn fetch_ticket(&self, ticket_id: &str) -> AppResult<Ticket> {
        self.next(Recorded::Fetch(ticket_id.to_string())).into_json()
    }

    async fn update_ticket(&self, ticket_id: &str, update: &TicketUpdate) -> AppResult<Ticket> {
        self.next(Recorded::Update(ticket_id.to_string(), update.clone()))
            .into_json()
    }

    async fn download_export(&self) -> AppResult<String> {
        self.next(Recorded::Export).into_text()
    }

    fn export_url(&self) -> String {
        FAKE_EXPORT_URL.to_string()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> AppResult<()> {
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn ticket_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "ticket_id": format!("INC-2026-{id:04}"),
        "user_name": "ana",
        "category": "Incident Report",
        "issue_type": "System error",
        "description": format!("Ticket number {id}"),
        "context": null,
        "priority": "Medium",
        "status": status,
        "severity": null,
        "created_at": "2026-01-05T10:00:00",
        "updated_at": "2026-01-05T10:00:00",
        "resolved_at": null
    })
}
