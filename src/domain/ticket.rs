use std::collections::BTreeMap;
use std::fmt;

use jiff::tz::TimeZone;
use jiff::{Timestamp, civil};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{AppError, AppResult};

const MILLIS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// Instant reported by the ticket API.
///
/// The server emits naive UTC date-times; values carrying an explicit offset
/// are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TicketTime(Timestamp);

impl TicketTime {
    pub fn parse(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        if let Ok(timestamp) = trimmed.parse::<Timestamp>() {
            return Ok(Self(timestamp));
        }

        let naive = trimmed
            .parse::<civil::DateTime>()
            .map_err(|err| AppError::Decode(format!("invalid timestamp '{trimmed}': {err}")))?;
        let zoned = naive
            .to_zoned(TimeZone::UTC)
            .map_err(|err| AppError::Decode(format!("invalid timestamp '{trimmed}': {err}")))?;
        Ok(Self(zoned.timestamp()))
    }

    pub fn from_millisecond(millis: i64) -> AppResult<Self> {
        Timestamp::from_millisecond(millis)
            .map(Self)
            .map_err(|err| AppError::Decode(format!("timestamp out of range: {err}")))
    }

    pub fn as_millisecond(&self) -> i64 {
        self.0.as_millisecond()
    }

    pub fn format_in(&self, time_zone: &TimeZone) -> String {
        self.0
            .to_zoned(time_zone.clone())
            .strftime("%Y-%m-%d %H:%M")
            .to_string()
    }
}

impl fmt::Display for TicketTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for TicketTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TicketTime::parse(&raw).map_err(de::Error::custom)
    }
}

/// A ticket record as returned by the listing and lookup endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub ticket_id: String,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    pub issue_type: String,
    pub description: String,
    pub user_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    pub created_at: TicketTime,
    #[serde(default)]
    pub updated_at: Option<TicketTime>,
    #[serde(default)]
    pub resolved_at: Option<TicketTime>,
}

impl Ticket {
    /// Hours between creation and resolution, if the ticket is resolved.
    pub fn resolution_hours(&self) -> Option<f64> {
        self.resolved_at.map(|resolved| {
            let elapsed = resolved.as_millisecond() - self.created_at.as_millisecond();
            elapsed as f64 / MILLIS_PER_HOUR
        })
    }
}

/// Unvalidated form fields for a new ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TicketDraft {
    fields: BTreeMap<String, String>,
}

impl TicketDraft {
    /// Later entries with the same name replace earlier ones.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = entries
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTicket {
    pub ticket_id: String,
}

/// Partial update sent to the ticket API; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.severity.is_none()
            && self.notes.is_none()
    }
}
