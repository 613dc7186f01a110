use std::fmt;

use url::form_urlencoded;

pub const ALL: &str = "all";
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// One axis of the filter selection: either unconstrained or a concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterValue {
    #[default]
    All,
    Only(String),
}

impl FilterValue {
    /// Missing, blank and `all` values all mean "no constraint".
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => FilterValue::All,
            Some(value) if value.is_empty() || value.eq_ignore_ascii_case(ALL) => FilterValue::All,
            Some(value) => FilterValue::Only(value.to_string()),
        }
    }

    pub fn constraint(&self) -> Option<&str> {
        match self {
            FilterValue::All => None,
            FilterValue::Only(value) => Some(value),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constraint().unwrap_or(ALL))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAxis {
    Status,
    Priority,
    Category,
}

impl FilterAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterAxis::Status => "status",
            FilterAxis::Priority => "priority",
            FilterAxis::Category => "category",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "status" => Some(FilterAxis::Status),
            "priority" => Some(FilterAxis::Priority),
            "category" => Some(FilterAxis::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub status: FilterValue,
    pub priority: FilterValue,
    pub category: FilterValue,
}

impl FilterSelection {
    pub fn get(&self, axis: FilterAxis) -> &FilterValue {
        match axis {
            FilterAxis::Status => &self.status,
            FilterAxis::Priority => &self.priority,
            FilterAxis::Category => &self.category,
        }
    }

    pub fn set(&mut self, axis: FilterAxis, value: FilterValue) {
        match axis {
            FilterAxis::Status => self.status = value,
            FilterAxis::Priority => self.priority = value,
            FilterAxis::Category => self.category = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Everything needed to ask the listing endpoint for one page of tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub filters: FilterSelection,
    pub page: Page,
}

impl TicketQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.page.skip.to_string()),
            ("limit", self.page.limit.to_string()),
        ];
        for axis in [FilterAxis::Status, FilterAxis::Priority, FilterAxis::Category] {
            if let Some(value) = self.filters.get(axis).constraint() {
                pairs.push((axis.as_str(), value.to_string()));
            }
        }
        pairs
    }

    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}
