//! Ticket and statistics models.
//!
//! These types match the JSON produced by the incident tracker backend.
//! They are the common format between the REST API (or an offline file)
//! and the dashboard.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    /// Returns the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::Closed => "Closed",
        }
    }
}

/// A tracked incident record.
///
/// `days_to_sla` counts remaining days until the SLA deadline; negative
/// means the deadline has already passed. `breached_date` and
/// `breach_reason` are only set once a ticket has breached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Database id assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Human-facing identifier, unique within a module.
    pub ticket_id: String,
    /// Category tag (which system module the incident belongs to).
    pub module: String,
    /// Calendar date the ticket was opened.
    pub date_logged: NaiveDate,
    /// Signed count of days remaining until the SLA deadline.
    pub days_to_sla: i32,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_closed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breached_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breach_reason: Option<String>,
}

impl Ticket {
    /// Returns `"<module> <ticketId>"`, the reference format used in the
    /// incident log.
    pub fn reference(&self) -> String {
        format!("{} {}", self.module, self.ticket_id)
    }

    /// SLA severity for display purposes.
    pub fn severity(&self) -> SlaSeverity {
        match self.status {
            TicketStatus::Closed => SlaSeverity::Closed,
            TicketStatus::Open => {
                if self.days_to_sla < 0 {
                    SlaSeverity::Breached
                } else if self.days_to_sla == 0 {
                    SlaSeverity::DueToday
                } else {
                    SlaSeverity::OnTrack
                }
            }
        }
    }

    /// True if the ticket is open, past its SLA, and has no recorded
    /// breach reason yet. These are the tickets that need a reason entered.
    pub fn needs_breach_reason(&self) -> bool {
        self.status == TicketStatus::Open && self.days_to_sla < 0 && self.breach_reason.is_none()
    }
}

/// SLA urgency grouping for a single ticket, used for row styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaSeverity {
    Breached,
    DueToday,
    OnTrack,
    Closed,
}

/// Payload for creating a new ticket.
///
/// The backend computes `daysToSla`, sets the status to Open and stamps
/// the breached date if the logged date is already past SLA.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub ticket_id: String,
    pub module: String,
    pub date_logged: NaiveDate,
}

/// One observation of a named category at a time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatPoint {
    pub label: String,
    pub count: u64,
}

/// Per-category time series as returned by `GET /tickets/stats`.
///
/// Maps category name (Raised, Open, Closed, Breached) to an ordered
/// sequence of points. Categories are not guaranteed to share labels.
pub type StatsResponse = BTreeMap<String, Vec<StatPoint>>;

/// Time bucketing for the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Range {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Range {
    /// Wire name expected by the stats endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Range::Daily => "Daily",
            Range::Weekly => "Weekly",
            Range::Monthly => "Monthly",
        }
    }

    /// Cycle to the next range.
    pub fn next(self) -> Self {
        match self {
            Range::Daily => Range::Weekly,
            Range::Weekly => Range::Monthly,
            Range::Monthly => Range::Daily,
        }
    }
}

impl std::str::FromStr for Range {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Range::Daily),
            "weekly" => Ok(Range::Weekly),
            "monthly" => Ok(Range::Monthly),
            other => Err(format!("invalid range: {other}")),
        }
    }
}

/// Sort tickets for display: open tickets first, then oldest logged date
/// first within each group.
pub fn sort_for_display(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| {
        let open_first = match (a.status, b.status) {
            (TicketStatus::Open, TicketStatus::Closed) => Ordering::Less,
            (TicketStatus::Closed, TicketStatus::Open) => Ordering::Greater,
            _ => Ordering::Equal,
        };
        open_first.then_with(|| a.date_logged.cmp(&b.date_logged))
    });
}
