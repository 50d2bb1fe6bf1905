//! Data models and pure transformations.
//!
//! This module holds everything that can be computed without touching the
//! network: the ticket model itself, the incident log formatter, the trend
//! chart reshaper, and session/role capabilities.
//!
//! ## Submodules
//!
//! - [`ticket`]: Ticket and stats models matching the backend JSON
//! - [`log`]: SLA-bucketed incident log text generation
//! - [`chart`]: Pivoting per-category stats onto a shared label axis
//! - [`session`]: Role capability checks and session lifecycle
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Ticket> (fetched) ──▶ log::format_incident_log() ──▶ report text
//! StatsResponse (fetched) ─▶ chart::reshape_trend_series() ─▶ TrendChart
//! ```

pub mod chart;
pub mod log;
pub mod session;
pub mod ticket;

pub use chart::{reshape_trend_series, TrendChart, TrendSeries};
pub use log::{format_incident_log, FAILED_LOG_TEXT};
pub use session::{Action, Role, Session};
pub use ticket::{
    sort_for_display, NewTicket, Range, SlaSeverity, StatPoint, StatsResponse, Ticket,
    TicketStatus,
};
