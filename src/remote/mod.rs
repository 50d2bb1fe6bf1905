//! Backend access for the dashboard.
//!
//! The TUI runs on a plain thread and must never block on the network, so
//! all backend traffic happens on a background tokio task (the worker).
//! The application sends [`ApiCommand`]s through a channel and polls for
//! [`ApiEvent`]s on every loop iteration.
//!
//! ```text
//! ┌───────────────┐  ApiCommand   ┌────────────────┐        ┌──────────────┐
//! │ App (TUI loop)│──────────────▶│ worker (tokio) │───────▶│ Backend      │
//! │               │◀──────────────│                │        │ rest|offline │
//! └───────────────┘   ApiEvent    └────────────────┘        └──────────────┘
//! ```
//!
//! Fetch commands carry a sequence number stamped by the application; a
//! resolved fetch older than the latest issued one is discarded on receipt,
//! so a slow response can never overwrite newer data.

mod client;
mod error;
mod offline;
mod worker;

pub use client::RestBackend;
pub use error::ApiError;
pub use offline::OfflineBackend;
pub use worker::connect;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::mpsc;

use crate::data::{NewTicket, Range, StatsResponse, Ticket};

/// A ticket backend: the REST API or a local file.
///
/// Mutations return the updated record so callers can replace their stored
/// copy instead of editing it in place.
#[async_trait]
pub trait Backend: Send {
    /// Human-readable description for the status bar.
    fn description(&self) -> &str;

    async fn fetch_tickets(&mut self) -> Result<Vec<Ticket>, ApiError>;

    async fn fetch_stats(&mut self, range: Range) -> Result<StatsResponse, ApiError>;

    async fn add_ticket(&mut self, new: NewTicket) -> Result<Ticket, ApiError>;

    async fn close_ticket(
        &mut self,
        ticket_id: &str,
        close_date: NaiveDate,
    ) -> Result<Ticket, ApiError>;

    async fn reopen_ticket(&mut self, ticket_id: &str) -> Result<Ticket, ApiError>;

    async fn delete_ticket(&mut self, module: &str, ticket_id: &str) -> Result<(), ApiError>;

    async fn set_breach_reason(
        &mut self,
        ticket_id: &str,
        reason: &str,
    ) -> Result<Ticket, ApiError>;
}

/// A request sent from the application to the worker.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    FetchTickets { seq: u64 },
    FetchStats { seq: u64, range: Range },
    AddTicket(NewTicket),
    CloseTicket { ticket_id: String, close_date: NaiveDate },
    ReopenTicket { ticket_id: String },
    DeleteTicket { module: String, ticket_id: String },
    SetBreachReason { ticket_id: String, reason: String },
}

/// Which mutation a [`ApiEvent::Mutation`] resulted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Close,
    Reopen,
    Delete,
    BreachReason,
}

impl MutationKind {
    pub fn label(&self) -> &'static str {
        match self {
            MutationKind::Add => "Ticket added",
            MutationKind::Close => "Ticket closed",
            MutationKind::Reopen => "Ticket reopened",
            MutationKind::Delete => "Ticket deleted",
            MutationKind::BreachReason => "Breach reason saved",
        }
    }
}

/// A completed request, delivered back to the application.
#[derive(Debug)]
pub enum ApiEvent {
    Tickets { seq: u64, result: Result<Vec<Ticket>, ApiError> },
    Stats { seq: u64, range: Range, result: Result<StatsResponse, ApiError> },
    /// Mutation outcome; `Ok(Some(ticket))` carries the updated record,
    /// `Ok(None)` means the ticket was deleted.
    Mutation { kind: MutationKind, result: Result<Option<Ticket>, ApiError> },
}

/// Handle held by the application for talking to the worker.
#[derive(Debug)]
pub struct Remote {
    commands: mpsc::UnboundedSender<ApiCommand>,
    events: mpsc::UnboundedReceiver<ApiEvent>,
    description: String,
}

impl Remote {
    /// Send a command to the worker. Errors (worker gone) are ignored;
    /// the main loop surfaces the condition when events stop arriving.
    pub fn send(&self, command: ApiCommand) {
        let _ = self.commands.send(command);
    }

    /// Poll for the next completed request without blocking.
    pub fn poll(&mut self) -> Option<ApiEvent> {
        self.events.try_recv().ok()
    }

    /// Returns a description of the connected backend.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Create a remote with both channel ends exposed.
    ///
    /// Used by tests to drive the application without a worker task.
    pub fn channel(description: &str) -> (RemoteProbe, Remote) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (evt_tx, evt_rx) = mpsc::unbounded_channel();
        let remote = Remote {
            commands: cmd_tx,
            events: evt_rx,
            description: description.to_string(),
        };
        (RemoteProbe { commands: cmd_rx, events: evt_tx }, remote)
    }

    pub(crate) fn from_parts(
        commands: mpsc::UnboundedSender<ApiCommand>,
        events: mpsc::UnboundedReceiver<ApiEvent>,
        description: String,
    ) -> Self {
        Self { commands, events, description }
    }
}

/// The worker-side ends of a [`Remote::channel`] pair.
#[derive(Debug)]
pub struct RemoteProbe {
    pub commands: mpsc::UnboundedReceiver<ApiCommand>,
    pub events: mpsc::UnboundedSender<ApiEvent>,
}
