// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # incidentwatch
//!
//! A terminal dashboard and library for tracking incident tickets against
//! their SLA windows.
//!
//! This crate talks to a ticket-tracking REST API (or a local JSON file for
//! offline use), renders the ticket list, per-category trend charts, and a
//! plain-text incident log, and lets operators add, close, reopen, and
//! annotate tickets without leaving the terminal.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(processing)   │(rendering)   │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ remote  │◀── RestBackend | OfflineBackend                │
//! │  │ (async) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`remote`]**: Backend abstraction ([`Backend`] trait) with REST and
//!   offline-file implementations, driven by a background worker task
//! - **[`data`]**: Pure data processing - the ticket model, the incident log
//!   formatter, the trend chart reshaper, and role capabilities
//! - **[`ui`]**: Terminal rendering using ratatui - the ticket table, trend
//!   chart, log pane, overlays, and theme support
//!
//! ## Features
//!
//! - **Tickets view**: All tickets with SLA urgency, sortable and filterable
//! - **Trends view**: Raised/open/closed/breached counts over time
//! - **Log view**: The SLA-bucketed incident log, exportable to a text file
//! - **Role gating**: Admin/user/viewer capabilities enforced client-side
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Connect to a ticket API
//! incidentwatch --url http://localhost:8080 --token $TOKEN --role admin
//!
//! # Browse a local ticket dump offline
//! incidentwatch --file tickets.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use incidentwatch::app::App;
//! use incidentwatch::data::{Role, Session};
//! use incidentwatch::remote::{self, OfflineBackend};
//!
//! # tokio_test::block_on(async {
//! let backend = OfflineBackend::load("tickets.json")?;
//! let remote = remote::connect(backend);
//! let mut app = App::new(remote, Session::new(Role::User));
//! app.refresh();
//! # Ok::<_, anyhow::Error>(())
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod remote;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{Range, Role, Session, StatsResponse, Ticket, TicketStatus, TrendChart};
pub use remote::{Backend, OfflineBackend, Remote, RestBackend};
