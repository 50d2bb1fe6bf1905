//! Terminal UI rendering.
//!
//! Each view has its own module; `common` holds the chrome shared by all
//! of them (header, tabs, status bar, help overlay).

pub mod common;
pub mod detail;
pub mod form;
pub mod log;
pub mod theme;
pub mod tickets;
pub mod trends;

pub use theme::Theme;
