//! Application state and navigation logic.

use std::time::Instant;

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::data::{
    format_incident_log, reshape_trend_series, sort_for_display, Action, NewTicket, Range,
    Session, Ticket, TicketStatus, TrendChart, FAILED_LOG_TEXT,
};
use crate::remote::{ApiCommand, ApiError, ApiEvent, Remote};
use crate::ui::tickets::{sort_tickets_by, SortColumn};
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// The ticket detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// All tickets with status and SLA urgency.
    Tickets,
    /// Trend chart of raised/open/closed/breached counts.
    Trends,
    /// The plain-text incident log.
    Log,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Tickets => View::Trends,
            View::Trends => View::Log,
            View::Log => View::Tickets,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Tickets => View::Log,
            View::Trends => View::Tickets,
            View::Log => View::Trends,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Tickets => "Tickets",
            View::Trends => "Trends",
            View::Log => "Log",
        }
    }
}

/// Module options offered by the add-ticket form.
pub const MODULE_OPTIONS: [&str; 5] =
    ["Module A", "Module B", "Module C", "Module D", "Module E"];

/// Which field of the add-ticket form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TicketId,
    Module,
    Date,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::TicketId => FormField::Module,
            FormField::Module => FormField::Date,
            FormField::Date => FormField::TicketId,
        }
    }
}

/// In-progress state of the add-ticket overlay form.
#[derive(Debug, Clone)]
pub struct AddTicketForm {
    pub ticket_id: String,
    pub module_index: usize,
    pub date: String,
    pub focus: FormField,
}

impl AddTicketForm {
    /// Create a blank form with the date defaulting to today.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            ticket_id: String::new(),
            module_index: 0,
            date: today.to_string(),
            focus: FormField::TicketId,
        }
    }

    pub fn module(&self) -> &'static str {
        MODULE_OPTIONS[self.module_index % MODULE_OPTIONS.len()]
    }

    pub fn next_module(&mut self) {
        self.module_index = (self.module_index + 1) % MODULE_OPTIONS.len();
    }

    pub fn prev_module(&mut self) {
        self.module_index = (self.module_index + MODULE_OPTIONS.len() - 1) % MODULE_OPTIONS.len();
    }

    /// Validate the form, returning the payload or a message to show.
    ///
    /// Malformed input never reaches the backend.
    pub fn validate(&self) -> Result<NewTicket, String> {
        let ticket_id = self.ticket_id.trim();
        if ticket_id.is_empty() {
            return Err("Ticket ID is required".to_string());
        }
        let date_logged = self
            .date
            .trim()
            .parse::<NaiveDate>()
            .map_err(|_| format!("Invalid date: {} (expected YYYY-MM-DD)", self.date))?;

        Ok(NewTicket {
            ticket_id: ticket_id.to_string(),
            module: self.module().to_string(),
            date_logged,
        })
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Backend
    remote: Remote,
    pub session: Session,

    // Data
    pub tickets: Vec<Ticket>,
    pub tickets_loaded: bool,
    pub chart: Option<TrendChart>,
    pub range: Range,
    pub log_text: String,
    pub load_error: Option<String>,
    pub last_updated: Option<Instant>,

    // Navigation state
    pub selected_index: usize,
    pub log_scroll: u16,

    // Sorting (Tickets view)
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // Input overlays
    pub add_form: Option<AddTicketForm>,
    pub reason_input: Option<String>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,

    // Request sequencing: fetches resolved out of order are discarded
    // unless they match the latest issued sequence number.
    next_seq: u64,
    latest_ticket_seq: u64,
    latest_stats_seq: u64,
}

impl App {
    /// Create a new App over the given backend handle and session.
    pub fn new(remote: Remote, session: Session) -> Self {
        Self {
            running: true,
            current_view: View::Tickets,
            show_help: false,
            show_detail_overlay: false,
            remote,
            session,
            tickets: Vec::new(),
            tickets_loaded: false,
            chart: None,
            range: Range::default(),
            log_text: String::new(),
            load_error: None,
            last_updated: None,
            selected_index: 0,
            log_scroll: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            add_form: None,
            reason_input: None,
            theme: Theme::auto_detect(),
            status_message: None,
            next_seq: 0,
            latest_ticket_seq: 0,
            latest_stats_seq: 0,
        }
    }

    /// Returns a description of the connected backend.
    pub fn source_description(&self) -> &str {
        self.remote.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Request a fresh ticket list from the backend.
    pub fn request_tickets(&mut self) {
        let seq = self.next_seq();
        self.latest_ticket_seq = seq;
        self.remote.send(ApiCommand::FetchTickets { seq });
    }

    /// Request fresh stats for the current range.
    pub fn request_stats(&mut self) {
        let seq = self.next_seq();
        self.latest_stats_seq = seq;
        self.remote.send(ApiCommand::FetchStats { seq, range: self.range });
    }

    /// Refresh everything: tickets (which drive the log text) and stats.
    pub fn refresh(&mut self) {
        self.request_tickets();
        self.request_stats();
    }

    /// Cycle the trend chart to the next time range and refetch.
    pub fn cycle_range(&mut self) {
        self.range = self.range.next();
        self.request_stats();
    }

    /// Drain completed requests from the worker and fold them into state.
    pub fn poll_remote(&mut self) {
        while let Some(event) = self.remote.poll() {
            match event {
                ApiEvent::Tickets { seq, result } => {
                    if seq != self.latest_ticket_seq {
                        // Stale response from an older request; a newer one
                        // is already in flight.
                        continue;
                    }
                    match result {
                        Ok(tickets) => self.apply_tickets(tickets),
                        Err(e) => {
                            self.log_text = FAILED_LOG_TEXT.to_string();
                            self.handle_api_error(e);
                        }
                    }
                }
                ApiEvent::Stats { seq, result, .. } => {
                    if seq != self.latest_stats_seq {
                        continue;
                    }
                    match result {
                        Ok(stats) => self.chart = Some(reshape_trend_series(&stats)),
                        // Keep the previous chart on failure.
                        Err(e) => self.handle_api_error(e),
                    }
                }
                ApiEvent::Mutation { kind, result } => match result {
                    Ok(updated) => {
                        if let Some(ticket) = updated {
                            self.replace_ticket(ticket);
                        }
                        self.set_status_message(kind.label().to_string());
                        self.refresh();
                    }
                    Err(e) => {
                        let label = kind.label();
                        let message = format!("{} failed: {}", label, e);
                        self.handle_api_error(e);
                        self.set_status_message(message);
                    }
                },
            }
        }
    }

    fn handle_api_error(&mut self, error: ApiError) {
        if matches!(error, ApiError::Auth) {
            self.session.expire();
            self.load_error =
                Some("session expired: sign in again and restart with a fresh token".to_string());
        } else {
            self.load_error = Some(error.to_string());
        }
    }

    fn apply_tickets(&mut self, mut tickets: Vec<Ticket>) {
        sort_for_display(&mut tickets);
        self.tickets = tickets;
        self.tickets_loaded = true;
        self.load_error = None;
        self.last_updated = Some(Instant::now());
        self.log_text = format_incident_log(&self.tickets, Local::now());

        // Clamp selection
        if self.selected_index >= self.tickets.len() {
            self.selected_index = self.tickets.len().saturating_sub(1);
        }
    }

    /// Replace the stored copy of a ticket with the updated record
    /// returned by a mutation.
    fn replace_ticket(&mut self, updated: Ticket) {
        if let Some(slot) = self
            .tickets
            .iter_mut()
            .find(|t| t.ticket_id == updated.ticket_id && t.module == updated.module)
        {
            *slot = updated;
        }
    }

    /// Switch to the next view (cycles through Tickets → Trends → Log).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item (or scroll the log).
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item (or scroll the log).
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Tickets => {
                let max = self.filtered_ticket_count().saturating_sub(1);
                self.selected_index = (self.selected_index + n).min(max);
            }
            View::Log => {
                let max = self.log_text.lines().count().saturating_sub(1) as u16;
                self.log_scroll = (self.log_scroll + n as u16).min(max);
            }
            View::Trends => {}
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Tickets => {
                self.selected_index = self.selected_index.saturating_sub(n);
            }
            View::Log => {
                self.log_scroll = self.log_scroll.saturating_sub(n as u16);
            }
            View::Trends => {}
        }
    }

    /// Jump to the first item.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Tickets => self.selected_index = 0,
            View::Log => self.log_scroll = 0,
            View::Trends => {}
        }
    }

    /// Jump to the last item.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Tickets => {
                self.selected_index = self.filtered_ticket_count().saturating_sub(1);
            }
            View::Log => {
                self.log_scroll = self.log_text.lines().count().saturating_sub(1) as u16;
            }
            View::Trends => {}
        }
    }

    /// Count of tickets after applying the filter.
    pub fn filtered_ticket_count(&self) -> usize {
        if self.filter_text.is_empty() {
            return self.tickets.len();
        }
        self.tickets.iter().filter(|t| self.matches_filter(t)).count()
    }

    /// Check if a ticket matches the current filter text.
    pub fn matches_filter(&self, ticket: &Ticket) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        let search = self.filter_text.to_lowercase();
        ticket.ticket_id.to_lowercase().contains(&search)
            || ticket.module.to_lowercase().contains(&search)
    }

    /// Get the selected ticket, resolving the visual (filtered + sorted)
    /// row index back to the underlying list.
    pub fn selected_ticket(&self) -> Option<&Ticket> {
        let mut visible: Vec<(usize, &Ticket)> = self
            .tickets
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches_filter(t))
            .collect();
        sort_tickets_by(&mut visible, self.sort_column, self.sort_ascending);
        visible.get(self.selected_index).map(|(_, t)| *t)
    }

    /// Open the detail overlay for the currently selected ticket.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Tickets && self.selected_ticket().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlays first, then return to the Tickets view.
    pub fn go_back(&mut self) {
        if self.reason_input.is_some() {
            self.reason_input = None;
            return;
        }
        if self.add_form.is_some() {
            self.add_form = None;
            return;
        }
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != View::Tickets {
            self.current_view = View::Tickets;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column (Tickets view).
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    fn check_permission(&mut self, action: Action) -> bool {
        if self.session.allows(action) {
            true
        } else {
            self.set_status_message(format!(
                "Not permitted: {} requires more than the {} role",
                action.label(),
                self.session.role().label()
            ));
            false
        }
    }

    /// Open the add-ticket form, if the role permits.
    pub fn open_add_form(&mut self) {
        if self.check_permission(Action::AddTicket) {
            self.add_form = Some(AddTicketForm::new(Local::now().date_naive()));
        }
    }

    /// Validate and submit the add-ticket form.
    pub fn submit_add_form(&mut self) {
        let Some(ref form) = self.add_form else {
            return;
        };
        match form.validate() {
            Ok(new) => {
                self.remote.send(ApiCommand::AddTicket(new));
                self.add_form = None;
            }
            Err(message) => self.set_status_message(message),
        }
    }

    /// Close the selected ticket with today as the closure date.
    pub fn close_selected(&mut self) {
        if !self.check_permission(Action::CloseTicket) {
            return;
        }
        let Some(ticket) = self.selected_ticket() else {
            return;
        };
        if ticket.status != TicketStatus::Open {
            self.set_status_message("Ticket is already closed".to_string());
            return;
        }
        self.remote.send(ApiCommand::CloseTicket {
            ticket_id: ticket.ticket_id.clone(),
            close_date: Local::now().date_naive(),
        });
    }

    /// Reopen the selected (closed) ticket.
    pub fn reopen_selected(&mut self) {
        if !self.check_permission(Action::ReopenTicket) {
            return;
        }
        let Some(ticket) = self.selected_ticket() else {
            return;
        };
        if ticket.status != TicketStatus::Closed {
            self.set_status_message("Ticket is not closed".to_string());
            return;
        }
        self.remote.send(ApiCommand::ReopenTicket { ticket_id: ticket.ticket_id.clone() });
    }

    /// Delete the selected ticket (admin only).
    pub fn delete_selected(&mut self) {
        if !self.check_permission(Action::DeleteTicket) {
            return;
        }
        let Some(ticket) = self.selected_ticket() else {
            return;
        };
        self.remote.send(ApiCommand::DeleteTicket {
            module: ticket.module.clone(),
            ticket_id: ticket.ticket_id.clone(),
        });
    }

    /// Start entering a breach reason for the selected breached ticket.
    pub fn start_reason_edit(&mut self) {
        if !self.check_permission(Action::EditBreachReason) {
            return;
        }
        let Some(ticket) = self.selected_ticket() else {
            return;
        };
        if ticket.status != TicketStatus::Open || ticket.days_to_sla >= 0 {
            self.set_status_message("Breach reasons apply to open, breached tickets".to_string());
            return;
        }
        self.reason_input = Some(String::new());
    }

    /// Submit the breach reason being edited.
    pub fn submit_reason(&mut self) {
        let Some(reason) = self.reason_input.take() else {
            return;
        };
        let reason = reason.trim().to_string();
        if reason.is_empty() {
            self.set_status_message("Breach reason cannot be empty".to_string());
            return;
        }
        let Some(ticket) = self.selected_ticket() else {
            return;
        };
        self.remote.send(ApiCommand::SetBreachReason {
            ticket_id: ticket.ticket_id.clone(),
            reason,
        });
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current incident log text to a file.
    pub fn export_log(&self, path: &std::path::Path) -> Result<()> {
        if self.log_text.is_empty() {
            anyhow::bail!("No incident log to export");
        }
        std::fs::write(path, &self.log_text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::Role;
    use crate::remote::{ApiEvent, MutationKind, Remote, RemoteProbe};

    fn ticket(ticket_id: &str, module: &str, days_to_sla: i32) -> Ticket {
        Ticket {
            id: None,
            ticket_id: ticket_id.to_string(),
            module: module.to_string(),
            date_logged: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            days_to_sla,
            status: TicketStatus::Open,
            day_closed: None,
            breached_date: None,
            breach_reason: None,
        }
    }

    fn test_app(role: Role) -> (RemoteProbe, App) {
        let (probe, remote) = Remote::channel("test");
        (probe, App::new(remote, Session::new(role)))
    }

    #[test]
    fn test_refresh_stamps_increasing_sequence_numbers() {
        let (mut probe, mut app) = test_app(Role::Admin);
        app.refresh();
        app.refresh();

        let mut ticket_seqs = Vec::new();
        while let Ok(cmd) = probe.commands.try_recv() {
            if let ApiCommand::FetchTickets { seq } = cmd {
                ticket_seqs.push(seq);
            }
        }
        assert_eq!(ticket_seqs.len(), 2);
        assert!(ticket_seqs[1] > ticket_seqs[0]);
    }

    #[test]
    fn test_stale_ticket_response_is_discarded() {
        let (probe, mut app) = test_app(Role::Admin);
        app.refresh(); // seq 1 (tickets), seq 2 (stats)
        app.refresh(); // seq 3 (tickets), seq 4 (stats)

        // The older request resolves last-but-one; its data must not land.
        probe
            .events
            .send(ApiEvent::Tickets { seq: 1, result: Ok(vec![ticket("stale", "A", 1)]) })
            .unwrap();
        probe
            .events
            .send(ApiEvent::Tickets { seq: 3, result: Ok(vec![ticket("fresh", "A", 1)]) })
            .unwrap();
        app.poll_remote();

        assert_eq!(app.tickets.len(), 1);
        assert_eq!(app.tickets[0].ticket_id, "fresh");
    }

    #[test]
    fn test_ticket_fetch_failure_sets_fallback_log() {
        let (probe, mut app) = test_app(Role::Admin);
        app.request_tickets();

        probe
            .events
            .send(ApiEvent::Tickets {
                seq: 1,
                result: Err(ApiError::Transport("connection refused".to_string())),
            })
            .unwrap();
        app.poll_remote();

        assert_eq!(app.log_text, FAILED_LOG_TEXT);
        assert!(app.load_error.is_some());
    }

    #[test]
    fn test_auth_failure_expires_session() {
        let (probe, mut app) = test_app(Role::Admin);
        app.request_tickets();
        assert!(app.session.allows(Action::DeleteTicket));

        probe.events.send(ApiEvent::Tickets { seq: 1, result: Err(ApiError::Auth) }).unwrap();
        app.poll_remote();

        assert!(!app.session.is_active());
        assert!(!app.session.allows(Action::DeleteTicket));
        assert!(app.load_error.as_deref().unwrap_or("").contains("session expired"));
    }

    #[test]
    fn test_successful_tickets_build_log_and_sort() {
        let (probe, mut app) = test_app(Role::Admin);
        app.request_tickets();

        let mut closed = ticket("1", "A", 1);
        closed.status = TicketStatus::Closed;
        let open = ticket("2", "B", 0);

        probe
            .events
            .send(ApiEvent::Tickets { seq: 1, result: Ok(vec![closed, open]) })
            .unwrap();
        app.poll_remote();

        // Open tickets sort first for display.
        assert_eq!(app.tickets[0].ticket_id, "2");
        assert!(app.log_text.contains("Number of open tickets: 1"));
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_mutation_replaces_stored_record() {
        let (probe, mut app) = test_app(Role::Admin);
        app.request_tickets();
        probe
            .events
            .send(ApiEvent::Tickets { seq: 1, result: Ok(vec![ticket("1", "A", 1)]) })
            .unwrap();
        app.poll_remote();

        let mut updated = ticket("1", "A", 1);
        updated.status = TicketStatus::Closed;
        probe
            .events
            .send(ApiEvent::Mutation { kind: MutationKind::Close, result: Ok(Some(updated)) })
            .unwrap();
        app.poll_remote();

        assert_eq!(app.tickets[0].status, TicketStatus::Closed);
        assert_eq!(app.get_status_message(), Some("Ticket closed"));
    }

    #[test]
    fn test_viewer_cannot_issue_mutations() {
        let (mut probe, mut app) = test_app(Role::Viewer);
        app.tickets = vec![ticket("1", "A", 1)];

        app.close_selected();
        app.delete_selected();
        app.open_add_form();

        assert!(probe.commands.try_recv().is_err());
        assert!(app.add_form.is_none());
        assert!(app.get_status_message().unwrap().contains("Not permitted"));
    }

    #[test]
    fn test_close_selected_sends_command() {
        let (mut probe, mut app) = test_app(Role::User);
        app.tickets = vec![ticket("1", "A", 1)];

        app.close_selected();
        match probe.commands.try_recv().unwrap() {
            ApiCommand::CloseTicket { ticket_id, .. } => assert_eq!(ticket_id, "1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_user_cannot_delete() {
        let (mut probe, mut app) = test_app(Role::User);
        app.tickets = vec![ticket("1", "A", 1)];

        app.delete_selected();
        assert!(probe.commands.try_recv().is_err());
    }

    #[test]
    fn test_form_validation_blocks_submission() {
        let (mut probe, mut app) = test_app(Role::Admin);
        app.open_add_form();

        // Empty ticket id
        app.submit_add_form();
        assert!(app.add_form.is_some());
        assert!(probe.commands.try_recv().is_err());

        // Bad date
        if let Some(form) = app.add_form.as_mut() {
            form.ticket_id = "42".to_string();
            form.date = "19/06/2024".to_string();
        }
        app.submit_add_form();
        assert!(app.add_form.is_some());
        assert!(probe.commands.try_recv().is_err());

        // Valid input submits and closes the form
        if let Some(form) = app.add_form.as_mut() {
            form.date = "2024-06-19".to_string();
        }
        app.submit_add_form();
        assert!(app.add_form.is_none());
        match probe.commands.try_recv().unwrap() {
            ApiCommand::AddTicket(new) => {
                assert_eq!(new.ticket_id, "42");
                assert_eq!(new.module, "Module A");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_reason_edit_requires_breached_open_ticket() {
        let (_probe, mut app) = test_app(Role::User);
        app.tickets = vec![ticket("1", "A", 2)];

        app.start_reason_edit();
        assert!(app.reason_input.is_none());

        app.tickets = vec![ticket("1", "A", -1)];
        app.start_reason_edit();
        assert!(app.reason_input.is_some());
    }

    #[test]
    fn test_filter_matches_id_and_module() {
        let (_probe, mut app) = test_app(Role::Viewer);
        app.tickets = vec![ticket("1234", "Module A", 1), ticket("99", "Module B", 1)];

        app.filter_text = "module b".to_string();
        assert_eq!(app.filtered_ticket_count(), 1);

        app.filter_text = "12".to_string();
        assert_eq!(app.filtered_ticket_count(), 1);

        app.filter_text.clear();
        assert_eq!(app.filtered_ticket_count(), 2);
    }

    #[test]
    fn test_go_back_unwinds_overlays_in_order() {
        let (_probe, mut app) = test_app(Role::Admin);
        app.current_view = View::Log;
        app.show_detail_overlay = true;
        app.reason_input = Some(String::new());

        app.go_back();
        assert!(app.reason_input.is_none());
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);
        assert_eq!(app.current_view, View::Log);

        app.go_back();
        assert_eq!(app.current_view, View::Tickets);
    }

    #[test]
    fn test_cycle_range_refetches_stats() {
        let (mut probe, mut app) = test_app(Role::Viewer);
        app.cycle_range();
        assert_eq!(app.range, Range::Weekly);

        match probe.commands.try_recv().unwrap() {
            ApiCommand::FetchStats { range, .. } => assert_eq!(range, Range::Weekly),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
