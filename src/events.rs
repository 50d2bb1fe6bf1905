use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, FormField, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Text-entry overlays capture all keystrokes
    if app.reason_input.is_some() {
        handle_reason_input(app, key);
        return;
    }
    if app.add_form.is_some() {
        handle_form_input(app, key);
        return;
    }

    // If the detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.show_detail_overlay = false;
            }
            // Allow scrolling through tickets while the overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            // Ticket actions stay available from the overlay
            KeyCode::Char('c') => app.close_selected(),
            KeyCode::Char('o') => app.reopen_selected(),
            KeyCode::Char('d') => app.delete_selected(),
            KeyCode::Char('b') => app.start_reason_edit(),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access (ticket detail is overlay-only, via Enter)
        KeyCode::Char('1') => app.set_view(View::Tickets),
        KeyCode::Char('2') => app.set_view(View::Trends),
        KeyCode::Char('3') => app.set_view(View::Log),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Refresh
        KeyCode::Char('r') => app.refresh(),

        // Cycle the trend chart range
        KeyCode::Char('R') => app.cycle_range(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Ticket actions (Tickets view)
        KeyCode::Char('a') => {
            if app.current_view == View::Tickets {
                app.open_add_form();
            }
        }
        KeyCode::Char('c') => {
            if app.current_view == View::Tickets && !app.filter_text.is_empty() {
                app.clear_filter();
            } else if app.current_view == View::Tickets {
                app.close_selected();
            }
        }
        KeyCode::Char('o') => {
            if app.current_view == View::Tickets {
                app.reopen_selected();
            }
        }
        KeyCode::Char('d') => {
            if app.current_view == View::Tickets {
                app.delete_selected();
            }
        }
        KeyCode::Char('b') => {
            if app.current_view == View::Tickets {
                app.start_reason_edit();
            }
        }

        // Sorting (Tickets view)
        KeyCode::Char('s') => {
            if app.current_view == View::Tickets {
                app.cycle_sort();
            }
        }
        KeyCode::Char('S') => {
            if app.current_view == View::Tickets {
                app.toggle_sort_direction();
            }
        }

        // Filter (start typing to filter)
        KeyCode::Char('/') => {
            if app.current_view == View::Tickets {
                app.start_filter();
            }
        }

        // Export the incident log
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("incident_log.txt");
            match app.export_log(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle key input while the breach reason editor is open
fn handle_reason_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_reason(),
        KeyCode::Esc => {
            app.reason_input = None;
        }
        KeyCode::Backspace => {
            if let Some(reason) = app.reason_input.as_mut() {
                reason.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(reason) = app.reason_input.as_mut() {
                reason.push(c);
            }
        }
        _ => {}
    }
}

/// Handle key input while the add-ticket form is open
fn handle_form_input(app: &mut App, key: KeyEvent) {
    let Some(form) = app.add_form.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.add_form = None;
        }
        KeyCode::Enter => app.submit_add_form(),
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::Up | KeyCode::BackTab => {
            // Two steps forward in a three-field cycle is one step back
            form.focus = form.focus.next().next();
        }
        KeyCode::Left => {
            if form.focus == FormField::Module {
                form.prev_module();
            }
        }
        KeyCode::Right => {
            if form.focus == FormField::Module {
                form.next_module();
            }
        }
        KeyCode::Backspace => match form.focus {
            FormField::TicketId => {
                form.ticket_id.pop();
            }
            FormField::Date => {
                form.date.pop();
            }
            FormField::Module => {}
        },
        KeyCode::Char(c) => match form.focus {
            FormField::TicketId => form.ticket_id.push(c),
            FormField::Date => form.date.push(c),
            FormField::Module => {}
        },
        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    // Overlays only take keyboard input
    if app.add_form.is_some() || app.reason_input.is_some() {
        return;
    }

    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Content area clicks select ticket rows
            if clicked_row > content_start_row && app.current_view == View::Tickets {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                if item_row < app.filtered_ticket_count() {
                    app.selected_index = item_row;
                }
            }

            // Tab clicks (row 1, after the header)
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Tickets (0-11), Trends (12-22), Log (23-30)
                if col < 12 {
                    app.set_view(View::Tickets);
                } else if col < 23 {
                    app.set_view(View::Trends);
                } else if col < 31 {
                    app.set_view(View::Log);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}
