//! Background request dispatch.
//!
//! Owns the backend and processes commands one at a time on a tokio task,
//! sending each outcome back to the application as an [`ApiEvent`].

use tokio::sync::mpsc;
use tracing::{debug, error};

use super::{ApiCommand, ApiEvent, Backend, MutationKind, Remote};

/// Spawn a worker task for the given backend and return the application's
/// handle to it. Must be called from within a tokio runtime.
pub fn connect<B: Backend + 'static>(mut backend: B) -> Remote {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<ApiCommand>();
    let (evt_tx, evt_rx) = mpsc::unbounded_channel::<ApiEvent>();
    let description = backend.description().to_string();

    tokio::spawn(async move {
        while let Some(command) = cmd_rx.recv().await {
            debug!("dispatching {:?}", command);
            let event = dispatch(&mut backend, command).await;
            if evt_tx.send(event).is_err() {
                // Application gone, stop the worker.
                break;
            }
        }
        debug!("worker stopped");
    });

    Remote::from_parts(cmd_tx, evt_rx, description)
}

async fn dispatch<B: Backend>(backend: &mut B, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::FetchTickets { seq } => {
            let result = backend.fetch_tickets().await;
            if let Err(ref e) = result {
                error!("ticket fetch failed: {}", e);
            }
            ApiEvent::Tickets { seq, result }
        }
        ApiCommand::FetchStats { seq, range } => {
            let result = backend.fetch_stats(range).await;
            if let Err(ref e) = result {
                error!("stats fetch failed: {}", e);
            }
            ApiEvent::Stats { seq, range, result }
        }
        ApiCommand::AddTicket(new) => ApiEvent::Mutation {
            kind: MutationKind::Add,
            result: backend.add_ticket(new).await.map(Some),
        },
        ApiCommand::CloseTicket { ticket_id, close_date } => ApiEvent::Mutation {
            kind: MutationKind::Close,
            result: backend.close_ticket(&ticket_id, close_date).await.map(Some),
        },
        ApiCommand::ReopenTicket { ticket_id } => ApiEvent::Mutation {
            kind: MutationKind::Reopen,
            result: backend.reopen_ticket(&ticket_id).await.map(Some),
        },
        ApiCommand::DeleteTicket { module, ticket_id } => ApiEvent::Mutation {
            kind: MutationKind::Delete,
            result: backend.delete_ticket(&module, &ticket_id).await.map(|()| None),
        },
        ApiCommand::SetBreachReason { ticket_id, reason } => ApiEvent::Mutation {
            kind: MutationKind::BreachReason,
            result: backend.set_breach_reason(&ticket_id, &reason).await.map(Some),
        },
    }
}
