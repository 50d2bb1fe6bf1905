//! Offline file backend.
//!
//! Serves tickets from a local JSON file instead of the REST API. Useful
//! for demos and for exercising the dashboard without a backend. Mutations
//! are applied in memory and written back to the file, and the same SLA
//! recalculation the backend performs runs on every fetch.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::debug;

use super::{ApiError, Backend};
use crate::data::{NewTicket, Range, StatPoint, StatsResponse, Ticket, TicketStatus};

/// Days allowed between logging a ticket and its SLA deadline.
const SLA_WINDOW_DAYS: i64 = 5;

/// Backend implementation over a local tickets JSON file.
#[derive(Debug)]
pub struct OfflineBackend {
    path: PathBuf,
    tickets: Vec<Ticket>,
    description: String,
}

impl OfflineBackend {
    /// Load tickets from the given JSON file (an array of tickets).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ApiError> {
        let path = path.as_ref().to_path_buf();
        let content =
            fs::read_to_string(&path).map_err(|e| ApiError::Storage(e.to_string()))?;
        let tickets: Vec<Ticket> =
            serde_json::from_str(&content).map_err(|e| ApiError::Parse(e.to_string()))?;
        let description = format!("file: {}", path.display());
        Ok(Self { path, tickets, description })
    }

    fn persist(&self) -> Result<(), ApiError> {
        let json = serde_json::to_string_pretty(&self.tickets)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Recompute days-to-SLA for every ticket, stamping the breached date
    /// when an open ticket crosses its deadline.
    fn refresh_sla(&mut self, today: NaiveDate) {
        for ticket in &mut self.tickets {
            let elapsed = (today - ticket.date_logged).num_days();
            ticket.days_to_sla = (SLA_WINDOW_DAYS - elapsed) as i32;

            if ticket.breached_date.is_none()
                && ticket.days_to_sla < 0
                && ticket.status == TicketStatus::Open
            {
                ticket.breached_date = Some(today);
            }
        }
    }

    fn find_mut(&mut self, ticket_id: &str) -> Result<&mut Ticket, ApiError> {
        self.tickets
            .iter_mut()
            .find(|t| t.ticket_id == ticket_id)
            .ok_or_else(|| ApiError::NotFound(ticket_id.to_string()))
    }

    fn label_for(date: NaiveDate, range: Range) -> String {
        match range {
            Range::Daily => date.format("%Y-%m-%d").to_string(),
            // ISO year + week, zero-padded so lexicographic order is
            // chronological order.
            Range::Weekly => date.format("%G-%V").to_string(),
            Range::Monthly => date.format("%Y-%m").to_string(),
        }
    }

    fn count_series(counts: BTreeMap<String, u64>) -> Vec<StatPoint> {
        counts.into_iter().map(|(label, count)| StatPoint { label, count }).collect()
    }
}

#[async_trait]
impl Backend for OfflineBackend {
    fn description(&self) -> &str {
        &self.description
    }

    async fn fetch_tickets(&mut self) -> Result<Vec<Ticket>, ApiError> {
        self.refresh_sla(Local::now().date_naive());
        debug!("offline: serving {} tickets", self.tickets.len());
        Ok(self.tickets.clone())
    }

    async fn fetch_stats(&mut self, range: Range) -> Result<StatsResponse, ApiError> {
        let mut raised: BTreeMap<String, u64> = BTreeMap::new();
        let mut open: BTreeMap<String, u64> = BTreeMap::new();
        let mut closed: BTreeMap<String, u64> = BTreeMap::new();
        let mut breached: BTreeMap<String, u64> = BTreeMap::new();

        for ticket in &self.tickets {
            *raised.entry(Self::label_for(ticket.date_logged, range)).or_default() += 1;
            if ticket.status == TicketStatus::Open {
                *open.entry(Self::label_for(ticket.date_logged, range)).or_default() += 1;
            }
            if let Some(day) = ticket.day_closed {
                *closed.entry(Self::label_for(day, range)).or_default() += 1;
            }
            if let Some(day) = ticket.breached_date {
                *breached.entry(Self::label_for(day, range)).or_default() += 1;
            }
        }

        let mut stats = StatsResponse::new();
        stats.insert("Raised".to_string(), Self::count_series(raised));
        stats.insert("Open".to_string(), Self::count_series(open));
        stats.insert("Closed".to_string(), Self::count_series(closed));
        stats.insert("Breached".to_string(), Self::count_series(breached));
        Ok(stats)
    }

    async fn add_ticket(&mut self, new: NewTicket) -> Result<Ticket, ApiError> {
        let today = Local::now().date_naive();
        let days_to_sla = (SLA_WINDOW_DAYS - (today - new.date_logged).num_days()) as i32;

        let ticket = Ticket {
            id: None,
            ticket_id: new.ticket_id,
            module: new.module,
            date_logged: new.date_logged,
            days_to_sla,
            status: TicketStatus::Open,
            day_closed: None,
            breached_date: (days_to_sla < 0).then_some(today),
            breach_reason: None,
        };
        self.tickets.push(ticket.clone());
        self.persist()?;
        Ok(ticket)
    }

    async fn close_ticket(
        &mut self,
        ticket_id: &str,
        close_date: NaiveDate,
    ) -> Result<Ticket, ApiError> {
        let updated = {
            let ticket = self.find_mut(ticket_id)?;
            ticket.status = TicketStatus::Closed;
            ticket.day_closed = Some(close_date);
            ticket.clone()
        };
        self.persist()?;
        Ok(updated)
    }

    async fn reopen_ticket(&mut self, ticket_id: &str) -> Result<Ticket, ApiError> {
        let updated = {
            let ticket = self.find_mut(ticket_id)?;
            ticket.status = TicketStatus::Open;
            ticket.day_closed = None;
            ticket.breached_date = None;
            ticket.breach_reason = None;
            ticket.clone()
        };
        self.persist()?;
        Ok(updated)
    }

    async fn delete_ticket(&mut self, module: &str, ticket_id: &str) -> Result<(), ApiError> {
        let before = self.tickets.len();
        self.tickets.retain(|t| !(t.ticket_id == ticket_id && t.module == module));
        if self.tickets.len() == before {
            return Err(ApiError::NotFound(ticket_id.to_string()));
        }
        self.persist()
    }

    async fn set_breach_reason(
        &mut self,
        ticket_id: &str,
        reason: &str,
    ) -> Result<Ticket, ApiError> {
        let updated = {
            let ticket = self.find_mut(ticket_id)?;
            ticket.breach_reason = Some(reason.to_string());
            ticket.clone()
        };
        self.persist()?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::Duration;
    use tempfile::NamedTempFile;

    use super::*;

    fn sample_file(tickets: &[Ticket]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(tickets).unwrap()).unwrap();
        file.flush().unwrap();
        file
    }

    fn ticket(ticket_id: &str, module: &str, logged_days_ago: i64) -> Ticket {
        Ticket {
            id: None,
            ticket_id: ticket_id.to_string(),
            module: module.to_string(),
            date_logged: Local::now().date_naive() - Duration::days(logged_days_ago),
            days_to_sla: 0,
            status: TicketStatus::Open,
            day_closed: None,
            breached_date: None,
            breach_reason: None,
        }
    }

    #[tokio::test]
    async fn test_load_and_fetch_recomputes_sla() {
        let file = sample_file(&[ticket("1", "Module A", 2), ticket("2", "Module B", 8)]);
        let mut backend = OfflineBackend::load(file.path()).unwrap();

        let tickets = backend.fetch_tickets().await.unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].days_to_sla, 3);
        assert_eq!(tickets[1].days_to_sla, -3);

        // Crossing the deadline stamps today's date as the breach date.
        assert!(tickets[0].breached_date.is_none());
        assert_eq!(tickets[1].breached_date, Some(Local::now().date_naive()));
    }

    #[tokio::test]
    async fn test_close_and_reopen() {
        let file = sample_file(&[ticket("1", "Module A", 8)]);
        let mut backend = OfflineBackend::load(file.path()).unwrap();
        let _ = backend.fetch_tickets().await.unwrap();

        let close_date = NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
        let closed = backend.close_ticket("1", close_date).await.unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        assert_eq!(closed.day_closed, Some(close_date));

        // Reopening clears closure and breach bookkeeping.
        let reopened = backend.reopen_ticket("1").await.unwrap();
        assert_eq!(reopened.status, TicketStatus::Open);
        assert!(reopened.day_closed.is_none());
        assert!(reopened.breached_date.is_none());
        assert!(reopened.breach_reason.is_none());
    }

    #[tokio::test]
    async fn test_add_ticket_computes_fields() {
        let file = sample_file(&[]);
        let mut backend = OfflineBackend::load(file.path()).unwrap();

        let added = backend
            .add_ticket(NewTicket {
                ticket_id: "42".to_string(),
                module: "Module C".to_string(),
                date_logged: Local::now().date_naive() - Duration::days(7),
            })
            .await
            .unwrap();

        assert_eq!(added.status, TicketStatus::Open);
        assert_eq!(added.days_to_sla, -2);
        assert!(added.breached_date.is_some());
    }

    #[tokio::test]
    async fn test_delete_by_module_and_id() {
        let file = sample_file(&[ticket("1", "Module A", 0), ticket("1", "Module B", 0)]);
        let mut backend = OfflineBackend::load(file.path()).unwrap();

        backend.delete_ticket("Module A", "1").await.unwrap();
        let tickets = backend.fetch_tickets().await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].module, "Module B");

        let err = backend.delete_ticket("Module A", "1").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_breach_reason() {
        let file = sample_file(&[ticket("1", "Module A", 8)]);
        let mut backend = OfflineBackend::load(file.path()).unwrap();

        let updated = backend.set_breach_reason("1", "vendor outage").await.unwrap();
        assert_eq!(updated.breach_reason.as_deref(), Some("vendor outage"));

        let err = backend.set_breach_reason("404", "x").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mutations_persist_to_file() {
        let file = sample_file(&[ticket("1", "Module A", 0)]);
        {
            let mut backend = OfflineBackend::load(file.path()).unwrap();
            backend.close_ticket("1", Local::now().date_naive()).await.unwrap();
        }

        // A fresh load sees the closed ticket.
        let mut reloaded = OfflineBackend::load(file.path()).unwrap();
        let tickets = reloaded.fetch_tickets().await.unwrap();
        assert_eq!(tickets[0].status, TicketStatus::Closed);
    }

    #[tokio::test]
    async fn test_stats_grouping() {
        let mut closed = ticket("1", "Module A", 0);
        closed.status = TicketStatus::Closed;
        closed.day_closed = NaiveDate::from_ymd_opt(2024, 6, 18);

        let file = sample_file(&[closed, ticket("2", "Module B", 0)]);
        let mut backend = OfflineBackend::load(file.path()).unwrap();

        let stats = backend.fetch_stats(Range::Daily).await.unwrap();
        // All four categories are always present.
        for key in ["Raised", "Open", "Closed", "Breached"] {
            assert!(stats.contains_key(key), "missing category {key}");
        }
        assert_eq!(stats["Raised"].iter().map(|p| p.count).sum::<u64>(), 2);
        assert_eq!(stats["Open"].iter().map(|p| p.count).sum::<u64>(), 1);
        assert_eq!(stats["Closed"], vec![StatPoint {
            label: "2024-06-18".to_string(),
            count: 1,
        }]);
    }

    #[tokio::test]
    async fn test_weekly_and_monthly_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(OfflineBackend::label_for(date, Range::Daily), "2024-01-03");
        assert_eq!(OfflineBackend::label_for(date, Range::Weekly), "2024-01");
        assert_eq!(OfflineBackend::label_for(date, Range::Monthly), "2024-01");
    }

    #[test]
    fn test_load_missing_file() {
        let err = OfflineBackend::load("/nonexistent/tickets.json").unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not valid json").unwrap();
        let err = OfflineBackend::load(file.path()).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
