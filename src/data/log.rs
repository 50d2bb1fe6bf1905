//! Plain-text incident log generation.
//!
//! Turns the full ticket list into the report text shown in the Log view,
//! bucketed by SLA urgency. The output format is fixed; teams paste it
//! verbatim into their daily incident channel.

use chrono::{DateTime, Datelike, Local};

use super::ticket::{Ticket, TicketStatus};

/// Number of SLA urgency buckets. Bucket 0 is "already breached";
/// bucket 6 collapses everything five or more days out.
pub const BUCKET_COUNT: usize = 7;

/// Fixed text substituted by the caller when the ticket fetch fails.
pub const FAILED_LOG_TEXT: &str = "Failed to load incident log.";

/// Bucket index for an open ticket with the given days-to-SLA.
pub fn bucket_index(days_to_sla: i32) -> usize {
    if days_to_sla < 0 {
        0
    } else {
        (days_to_sla + 1).min(6) as usize
    }
}

/// Section header for a bucket, including the trailing space the
/// downstream consumers expect.
fn bucket_header(index: usize) -> String {
    match index {
        0 => "BREACHED SLA: ".to_string(),
        1 => "SLA TODAY: ".to_string(),
        2 => "1 day to SLA: ".to_string(),
        i => format!("{} days to SLA: ", i - 1),
    }
}

/// Produce the incident log text for the given tickets at the given time.
///
/// Sections, in order: header timestamp, open-ticket count, tickets that
/// breached SLA during `now`'s calendar month (count, comma-joined ids,
/// then one reason line per ticket), then the seven SLA buckets. Empty
/// buckets still print their header. Inputs are not mutated; within a
/// bucket, tickets keep their original list order.
pub fn format_incident_log(tickets: &[Ticket], now: DateTime<Local>) -> String {
    let mut open_count = 0usize;
    let mut buckets: [Vec<String>; BUCKET_COUNT] = Default::default();

    for ticket in tickets {
        if ticket.status == TicketStatus::Open {
            open_count += 1;
            buckets[bucket_index(ticket.days_to_sla)].push(ticket.reference());
        }
    }

    // en-GB short style with the colon stripped, e.g. "19 Jun 2024 1435"
    let formatted_time = now.format("%d %b %Y %H%M");

    let mut log = String::new();
    log.push_str(&format!("Last Updated: {}\n\n", formatted_time));
    log.push_str(&format!("Number of open tickets: {}\n\n", open_count));

    // Tickets whose breach fell in the current calendar month, open or not.
    let breached_this_month: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| {
            t.breached_date
                .map(|d| d.month() == now.month() && d.year() == now.year())
                .unwrap_or(false)
        })
        .collect();

    let breached_ids: Vec<String> = breached_this_month.iter().map(|t| t.reference()).collect();

    log.push_str(&format!(
        "Number of breached SLA tickets for this month: {}",
        breached_ids.len()
    ));
    if breached_ids.is_empty() {
        log.push('\n');
    } else {
        log.push_str(&format!(" ({})\n", breached_ids.join(", ")));
        for ticket in &breached_this_month {
            log.push_str(&format!(
                "{}: {}\n",
                ticket.reference(),
                ticket.breach_reason.as_deref().unwrap_or("no reason provided")
            ));
        }
    }
    log.push('\n');

    for (i, bucket) in buckets.iter().enumerate() {
        if i == 0 {
            log.push_str(&bucket_header(i));
        } else {
            log.push('\n');
            log.push_str(&bucket_header(i));
        }
        log.push('\n');
        for entry in bucket {
            log.push_str(&format!("- {}\n", entry));
        }
    }

    log
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::data::ticket::TicketStatus;

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

    fn at(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, 14, 35, 0).unwrap()
    }

    #[test]
    fn test_bucket_index_boundaries() {
        assert_eq!(bucket_index(-10), 0);
        assert_eq!(bucket_index(-1), 0);
        assert_eq!(bucket_index(0), 1);
        assert_eq!(bucket_index(1), 2);
        assert_eq!(bucket_index(4), 5);
        assert_eq!(bucket_index(5), 6);
        assert_eq!(bucket_index(99), 6);
    }

    #[test]
    fn test_two_open_tickets_land_in_first_buckets() {
        let tickets = vec![ticket("1", "A", -2), ticket("2", "B", 0)];
        let log = format_incident_log(&tickets, at(2024, 6, 19));

        assert!(log.contains("Number of open tickets: 2"));

        // Breached ticket appears only under BREACHED SLA, today's only
        // under SLA TODAY.
        let breached_section =
            &log[log.find("BREACHED SLA:").unwrap()..log.find("SLA TODAY:").unwrap()];
        assert!(breached_section.contains("- A 1"));
        assert!(!breached_section.contains("- B 2"));

        let today_section =
            &log[log.find("SLA TODAY:").unwrap()..log.find("1 day to SLA:").unwrap()];
        assert!(today_section.contains("- B 2"));
    }

    #[test]
    fn test_header_timestamp_has_no_colon() {
        let log = format_incident_log(&[], at(2024, 6, 19));
        let first_line = log.lines().next().unwrap();
        assert_eq!(first_line, "Last Updated: 19 Jun 2024 1435");
    }

    #[test]
    fn test_closed_tickets_do_not_count_as_open() {
        let mut closed = ticket("9", "C", -3);
        closed.status = TicketStatus::Closed;
        let tickets = vec![ticket("1", "A", 2), closed];

        let log = format_incident_log(&tickets, at(2024, 6, 19));
        assert!(log.contains("Number of open tickets: 1"));

        // The closed breached ticket must not show under BREACHED SLA.
        let breached_section =
            &log[log.find("BREACHED SLA:").unwrap()..log.find("SLA TODAY:").unwrap()];
        assert!(!breached_section.contains("C 9"));
    }

    #[test]
    fn test_far_out_tickets_collapse_into_last_bucket() {
        let tickets = vec![ticket("1", "A", 5), ticket("2", "A", 42)];
        let log = format_incident_log(&tickets, at(2024, 6, 19));

        let last_section = &log[log.find("5 days to SLA:").unwrap()..];
        assert!(last_section.contains("- A 1"));
        assert!(last_section.contains("- A 2"));
    }

    #[test]
    fn test_all_bucket_headers_printed_when_empty() {
        let log = format_incident_log(&[], at(2024, 6, 19));
        for header in [
            "BREACHED SLA: ",
            "SLA TODAY: ",
            "1 day to SLA: ",
            "2 days to SLA: ",
            "3 days to SLA: ",
            "4 days to SLA: ",
            "5 days to SLA: ",
        ] {
            assert!(log.contains(header), "missing header {header:?}");
        }
        assert!(!log.contains("- "));
    }

    #[test]
    fn test_breached_this_month_matches_month_and_year() {
        let mut in_month = ticket("1", "A", -1);
        in_month.breached_date = NaiveDate::from_ymd_opt(2024, 6, 3);
        in_month.breach_reason = Some("vendor outage".to_string());

        // Same month, previous year: must not count.
        let mut other_year = ticket("2", "B", -1);
        other_year.breached_date = NaiveDate::from_ymd_opt(2023, 6, 3);

        // Closed tickets still count when the breach fell this month.
        let mut closed = ticket("3", "C", 1);
        closed.status = TicketStatus::Closed;
        closed.breached_date = NaiveDate::from_ymd_opt(2024, 6, 10);

        let tickets = vec![in_month, other_year, closed];
        let log = format_incident_log(&tickets, at(2024, 6, 19));

        assert!(log.contains("Number of breached SLA tickets for this month: 2 (A 1, C 3)"));
        assert!(log.contains("A 1: vendor outage"));
        assert!(log.contains("C 3: no reason provided"));
        assert!(!log.contains("B 2:"));
    }

    #[test]
    fn test_zero_breached_prints_bare_count() {
        let log = format_incident_log(&[ticket("1", "A", 2)], at(2024, 6, 19));
        assert!(log.contains("Number of breached SLA tickets for this month: 0\n"));
        assert!(!log.contains("("));
    }

    #[test]
    fn test_bucket_entries_keep_input_order() {
        let tickets = vec![ticket("20", "B", -1), ticket("10", "A", -1)];
        let log = format_incident_log(&tickets, at(2024, 6, 19));

        let b20 = log.find("- B 20").unwrap();
        let a10 = log.find("- A 10").unwrap();
        assert!(b20 < a10);
    }
}
