//! Trend chart data reshaping.
//!
//! The stats endpoint returns one label/count series per category, and the
//! categories do not necessarily share labels. This module pivots them onto
//! a single sorted label axis so every series has one value per label.

use std::collections::{BTreeSet, HashMap};

use super::ticket::StatsResponse;

/// One chart series: a category and its per-label values.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub category: String,
    pub values: Vec<u64>,
}

/// Chart-ready dataset with a shared label axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub series: Vec<TrendSeries>,
}

impl TrendChart {
    /// True if at least one series has a non-zero value.
    ///
    /// The caller renders an explicit "no data" state when this is false
    /// rather than drawing an empty plot.
    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| s.values.iter().any(|&v| v > 0))
    }

    /// Largest value across all series, used for the y-axis bound.
    pub fn max_value(&self) -> u64 {
        self.series.iter().flat_map(|s| s.values.iter().copied()).max().unwrap_or(0)
    }
}

/// Pivot a per-category stats response onto a shared label axis.
///
/// Labels are the lexicographically sorted union of all input labels.
/// This ordering is correct because the upstream labels are zero-padded
/// ISO date strings; that format is the stats endpoint's contract.
/// Categories missing an observation for a label fill in 0.
pub fn reshape_trend_series(stats: &StatsResponse) -> TrendChart {
    let labels: Vec<String> = stats
        .values()
        .flatten()
        .map(|point| point.label.as_str())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(String::from)
        .collect();

    let series = stats
        .iter()
        .map(|(category, points)| {
            let by_label: HashMap<&str, u64> =
                points.iter().map(|p| (p.label.as_str(), p.count)).collect();

            TrendSeries {
                category: category.clone(),
                values: labels.iter().map(|l| by_label.get(l.as_str()).copied().unwrap_or(0)).collect(),
            }
        })
        .collect();

    TrendChart { labels, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ticket::StatPoint;

    fn point(label: &str, count: u64) -> StatPoint {
        StatPoint { label: label.to_string(), count }
    }

    #[test]
    fn test_disjoint_labels_zero_fill() {
        let mut stats = StatsResponse::new();
        stats.insert("Raised".to_string(), vec![point("2024-01", 3)]);
        stats.insert("Closed".to_string(), vec![point("2024-02", 1)]);

        let chart = reshape_trend_series(&stats);
        assert_eq!(chart.labels, vec!["2024-01", "2024-02"]);

        let raised = chart.series.iter().find(|s| s.category == "Raised").unwrap();
        assert_eq!(raised.values, vec![3, 0]);

        let closed = chart.series.iter().find(|s| s.category == "Closed").unwrap();
        assert_eq!(closed.values, vec![0, 1]);
    }

    #[test]
    fn test_labels_sorted_and_deduplicated() {
        let mut stats = StatsResponse::new();
        stats.insert(
            "Raised".to_string(),
            vec![point("2024-03", 1), point("2024-01", 2)],
        );
        stats.insert(
            "Open".to_string(),
            vec![point("2024-01", 5), point("2024-02", 1)],
        );

        let chart = reshape_trend_series(&stats);
        assert_eq!(chart.labels, vec!["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn test_every_series_spans_all_labels() {
        let mut stats = StatsResponse::new();
        stats.insert("Raised".to_string(), vec![point("2024-01-01", 1)]);
        stats.insert(
            "Breached".to_string(),
            vec![point("2024-01-02", 2), point("2024-01-03", 4)],
        );

        let chart = reshape_trend_series(&stats);
        for series in &chart.series {
            assert_eq!(series.values.len(), chart.labels.len());
        }
    }

    #[test]
    fn test_idempotent_for_identical_input() {
        let mut stats = StatsResponse::new();
        stats.insert(
            "Raised".to_string(),
            vec![point("2024-01", 3), point("2024-02", 1)],
        );
        stats.insert("Open".to_string(), vec![point("2024-02", 2)]);

        let first = reshape_trend_series(&stats);
        let second = reshape_trend_series(&stats);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_response() {
        let chart = reshape_trend_series(&StatsResponse::new());
        assert!(chart.labels.is_empty());
        assert!(chart.series.is_empty());
        assert!(!chart.has_data());
    }

    #[test]
    fn test_all_zero_series_reports_no_data() {
        let mut stats = StatsResponse::new();
        stats.insert("Raised".to_string(), vec![point("2024-01", 0)]);

        let chart = reshape_trend_series(&stats);
        assert!(!chart.has_data());
        assert_eq!(chart.max_value(), 0);
    }

    #[test]
    fn test_max_value() {
        let mut stats = StatsResponse::new();
        stats.insert("Raised".to_string(), vec![point("2024-01", 3)]);
        stats.insert("Breached".to_string(), vec![point("2024-01", 7)]);

        let chart = reshape_trend_series(&stats);
        assert!(chart.has_data());
        assert_eq!(chart.max_value(), 7);
    }
}
