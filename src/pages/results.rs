//! Results page state: per-user scores with sorting and filtering

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PageError, PageResult};
use crate::utils::require_non_blank;

/// One finished attempt. Records are never modified once added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Who took the quiz
    pub username: String,
    /// Questions answered correctly
    pub correct: u32,
    /// Questions in the attempt, never zero
    pub total: u32,
    /// Wall time spent on the attempt
    pub time_taken: Duration,
    /// `correct / total`, 0.0 when `total` is zero
    pub accuracy: f64,
}

impl ResultRecord {
    fn new(username: String, correct: u32, total: u32, time_taken: Duration) -> Self {
        let accuracy = if total > 0 {
            f64::from(correct) / f64::from(total)
        } else {
            0.0
        };
        Self {
            username,
            correct,
            total,
            time_taken,
            accuracy,
        }
    }
}

/// Aggregate view over all records, accuracies in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResultStatistics {
    pub total_students: usize,
    pub average_accuracy: f64,
    pub highest_accuracy: f64,
    pub lowest_accuracy: f64,
}

/// Results collected for one quiz
#[derive(Debug, Clone, Default)]
pub struct ResultsPage {
    results: Vec<ResultRecord>,
}

impl ResultsPage {
    /// Create a page with no results
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in insertion order
    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    /// Record an attempt. Requires `0 <= correct <= total` and `total > 0`.
    pub fn add_result(
        &mut self,
        username: &str,
        correct: i32,
        total: i32,
        time_taken: Duration,
    ) -> PageResult<()> {
        require_non_blank(username, "Username")?;
        let (correct, total) = match (u32::try_from(correct), u32::try_from(total)) {
            (Ok(c), Ok(t)) if t > 0 && c <= t => (c, t),
            _ => {
                return Err(PageError::validation(format!(
                    "invalid score values: {}/{}",
                    correct, total
                )))
            }
        };

        let record = ResultRecord::new(username.to_string(), correct, total, time_taken);
        info!(username = %record.username, correct, total, accuracy = record.accuracy, "Result added");
        self.results.push(record);
        Ok(())
    }

    /// Copy of the records ordered by accuracy. Ties keep insertion order.
    pub fn sorted_by_accuracy(&self, descending: bool) -> Vec<ResultRecord> {
        let mut sorted = self.results.clone();
        if descending {
            sorted.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
        } else {
            sorted.sort_by(|a, b| a.accuracy.total_cmp(&b.accuracy));
        }
        sorted
    }

    /// Records whose username equals `username`, ignoring case
    pub fn filter_by_user(&self, username: &str) -> Vec<ResultRecord> {
        let wanted = username.to_lowercase();
        self.results
            .iter()
            .filter(|r| r.username.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Records scoring at least `min_percent` (0 to 100) accuracy
    pub fn filter_by_min_accuracy(&self, min_percent: f64) -> PageResult<Vec<ResultRecord>> {
        if !(0.0..=100.0).contains(&min_percent) {
            return Err(PageError::validation("accuracy must be between 0 and 100"));
        }
        let hits: Vec<ResultRecord> = self
            .results
            .iter()
            .filter(|r| r.accuracy * 100.0 >= min_percent)
            .cloned()
            .collect();
        debug!(min_percent, hits = hits.len(), "Filtered results by accuracy");
        Ok(hits)
    }

    /// Count and accuracy spread over every record; all zero when empty
    pub fn statistics(&self) -> ResultStatistics {
        if self.results.is_empty() {
            return ResultStatistics::default();
        }
        let accuracies = self.results.iter().map(|r| r.accuracy);
        ResultStatistics {
            total_students: self.results.len(),
            average_accuracy: accuracies.clone().sum::<f64>() / self.results.len() as f64,
            highest_accuracy: accuracies.clone().fold(f64::MIN, f64::max),
            lowest_accuracy: accuracies.fold(f64::MAX, f64::min),
        }
    }

    /// Serialise every record as a JSON array
    pub fn export_json(&self) -> PageResult<String> {
        if self.results.is_empty() {
            return Err(PageError::state("no results to export"));
        }
        serde_json::to_string_pretty(&self.results)
            .map_err(|e| PageError::state(format!("failed to export results: {}", e)))
    }
}
