//! Homework assignment page state

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{PageError, PageResult};
use crate::utils::require_non_blank;

/// Snapshot of what is being, or has been, assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentSummary {
    pub homework_name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub classes: Vec<String>,
    pub instructions: String,
    pub assigned: bool,
}

/// Configure a quiz as homework: name, due date, target classes
#[derive(Debug, Clone, Default)]
pub struct HomeworkAssignPage {
    homework_name: String,
    due_date: Option<DateTime<Utc>>,
    assigned_classes: Vec<String>,
    instructions: String,
    assigned: bool,
}

impl HomeworkAssignPage {
    /// Create an empty, unassigned page
    pub fn new() -> Self {
        Self::default()
    }

    /// Homework name, empty until set
    pub fn homework_name(&self) -> &str {
        &self.homework_name
    }

    /// Due date, `None` until set
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Classes in the order they were first assigned
    pub fn assigned_classes(&self) -> &[String] {
        &self.assigned_classes
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Whether `assign_homework` succeeded and was not cancelled
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Name the homework; surrounding whitespace is trimmed
    pub fn set_homework_name(&mut self, name: &str) -> PageResult<()> {
        require_non_blank(name, "Homework name")?;
        self.homework_name = name.trim().to_string();
        Ok(())
    }

    /// Free-form instructions, trimmed; may be empty
    pub fn set_instructions(&mut self, text: &str) {
        self.instructions = text.trim().to_string();
    }

    /// Set the due date; it must be strictly in the future
    pub fn set_due_date(&mut self, date: DateTime<Utc>) -> PageResult<()> {
        self.set_due_date_at(date, Utc::now())
    }

    /// Same as [`set_due_date`](Self::set_due_date) against an explicit clock
    pub fn set_due_date_at(&mut self, date: DateTime<Utc>, now: DateTime<Utc>) -> PageResult<()> {
        if date <= now {
            warn!(%date, %now, "Due date rejected: not in the future");
            return Err(PageError::validation("due date must be in the future"));
        }
        self.due_date = Some(date);
        info!(%date, "Due date set");
        Ok(())
    }

    /// Set the due date from `YYYY-MM-DD`, taken as midnight UTC
    pub fn set_due_date_str(&mut self, date: &str) -> PageResult<()> {
        let date = parse_due_date(date)?;
        self.set_due_date(date)
    }

    /// Add a class; assigning it again does nothing
    pub fn assign_to_class(&mut self, name: &str) -> PageResult<()> {
        require_non_blank(name, "Class name")?;
        if self.assigned_classes.iter().any(|c| c == name) {
            return Ok(());
        }
        self.assigned_classes.push(name.to_string());
        info!(class = %name, classes = self.assigned_classes.len(), "Class assigned");
        Ok(())
    }

    /// Remove a class if present. Never fails.
    pub fn unassign_class(&mut self, name: &str) {
        self.assigned_classes.retain(|c| c != name);
    }

    /// Publish the homework once name, due date and classes are all set
    pub fn assign_homework(&mut self) -> PageResult<AssignmentSummary> {
        if self.homework_name.is_empty() {
            return Err(PageError::state("homework name must be set"));
        }
        if self.due_date.is_none() {
            return Err(PageError::state("due date must be set"));
        }
        if self.assigned_classes.is_empty() {
            return Err(PageError::state("at least one class must be selected"));
        }
        self.assigned = true;
        info!(
            homework = %self.homework_name,
            classes = self.assigned_classes.len(),
            "Homework assigned"
        );
        Ok(self.summary())
    }

    /// Withdraw an assigned homework; fails when nothing is assigned
    pub fn cancel_assignment(&mut self) -> PageResult<()> {
        if !self.assigned {
            return Err(PageError::state("no homework has been assigned yet"));
        }
        self.assigned = false;
        info!(homework = %self.homework_name, "Homework assignment cancelled");
        Ok(())
    }

    /// Copy of the current settings, assigned or not
    pub fn summary(&self) -> AssignmentSummary {
        AssignmentSummary {
            homework_name: self.homework_name.clone(),
            due_date: self.due_date,
            classes: self.assigned_classes.clone(),
            instructions: self.instructions.clone(),
            assigned: self.assigned,
        }
    }
}

fn parse_due_date(date: &str) -> PageResult<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| PageError::validation("invalid date format, use YYYY-MM-DD"))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| PageError::validation("invalid date"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn due_date_must_be_strictly_future() {
        let mut page = HomeworkAssignPage::new();
        let now = Utc::now();
        assert!(page.set_due_date_at(now, now).unwrap_err().is_validation());
        assert!(page.set_due_date_at(now - Duration::days(1), now).is_err());
        assert_eq!(page.due_date(), None);

        let tomorrow = now + Duration::days(1);
        page.set_due_date_at(tomorrow, now).unwrap();
        assert_eq!(page.due_date(), Some(tomorrow));

        let later = now + Duration::days(7);
        page.set_due_date(later).unwrap();
        assert_eq!(page.due_date(), Some(later));
    }

    #[test]
    fn due_date_from_string() {
        let mut page = HomeworkAssignPage::new();
        assert!(page.set_due_date_str("31/12/2999").unwrap_err().is_validation());
        assert!(page.set_due_date_str("2000-01-01").unwrap_err().is_validation());
        page.set_due_date_str("2999-12-31").unwrap();
        let expected = Utc.with_ymd_and_hms(2999, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(page.due_date(), Some(expected));
    }

    #[test]
    fn classes_have_set_semantics() {
        let mut page = HomeworkAssignPage::new();
        page.assign_to_class("A").unwrap();
        page.assign_to_class("A").unwrap();
        assert_eq!(page.assigned_classes(), &["A"]);
        assert!(page.assign_to_class("").unwrap_err().is_validation());

        page.unassign_class("B");
        page.unassign_class("A");
        page.unassign_class("A");
        assert!(page.assigned_classes().is_empty());
    }

    #[test]
    fn assign_requires_name_date_and_class() {
        let mut page = HomeworkAssignPage::new();
        assert!(page.assign_homework().unwrap_err().is_state());
        page.set_homework_name(" Week 3 ").unwrap();
        assert!(page.assign_homework().is_err());
        let now = Utc::now();
        page.set_due_date_at(now + Duration::days(3), now).unwrap();
        assert!(page.assign_homework().is_err());
        page.assign_to_class("7B").unwrap();
        page.set_instructions("  Show your work ");

        let summary = page.assign_homework().unwrap();
        assert!(summary.assigned);
        assert_eq!(summary.homework_name, "Week 3");
        assert_eq!(summary.instructions, "Show your work");
        assert_eq!(summary.classes, vec!["7B".to_string()]);
    }

    #[test]
    fn summary_serializes_due_date_as_rfc3339() {
        let mut page = HomeworkAssignPage::new();
        page.set_homework_name("Week 4").unwrap();
        page.set_due_date_str("2999-01-15").unwrap();
        page.assign_to_class("7B").unwrap();
        assert_eq!(
            serde_json::to_value(page.summary()).unwrap(),
            serde_json::json!({
                "homework_name": "Week 4",
                "due_date": "2999-01-15T00:00:00Z",
                "classes": ["7B"],
                "instructions": "",
                "assigned": false,
            })
        );
    }

    #[test]
    fn cancel_only_after_assign() {
        let mut page = HomeworkAssignPage::new();
        assert!(page.cancel_assignment().unwrap_err().is_state());
        page.set_homework_name("HW").unwrap();
        page.set_due_date(Utc::now() + Duration::hours(2)).unwrap();
        page.assign_to_class("A").unwrap();
        page.assign_homework().unwrap();
        page.cancel_assignment().unwrap();
        assert!(!page.is_assigned());
    }
}
