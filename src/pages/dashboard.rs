//! Dashboard page state: the list of quizzes the user can browse

use tracing::{debug, info, warn};

use crate::error::{PageError, PageResult};
use crate::utils::{contains_ignore_case, require_non_blank};

/// Quiz names in insertion order. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct DashboardPage {
    quizzes: Vec<String>,
}

impl DashboardPage {
    /// Create an empty dashboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dashboard seeded with existing quizzes
    pub fn with_quizzes<I, S>(quizzes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            quizzes: quizzes.into_iter().map(Into::into).collect(),
        }
    }

    /// Quiz names in insertion order
    pub fn quizzes(&self) -> &[String] {
        &self.quizzes
    }

    pub fn quiz_count(&self) -> usize {
        self.quizzes.len()
    }

    /// Append a quiz. Blank names are rejected.
    pub fn add_quiz(&mut self, name: &str) -> PageResult<()> {
        require_non_blank(name, "Quiz name")?;
        self.quizzes.push(name.to_string());
        info!(quiz = %name, count = self.quizzes.len(), "Quiz added to dashboard");
        Ok(())
    }

    /// Remove the first quiz whose name matches exactly
    pub fn remove_quiz(&mut self, name: &str) -> PageResult<()> {
        let Some(pos) = self.quizzes.iter().position(|q| q == name) else {
            warn!(quiz = %name, "Tried to remove unknown quiz");
            return Err(PageError::NotFound(format!("quiz '{}'", name)));
        };
        self.quizzes.remove(pos);
        info!(quiz = %name, count = self.quizzes.len(), "Quiz removed from dashboard");
        Ok(())
    }

    /// Quizzes whose name contains `term`, ignoring case, in insertion order.
    /// `None` behaves like an empty term and returns everything.
    pub fn search(&self, term: Option<&str>) -> Vec<String> {
        let term = term.unwrap_or("");
        let hits: Vec<String> = self
            .quizzes
            .iter()
            .filter(|q| contains_ignore_case(q, term))
            .cloned()
            .collect();
        debug!(%term, hits = hits.len(), "Dashboard search");
        hits
    }
}
