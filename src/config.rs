//! Page configuration and JSON loading

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PageError, PageResult};

/// Session codes are always six digits
const SESSION_CODE_FLOOR: u32 = 100_000;
const SESSION_CODE_CEILING: u32 = 999_999;

/// Tunables shared by the pages. Every key is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Display name a fresh profile starts with
    pub default_display_name: String,

    /// Two-letter language code a fresh profile starts with
    pub default_language: String,

    /// Smallest session code a live session may generate
    pub session_code_min: u32,

    /// Largest session code a live session may generate
    pub session_code_max: u32,

    /// Base URL used when sharing a join code as a link
    pub join_url_base: String,

    /// Timer given to new questions, in seconds
    pub question_timer_default_secs: u32,

    /// Shortest timer a question may be given, in seconds
    pub question_timer_min_secs: u32,

    /// Longest timer a question may be given, in seconds
    pub question_timer_max_secs: u32,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            default_display_name: "Anonymous".to_string(),
            default_language: "en".to_string(),
            session_code_min: SESSION_CODE_FLOOR,
            session_code_max: SESSION_CODE_CEILING,
            join_url_base: "https://quizizz.com/join".to_string(),
            question_timer_default_secs: 30,
            question_timer_min_secs: 5,
            question_timer_max_secs: 300,
        }
    }
}

impl PagesConfig {
    /// Parse configuration from a JSON document and validate it
    pub fn from_json_str(json: &str) -> PageResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("Rejected page configuration: {}", e);
            PageError::validation(format!("invalid configuration: {}", e))
        })?;
        config.validate()?;
        debug!(?config, "Loaded page configuration");
        Ok(config)
    }

    /// Check that the values are consistent with each other
    pub fn validate(&self) -> PageResult<()> {
        if self.default_display_name.trim().is_empty() {
            return Err(PageError::validation("default_display_name cannot be empty"));
        }
        let language = &self.default_language;
        if language.chars().count() != 2 || language.trim().chars().count() != 2 {
            return Err(PageError::validation("default_language must be a two-letter code"));
        }
        if self.session_code_min < SESSION_CODE_FLOOR || self.session_code_max > SESSION_CODE_CEILING {
            return Err(PageError::validation(format!(
                "session code range must lie within {}..={}",
                SESSION_CODE_FLOOR, SESSION_CODE_CEILING
            )));
        }
        if self.session_code_min > self.session_code_max {
            return Err(PageError::validation(format!(
                "session_code_min {} exceeds session_code_max {}",
                self.session_code_min, self.session_code_max
            )));
        }
        if self.question_timer_min_secs > self.question_timer_max_secs {
            return Err(PageError::validation(format!(
                "question_timer_min_secs {} exceeds question_timer_max_secs {}",
                self.question_timer_min_secs, self.question_timer_max_secs
            )));
        }
        if !(self.question_timer_min_secs..=self.question_timer_max_secs)
            .contains(&self.question_timer_default_secs)
        {
            return Err(PageError::validation(
                "question_timer_default_secs must lie between the timer bounds",
            ));
        }
        Ok(())
    }
}
