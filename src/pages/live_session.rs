//! Live session page state: join code, participants and the started flag
//!
//! Once started, the session also tracks which question is on screen and a
//! running score per participant for the leaderboard.

use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PagesConfig;
use crate::error::{PageError, PageResult};
use crate::utils::require_non_blank;

/// Where a session is in its lifecycle, derived from the page's fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    CodeGenerated,
    Started,
}

/// How the join code is handed to players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMethod {
    Email,
    Link,
    Qr,
}

/// What the UI would hand off when sharing the join code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ShareTarget {
    Email { body: String },
    Link { url: String },
    Qr { data: String },
}

/// A hosted live session.
///
/// The random source is a type parameter so tests can pass a seeded
/// generator; [`LiveSessionPage::new`] seeds one from OS entropy.
#[derive(Debug)]
pub struct LiveSessionPage<R = StdRng> {
    rng: R,
    session_code: Option<String>,
    participants: Vec<String>,
    scores: HashMap<String, u32>,
    started: bool,
    current_question: usize,
    code_min: u32,
    code_max: u32,
    join_url_base: String,
}

impl LiveSessionPage<StdRng> {
    /// Create an idle session with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for LiveSessionPage<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LiveSessionPage<R> {
    /// Create an idle session drawing codes from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::from_checked_config(rng, &PagesConfig::default())
    }

    /// Create an idle session drawing codes from `rng` within the configured range.
    /// The configuration is validated first, so an inverted or non six-digit
    /// range is refused.
    pub fn with_rng_and_config(rng: R, config: &PagesConfig) -> PageResult<Self> {
        config.validate()?;
        Ok(Self::from_checked_config(rng, config))
    }

    fn from_checked_config(rng: R, config: &PagesConfig) -> Self {
        Self {
            rng,
            session_code: None,
            participants: Vec::new(),
            scores: HashMap::new(),
            started: false,
            current_question: 0,
            code_min: config.session_code_min,
            code_max: config.session_code_max,
            join_url_base: config.join_url_base.clone(),
        }
    }

    /// Current join code, `None` until one is generated
    pub fn session_code(&self) -> Option<&str> {
        self.session_code.as_deref()
    }

    /// Participants in join order
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Number of joined participants
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Whether the session is running
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// One-based number of the question on screen, 0 while not running
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Lifecycle phase derived from the code and started flag
    pub fn phase(&self) -> SessionPhase {
        if self.started {
            SessionPhase::Started
        } else if self.session_code.is_some() {
            SessionPhase::CodeGenerated
        } else {
            SessionPhase::Idle
        }
    }

    /// Draw a fresh numeric code, replacing the previous one
    pub fn generate_session_code(&mut self) -> String {
        let code = self.rng.gen_range(self.code_min..=self.code_max).to_string();
        info!(code = %code, "Session code generated");
        self.session_code = Some(code.clone());
        code
    }

    /// Add a participant; adding an existing name does nothing
    pub fn add_participant(&mut self, name: &str) -> PageResult<()> {
        require_non_blank(name, "Participant name")?;
        if self.participants.iter().any(|p| p == name) {
            debug!(participant = %name, "Participant already joined");
            return Ok(());
        }
        self.participants.push(name.to_string());
        info!(participant = %name, count = self.participants.len(), "Participant joined");
        Ok(())
    }

    /// Remove a participant if present, dropping their score
    pub fn remove_participant(&mut self, name: &str) {
        let before = self.participants.len();
        self.participants.retain(|p| p != name);
        self.scores.remove(name);
        if self.participants.len() != before {
            info!(participant = %name, count = self.participants.len(), "Participant left");
        }
    }

    /// Start the session. Needs a code first, then at least one participant.
    /// The first question goes on screen; starting again keeps the current one.
    pub fn start_session(&mut self) -> PageResult<()> {
        if self.session_code.is_none() {
            warn!("Session start refused: code not generated");
            return Err(PageError::state("code not generated"));
        }
        if self.participants.is_empty() {
            warn!("Session start refused: no participants");
            return Err(PageError::state("no participants"));
        }
        self.started = true;
        if self.current_question == 0 {
            self.current_question = 1;
        }
        info!(participants = self.participants.len(), "Session started");
        Ok(())
    }

    /// Advance to the next question, returning its one-based number
    pub fn next_question(&mut self) -> PageResult<usize> {
        if !self.started {
            warn!("Next question refused: session not started");
            return Err(PageError::state("session has not been started"));
        }
        self.current_question += 1;
        debug!(question = self.current_question, "Moved to next question");
        Ok(self.current_question)
    }

    /// Add `points` to a participant's score, returning the new total
    pub fn award_points(&mut self, name: &str, points: u32) -> PageResult<u32> {
        if !self.started {
            return Err(PageError::state("session has not been started"));
        }
        if !self.participants.iter().any(|p| p == name) {
            return Err(PageError::NotFound(format!("participant '{}'", name)));
        }
        let score = self.scores.entry(name.to_string()).or_insert(0);
        *score = score.saturating_add(points);
        debug!(participant = %name, points, total = *score, "Points awarded");
        Ok(*score)
    }

    /// Participants with their scores, highest first; ties keep join order
    pub fn leaderboard(&self) -> Vec<(&str, u32)> {
        let mut board: Vec<(&str, u32)> = self
            .participants
            .iter()
            .map(|p| (p.as_str(), self.scores.get(p).copied().unwrap_or(0)))
            .collect();
        board.sort_by(|a, b| b.1.cmp(&a.1));
        board
    }

    /// Stop a running session, returning how many participants it had
    pub fn end_session(&mut self) -> PageResult<usize> {
        if !self.started {
            return Err(PageError::state("session has not been started"));
        }
        self.started = false;
        self.current_question = 0;
        info!(participants = self.participants.len(), "Session ended");
        Ok(self.participants.len())
    }

    /// Package the join code for the chosen channel
    pub fn share_join_code(&self, method: ShareMethod) -> PageResult<ShareTarget> {
        let code = self
            .session_code
            .as_deref()
            .ok_or_else(|| PageError::state("code not generated"))?;

        Ok(match method {
            ShareMethod::Email => ShareTarget::Email {
                body: format!("Join my quiz with code: {}", code),
            },
            ShareMethod::Link => ShareTarget::Link {
                url: format!("{}?code={}", self.join_url_base, code),
            },
            ShareMethod::Qr => ShareTarget::Qr {
                data: code.to_string(),
            },
        })
    }
}
