//! Quiz editor page state
//!
//! The editor owns an ordered list of questions, each owning its ordered
//! answer options and an optional correct-option index. Callers refer to a
//! question through the [`QuestionHandle`] returned by
//! [`QuizEditorPage::add_question`]. A handle remembers both the editor and
//! the question it was issued for, so a handle from another editor, or one
//! whose question has been removed, is refused even when some question here
//! has the same text.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::PagesConfig;
use crate::error::{PageError, PageResult};
use crate::utils::require_non_blank;

/// Identifies one question inside one editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionHandle {
    editor: Uuid,
    question: Uuid,
}

/// Kind of media attached to a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

/// Media attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    /// Where the file lives; the format is not checked
    pub url: String,
    pub kind: MediaKind,
}

/// A question with its answer options
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    #[serde(skip)]
    uuid: Uuid,
    text: String,
    options: Vec<String>,
    correct_index: Option<usize>,
    timer_secs: u32,
    media: Option<Media>,
}

impl Question {
    fn new(text: String, timer_secs: u32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            text,
            options: Vec::new(),
            correct_index: None,
            timer_secs,
            media: None,
        }
    }

    /// Question text as shown to players
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Answer options in the order they were added
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option, `None` until one is chosen.
    ///
    /// Valid for the options present when it was set; options are never
    /// removed, so it stays in bounds.
    pub fn correct_index(&self) -> Option<usize> {
        self.correct_index
    }

    /// Text of the correct option, if one is chosen
    pub fn correct_option(&self) -> Option<&str> {
        self.correct_index
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Seconds players get to answer
    pub fn timer_secs(&self) -> u32 {
        self.timer_secs
    }

    /// Attached image or video, if any
    pub fn media(&self) -> Option<&Media> {
        self.media.as_ref()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text)?;
        for (i, option) in self.options.iter().enumerate() {
            let mark = if Some(i) == self.correct_index { 'V' } else { ' ' };
            writeln!(f, "  {}) {} [{}]", i + 1, option, mark)?;
        }
        Ok(())
    }
}

/// Editor for building a quiz out of questions and answers
#[derive(Debug, Clone)]
pub struct QuizEditorPage {
    id: Uuid,
    quiz_name: String,
    questions: Vec<Question>,
    saved: bool,
    timer_default_secs: u32,
    timer_min_secs: u32,
    timer_max_secs: u32,
}

impl Default for QuizEditorPage {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEditorPage {
    /// Create an empty editor with default timer settings
    pub fn new() -> Self {
        Self::from_checked_config(&PagesConfig::default())
    }

    /// Create an empty editor using the timer settings from `config`.
    /// The configuration is validated first.
    pub fn with_config(config: &PagesConfig) -> PageResult<Self> {
        config.validate()?;
        Ok(Self::from_checked_config(config))
    }

    fn from_checked_config(config: &PagesConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz_name: String::new(),
            questions: Vec::new(),
            saved: false,
            timer_default_secs: config.question_timer_default_secs,
            timer_min_secs: config.question_timer_min_secs,
            timer_max_secs: config.question_timer_max_secs,
        }
    }

    /// Quiz name, empty until set
    pub fn quiz_name(&self) -> &str {
        &self.quiz_name
    }

    /// Questions in quiz order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Whether the quiz passed `save_quiz` and has not changed since
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Look up a question by handle
    pub fn question(&self, handle: QuestionHandle) -> PageResult<&Question> {
        let pos = self.position_of(handle)?;
        Ok(&self.questions[pos])
    }

    /// Handle for the question currently at `index`
    pub fn handle_at(&self, index: usize) -> PageResult<QuestionHandle> {
        let question = self.questions.get(index).ok_or(PageError::Range {
            what: "question",
            index,
            len: self.questions.len(),
        })?;
        Ok(self.handle_for(question))
    }

    /// Name the quiz; surrounding whitespace is trimmed
    pub fn set_quiz_name(&mut self, name: &str) -> PageResult<()> {
        require_non_blank(name, "Quiz name")?;
        self.quiz_name = name.trim().to_string();
        self.saved = false;
        debug!(quiz = %self.quiz_name, "Quiz name set");
        Ok(())
    }

    /// Append a question with no options and no correct answer
    pub fn add_question(&mut self, text: &str) -> PageResult<QuestionHandle> {
        require_non_blank(text, "Question text")?;
        let question = Question::new(text.to_string(), self.timer_default_secs);
        let handle = self.handle_for(&question);
        self.questions.push(question);
        self.saved = false;
        info!(question = %text, count = self.questions.len(), "Question added");
        Ok(handle)
    }

    /// Remove the question at `index`; later questions shift down by one
    pub fn remove_question(&mut self, index: usize) -> PageResult<Question> {
        if index >= self.questions.len() {
            return Err(PageError::Range {
                what: "question",
                index,
                len: self.questions.len(),
            });
        }
        let removed = self.questions.remove(index);
        self.saved = false;
        info!(index, question = %removed.text, "Question removed");
        Ok(removed)
    }

    /// Append an answer option to the question
    pub fn add_answer(&mut self, handle: QuestionHandle, text: &str) -> PageResult<()> {
        let pos = self.position_of(handle)?;
        require_non_blank(text, "Answer text")?;
        let question = &mut self.questions[pos];
        question.options.push(text.to_string());
        self.saved = false;
        debug!(question = %question.text, answer = %text, "Answer added");
        Ok(())
    }

    /// Mark the option at `option_index` as the correct one
    pub fn set_correct_answer(&mut self, handle: QuestionHandle, option_index: usize) -> PageResult<()> {
        let pos = self.position_of(handle)?;
        let question = &mut self.questions[pos];
        if option_index >= question.options.len() {
            return Err(PageError::Range {
                what: "option",
                index: option_index,
                len: question.options.len(),
            });
        }
        question.correct_index = Some(option_index);
        self.saved = false;
        debug!(question = %question.text, option_index, "Correct answer set");
        Ok(())
    }

    /// Replace the question text; options and the correct index stay
    pub fn edit_question_text(&mut self, handle: QuestionHandle, new_text: &str) -> PageResult<()> {
        let pos = self.position_of(handle)?;
        require_non_blank(new_text, "Question text")?;
        let question = &mut self.questions[pos];
        info!(from = %question.text, to = %new_text, "Question text edited");
        question.text = new_text.to_string();
        self.saved = false;
        Ok(())
    }

    /// Set how long participants get for the question
    pub fn set_timer(&mut self, handle: QuestionHandle, seconds: u32) -> PageResult<()> {
        let pos = self.position_of(handle)?;
        if !(self.timer_min_secs..=self.timer_max_secs).contains(&seconds) {
            return Err(PageError::validation(format!(
                "timer must be between {} and {} seconds",
                self.timer_min_secs, self.timer_max_secs
            )));
        }
        self.questions[pos].timer_secs = seconds;
        self.saved = false;
        Ok(())
    }

    /// Attach an image or video, replacing any existing media
    pub fn add_media(&mut self, handle: QuestionHandle, url: &str, kind: MediaKind) -> PageResult<()> {
        let pos = self.position_of(handle)?;
        require_non_blank(url, "Media URL")?;
        self.questions[pos].media = Some(Media {
            url: url.trim().to_string(),
            kind,
        });
        self.saved = false;
        Ok(())
    }

    /// Detach any media from the question
    pub fn remove_media(&mut self, handle: QuestionHandle) -> PageResult<()> {
        let pos = self.position_of(handle)?;
        self.questions[pos].media = None;
        self.saved = false;
        Ok(())
    }

    /// Check the quiz is complete and mark it saved.
    ///
    /// Needs a name, at least one question, and for every question at least
    /// two options with one of them marked correct.
    pub fn save_quiz(&mut self) -> PageResult<()> {
        if self.quiz_name.is_empty() {
            return Err(PageError::state("quiz name must be set before saving"));
        }
        if self.questions.is_empty() {
            return Err(PageError::state("quiz must have at least one question"));
        }
        for question in &self.questions {
            if question.options.len() < 2 {
                warn!(question = %question.text, "Save refused: too few answers");
                return Err(PageError::state(format!(
                    "question '{}' must have at least 2 answers",
                    question.text
                )));
            }
            if question.correct_index.is_none() {
                warn!(question = %question.text, "Save refused: no correct answer");
                return Err(PageError::state(format!(
                    "question '{}' must have a correct answer",
                    question.text
                )));
            }
        }

        self.saved = true;
        info!(quiz = %self.quiz_name, questions = self.questions.len(), "Quiz saved");
        Ok(())
    }

    fn handle_for(&self, question: &Question) -> QuestionHandle {
        QuestionHandle {
            editor: self.id,
            question: question.uuid,
        }
    }

    /// Resolve a handle to its current position, enforcing ownership
    fn position_of(&self, handle: QuestionHandle) -> PageResult<usize> {
        if handle.editor != self.id {
            warn!("Question handle issued by another editor");
            return Err(PageError::state("question does not belong to this quiz"));
        }
        self.questions
            .iter()
            .position(|q| q.uuid == handle.question)
            .ok_or_else(|| PageError::state("question does not belong to this quiz"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_question_with_correct_answer() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("What is 2+2?").unwrap();
        editor.add_answer(q, "3").unwrap();
        editor.add_answer(q, "4").unwrap();
        editor.set_correct_answer(q, 1).unwrap();

        let first = &editor.questions()[0];
        assert_eq!(first.correct_index(), Some(1));
        assert_eq!(first.options(), &["3", "4"]);
        assert_eq!(first.correct_option(), Some("4"));
    }

    #[test]
    fn new_question_has_no_correct_answer() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("Capital of France?").unwrap();
        let question = editor.question(q).unwrap();
        assert_eq!(question.correct_index(), None);
        assert!(question.options().is_empty());
        assert_eq!(question.timer_secs(), 30);
    }

    #[test]
    fn blank_question_text_is_rejected() {
        let mut editor = QuizEditorPage::new();
        assert!(editor.add_question(" ").unwrap_err().is_validation());
        assert_eq!(editor.question_count(), 0);
    }

    #[test]
    fn correct_index_must_be_in_bounds() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("Pick one").unwrap();
        assert!(editor.set_correct_answer(q, 0).unwrap_err().is_range());
        editor.add_answer(q, "a").unwrap();
        editor.add_answer(q, "b").unwrap();
        assert!(editor.set_correct_answer(q, 2).unwrap_err().is_range());
        editor.set_correct_answer(q, 0).unwrap();
        assert!(editor.set_correct_answer(q, 5).is_err());
        assert_eq!(editor.question(q).unwrap().correct_index(), Some(0));
    }

    #[test]
    fn handle_from_other_editor_is_refused_even_with_same_text() {
        let mut mine = QuizEditorPage::new();
        let mut other = QuizEditorPage::new();
        let own = mine.add_question("Same text").unwrap();
        mine.add_answer(own, "x").unwrap();
        let foreign = other.add_question("Same text").unwrap();
        other.add_answer(foreign, "x").unwrap();

        assert!(mine.add_answer(foreign, "y").unwrap_err().is_state());
        assert!(mine.set_correct_answer(foreign, 0).unwrap_err().is_state());
        assert!(mine.edit_question_text(foreign, "z").unwrap_err().is_state());
        assert_eq!(mine.question(own).unwrap().options(), &["x"]);
    }

    #[test]
    fn ownership_is_checked_before_text() {
        let mut mine = QuizEditorPage::new();
        let mut other = QuizEditorPage::new();
        let foreign = other.add_question("Q").unwrap();
        assert!(mine.add_answer(foreign, "").unwrap_err().is_state());
        assert!(mine.edit_question_text(foreign, " ").unwrap_err().is_state());
    }

    #[test]
    fn removed_question_handle_is_stale() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("Gone soon").unwrap();
        editor.remove_question(0).unwrap();
        assert!(editor.add_answer(q, "a").unwrap_err().is_state());
    }

    #[test]
    fn remove_question_shifts_later_ones() {
        let mut editor = QuizEditorPage::new();
        editor.add_question("one").unwrap();
        let two = editor.add_question("two").unwrap();
        editor.add_question("three").unwrap();

        assert!(editor.remove_question(3).unwrap_err().is_range());
        let removed = editor.remove_question(0).unwrap();
        assert_eq!(removed.text(), "one");
        assert_eq!(editor.questions()[0].text(), "two");
        assert_eq!(editor.questions()[1].text(), "three");
        assert_eq!(editor.handle_at(0).unwrap(), two);
    }

    #[test]
    fn edit_text_keeps_options_and_answer() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("Old").unwrap();
        editor.add_answer(q, "a").unwrap();
        editor.set_correct_answer(q, 0).unwrap();
        assert!(editor.edit_question_text(q, "").unwrap_err().is_validation());
        editor.edit_question_text(q, "New").unwrap();

        let question = editor.question(q).unwrap();
        assert_eq!(question.text(), "New");
        assert_eq!(question.options(), &["a"]);
        assert_eq!(question.correct_index(), Some(0));
    }

    #[test]
    fn timer_and_media() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("Look at this").unwrap();
        assert!(editor.set_timer(q, 4).unwrap_err().is_validation());
        assert!(editor.set_timer(q, 301).is_err());
        editor.set_timer(q, 60).unwrap();
        editor.add_media(q, " https://img.example/cat.png ", MediaKind::Image).unwrap();

        let question = editor.question(q).unwrap();
        assert_eq!(question.timer_secs(), 60);
        assert_eq!(question.media().map(|m| m.url.as_str()), Some("https://img.example/cat.png"));

        editor.remove_media(q).unwrap();
        assert!(editor.question(q).unwrap().media().is_none());
    }

    #[test]
    fn save_requires_complete_quiz() {
        let mut editor = QuizEditorPage::new();
        assert!(editor.save_quiz().unwrap_err().is_state());
        editor.set_quiz_name("  Arithmetic ").unwrap();
        assert_eq!(editor.quiz_name(), "Arithmetic");
        assert!(editor.save_quiz().is_err());

        let q = editor.add_question("1+1?").unwrap();
        editor.add_answer(q, "2").unwrap();
        assert!(editor.save_quiz().is_err());
        editor.add_answer(q, "3").unwrap();
        assert!(editor.save_quiz().is_err());
        editor.set_correct_answer(q, 0).unwrap();
        editor.save_quiz().unwrap();
        assert!(editor.is_saved());

        editor.add_question("2+2?").unwrap();
        assert!(!editor.is_saved());
    }

    #[test]
    fn custom_timer_settings_apply_to_new_questions() {
        let config = PagesConfig {
            question_timer_default_secs: 45,
            question_timer_min_secs: 10,
            question_timer_max_secs: 60,
            ..PagesConfig::default()
        };
        let mut editor = QuizEditorPage::with_config(&config).unwrap();
        let q = editor.add_question("Quick one").unwrap();
        assert_eq!(editor.question(q).unwrap().timer_secs(), 45);
        assert!(editor.set_timer(q, 5).unwrap_err().is_validation());
    }

    #[test]
    fn default_timer_outside_bounds_is_refused() {
        let config = PagesConfig {
            question_timer_default_secs: 1,
            ..PagesConfig::default()
        };
        assert!(QuizEditorPage::with_config(&config).unwrap_err().is_validation());
    }

    #[test]
    fn question_json_leaves_out_the_identity() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("Which animal?").unwrap();
        editor.add_answer(q, "cat").unwrap();
        editor.add_answer(q, "dog").unwrap();
        editor.set_correct_answer(q, 0).unwrap();
        editor.add_media(q, "https://img.example/cat.png", MediaKind::Image).unwrap();

        assert_eq!(
            serde_json::to_value(editor.question(q).unwrap()).unwrap(),
            serde_json::json!({
                "text": "Which animal?",
                "options": ["cat", "dog"],
                "correct_index": 0,
                "timer_secs": 30,
                "media": { "url": "https://img.example/cat.png", "kind": "image" },
            })
        );

        let fresh = editor.add_question("Unanswered").unwrap();
        let value = serde_json::to_value(editor.question(fresh).unwrap()).unwrap();
        assert_eq!(value["correct_index"], serde_json::Value::Null);
        assert_eq!(value["media"], serde_json::Value::Null);
        assert_eq!(serde_json::to_value(MediaKind::Video).unwrap(), serde_json::json!("video"));
    }

    #[test]
    fn display_marks_the_correct_option() {
        let mut editor = QuizEditorPage::new();
        let q = editor.add_question("2+2?").unwrap();
        editor.add_answer(q, "3").unwrap();
        editor.add_answer(q, "4").unwrap();
        editor.set_correct_answer(q, 1).unwrap();
        let rendered = editor.question(q).unwrap().to_string();
        assert_eq!(rendered, "2+2?\n  1) 3 [ ]\n  2) 4 [V]\n");
    }
}
