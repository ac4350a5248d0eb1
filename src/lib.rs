//! Quiz Pages - in-memory page states for a quiz platform
//! 
//! Each page (login, dashboard, quiz editor, live session, results,
//! homework assignment, user profile) keeps a small amount of state and
//! guards every change with input checks, so behaviour tests can run
//! against it without a browser.

pub mod config;
pub mod error;
pub mod pages;
pub mod telemetry;
pub mod utils;

// Re-export commonly used types
pub use config::PagesConfig;
pub use error::{PageError, PageResult};
pub use pages::{
    DashboardPage, HomeworkAssignPage, LiveSessionPage, LoginPage, QuestionHandle, QuizEditorPage,
    ResultsPage, UserProfilePage,
};
