//! Page state module
//! 
//! One in-memory stand-in per screen of the quiz platform. The pages do not
//! know about each other; a test harness drives each one directly.

pub mod dashboard;
pub mod homework_assign;
pub mod live_session;
pub mod login;
pub mod quiz_editor;
pub mod results;
pub mod user_profile;

// Re-export main types
pub use dashboard::DashboardPage;
pub use homework_assign::{AssignmentSummary, HomeworkAssignPage};
pub use live_session::{LiveSessionPage, SessionPhase, ShareMethod, ShareTarget};
pub use login::{LoginPage, PasswordReset};
pub use quiz_editor::{Media, MediaKind, Question, QuestionHandle, QuizEditorPage};
pub use results::{ResultRecord, ResultStatistics, ResultsPage};
pub use user_profile::{ProfileSnapshot, UserProfilePage};
