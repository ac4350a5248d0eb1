//! Utility functions module
//! 
//! Input checks shared by the pages.

pub mod text;

// Re-export main functions
pub use text::{contains_ignore_case, require_non_blank};
