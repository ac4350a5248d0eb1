//! String guards used by page validation

use crate::error::{PageError, PageResult};

/// Reject empty or whitespace-only input, naming the field in the error
pub fn require_non_blank(value: &str, field: &str) -> PageResult<()> {
    if value.trim().is_empty() {
        return Err(PageError::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
