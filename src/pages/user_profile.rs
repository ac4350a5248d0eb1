//! User profile page state

use serde::Serialize;
use tracing::info;

use crate::config::PagesConfig;
use crate::error::{PageError, PageResult};
use crate::utils::require_non_blank;

/// Read-only copy of the profile fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSnapshot {
    pub display_name: String,
    pub language: String,
    pub avatar_url: String,
    pub modified: bool,
}

/// Profile settings of the signed-in user
#[derive(Debug, Clone)]
pub struct UserProfilePage {
    display_name: String,
    language: String,
    avatar_url: String,
    modified: bool,
    default_display_name: String,
    default_language: String,
}

impl Default for UserProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

impl UserProfilePage {
    /// Profile named "Anonymous", language "en", no avatar
    pub fn new() -> Self {
        Self::from_checked_config(&PagesConfig::default())
    }

    /// Profile starting from the defaults in `config`, which is validated first
    pub fn with_config(config: &PagesConfig) -> PageResult<Self> {
        config.validate()?;
        Ok(Self::from_checked_config(config))
    }

    fn from_checked_config(config: &PagesConfig) -> Self {
        Self {
            display_name: config.default_display_name.clone(),
            language: config.default_language.to_lowercase(),
            avatar_url: String::new(),
            modified: false,
            default_display_name: config.default_display_name.clone(),
            default_language: config.default_language.to_lowercase(),
        }
    }

    /// Name shown to other players
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lowercase two-letter language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Avatar URL, empty until one is set
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// Whether anything changed since the last save
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Rename the profile; blank names are refused
    pub fn update_display_name(&mut self, name: &str) -> PageResult<()> {
        require_non_blank(name, "Display name")?;
        self.display_name = name.to_string();
        self.modified = true;
        info!(display_name = %name, "Display name updated");
        Ok(())
    }

    /// Set a two-letter language code, stored lowercase
    pub fn update_language(&mut self, code: &str) -> PageResult<()> {
        if code.trim().is_empty() || code.chars().count() != 2 {
            return Err(PageError::validation(
                "language code must be a two-letter ISO 639-1 code",
            ));
        }
        self.language = code.to_lowercase();
        self.modified = true;
        info!(language = %self.language, "Language updated");
        Ok(())
    }

    /// Set the avatar. The URL format is not checked.
    pub fn update_avatar(&mut self, url: &str) -> PageResult<()> {
        require_non_blank(url, "Avatar URL")?;
        self.avatar_url = url.to_string();
        self.modified = true;
        info!(avatar_url = %url, "Avatar updated");
        Ok(())
    }

    /// Clear the avatar; fails when none is set
    pub fn remove_avatar(&mut self) -> PageResult<()> {
        if self.avatar_url.is_empty() {
            return Err(PageError::state("no avatar to remove"));
        }
        self.avatar_url.clear();
        self.modified = true;
        Ok(())
    }

    /// Restore the configured defaults
    pub fn reset_to_defaults(&mut self) {
        self.display_name = self.default_display_name.clone();
        self.language = self.default_language.clone();
        self.avatar_url.clear();
        self.modified = true;
        info!("Profile reset to defaults");
    }

    /// Commit pending changes; fails when there are none
    pub fn save_changes(&mut self) -> PageResult<()> {
        if !self.modified {
            return Err(PageError::state("no changes to save"));
        }
        self.modified = false;
        info!(display_name = %self.display_name, "Profile saved");
        Ok(())
    }

    /// Copy of the current fields
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            display_name: self.display_name.clone(),
            language: self.language.clone(),
            avatar_url: self.avatar_url.clone(),
            modified: self.modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = UserProfilePage::new();
        assert_eq!(page.display_name(), "Anonymous");
        assert_eq!(page.language(), "en");
        assert_eq!(page.avatar_url(), "");
        assert!(!page.is_modified());
    }

    #[test]
    fn language_is_lowercased_and_must_be_two_chars() {
        let mut page = UserProfilePage::new();
        page.update_language("EN").unwrap();
        assert_eq!(page.language(), "en");
        page.update_language("Fr").unwrap();
        assert_eq!(page.language(), "fr");

        for bad in ["english", "e", "", "  ", "eng"] {
            assert!(page.update_language(bad).unwrap_err().is_validation(), "{bad:?}");
        }
        assert_eq!(page.language(), "fr");
    }

    #[test]
    fn blank_name_and_avatar_are_rejected() {
        let mut page = UserProfilePage::new();
        assert!(page.update_display_name(" ").unwrap_err().is_validation());
        assert!(page.update_avatar("").unwrap_err().is_validation());
        assert!(!page.is_modified());

        page.update_display_name("Ms. Rivera").unwrap();
        page.update_avatar("not even a url").unwrap();
        assert_eq!(page.display_name(), "Ms. Rivera");
        assert_eq!(page.avatar_url(), "not even a url");
    }

    #[test]
    fn save_changes_needs_a_change() {
        let mut page = UserProfilePage::new();
        assert!(page.save_changes().unwrap_err().is_state());
        page.update_display_name("Sam").unwrap();
        page.save_changes().unwrap();
        assert!(!page.is_modified());
        assert!(page.save_changes().is_err());
    }

    #[test]
    fn avatar_removal_and_reset() {
        let mut page = UserProfilePage::new();
        assert!(page.remove_avatar().unwrap_err().is_state());
        page.update_avatar("https://cdn.example/me.png").unwrap();
        page.remove_avatar().unwrap();
        assert_eq!(page.avatar_url(), "");

        page.update_display_name("Sam").unwrap();
        page.update_language("de").unwrap();
        page.reset_to_defaults();
        let snap = page.snapshot();
        assert_eq!(snap.display_name, "Anonymous");
        assert_eq!(snap.language, "en");
        assert!(snap.modified);
    }

    #[test]
    fn defaults_come_from_config() {
        let config = PagesConfig {
            default_display_name: "Guest".to_string(),
            default_language: "UK".to_string(),
            ..PagesConfig::default()
        };
        let page = UserProfilePage::with_config(&config).unwrap();
        assert_eq!(page.display_name(), "Guest");
        assert_eq!(page.language(), "uk");
    }

    #[test]
    fn invalid_config_defaults_are_refused() {
        let long_language = PagesConfig {
            default_language: "english".to_string(),
            ..PagesConfig::default()
        };
        assert!(UserProfilePage::with_config(&long_language).unwrap_err().is_validation());

        let blank_name = PagesConfig {
            default_display_name: "   ".to_string(),
            ..PagesConfig::default()
        };
        assert!(UserProfilePage::with_config(&blank_name).unwrap_err().is_validation());
    }

    #[test]
    fn snapshot_serializes_all_fields() {
        let mut page = UserProfilePage::new();
        page.update_avatar("https://cdn.example/me.png").unwrap();
        assert_eq!(
            serde_json::to_value(page.snapshot()).unwrap(),
            serde_json::json!({
                "display_name": "Anonymous",
                "language": "en",
                "avatar_url": "https://cdn.example/me.png",
                "modified": true,
            })
        );
    }
}
