use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::session::CurrentUser;

/// Remote store used when the config does not name one.
pub const DEFAULT_STORE_URL: &str = "https://store.garagehub.app/";

/// An outstanding cost-split pairing waiting to be claimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitOffer {
    pub slot: usize,           // Index of the pairing this offer belongs to
    pub remaining: f64,        // Amount still owed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with: Option<String>,  // Display name of the other party
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lift: Option<String>,  // Lift type code when the split is for shared equipment
}

/// Session block written by the sign-in flow (`garagehub --login`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,

    /// Signed-in user, absent when logged out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionInfo>,

    /// Developer brand of the user's home development, for branding lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,

    /// Mask member emails in the list view
    #[serde(default = "default_true")]
    pub mask_emails: bool,

    /// Cost-split offers still waiting to be claimed
    #[serde(default)]
    pub open_splits: Vec<SplitOffer>,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: None,
            session: None,
            developer: None,
            mask_emails: true,
            open_splits: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("garagehub");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Clean up the config before saving
        let mut clean = self.clone();

        // Drop offers that can never render sensibly
        clean.open_splits.retain(|o| o.remaining.is_finite());

        // An empty user id means no session at all
        if clean
            .session
            .as_ref()
            .map(|s| s.user_id.trim().is_empty())
            .unwrap_or(false)
        {
            clean.session = None;
        }

        // Empty tokens serialize as absent
        if let Some(session) = &mut clean.session {
            if session.token.as_ref().map(|t| t.is_empty()).unwrap_or(false) {
                session.token = None;
            }
        }

        let content = toml::to_string_pretty(&clean)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base URL of the remote store, falling back to the hosted default.
    pub fn store_url(&self) -> &str {
        self.store_url.as_deref().unwrap_or(DEFAULT_STORE_URL)
    }

    /// The signed-in user as seen by the rest of the app.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.session.as_ref().map(|s| CurrentUser {
            id: s.user_id.clone(),
            name: s.display_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            store_url: Some("https://store.example.com/".to_string()),
            session: Some(SessionInfo {
                user_id: "u-42".to_string(),
                display_name: Some("Jamie".to_string()),
                token: Some("secret".to_string()),
            }),
            developer: Some("Bellway".to_string()),
            mask_emails: true,
            open_splits: vec![SplitOffer {
                slot: 4,
                remaining: 12.5,
                with: Some("Alex".to_string()),
                lift: Some("scissor".to_string()),
            }],
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.store_url(), "https://store.example.com/");
        assert_eq!(deserialized.open_splits.len(), 1);
        assert_eq!(deserialized.current_user().unwrap().id, "u-42");
    }

    #[test]
    fn test_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.mask_emails);
        assert_eq!(config.store_url(), DEFAULT_STORE_URL);
        assert!(config.current_user().is_none());
    }
}
