//! Authenticated-user context
//!
//! The session itself is issued elsewhere (the web app's sign-in flow) and
//! lands in the config file; this module only observes it.

use serde::{Deserialize, Serialize};

/// The signed-in user, as recorded in the config session block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Tracks the last observed user identity so the app can react to sign-in,
/// sign-out and account switches.
#[derive(Debug, Default)]
pub struct UserWatcher {
    last_id: Option<String>,
}

impl UserWatcher {
    /// Report whether the identity differs from the last call.
    ///
    /// Absent-to-present, present-to-absent and id-to-different-id all count
    /// as changes. The first call with any user present reports a change.
    pub fn changed(&mut self, current: Option<&CurrentUser>) -> bool {
        let id = current.map(|u| u.id.clone());
        if id != self.last_id {
            self.last_id = id;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            name: None,
        }
    }

    #[test]
    fn test_watcher_reports_sign_in_and_switch() {
        let mut watcher = UserWatcher::default();

        assert!(!watcher.changed(None));
        assert!(watcher.changed(Some(&user("u1"))));
        assert!(!watcher.changed(Some(&user("u1"))));
        assert!(watcher.changed(Some(&user("u2"))));
        assert!(watcher.changed(None)); // sign-out
        assert!(!watcher.changed(None));
    }
}
