use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::session::{CurrentUser, UserWatcher};
use crate::store::cache::MemberCache;
use crate::store::StoreClient;
use crate::ui::components::OfferButton;

/// How often the session block is re-read from disk, so a sign-in from
/// another terminal shows up without restarting the TUI.
const SESSION_POLL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub config: AppConfig,
    pub popup: Popup,

    // Member list (main section)
    pub cache: MemberCache,
    pub selected_member: usize,

    // Signed-in user context
    pub user: Option<CurrentUser>,
    user_watcher: UserWatcher,
    last_session_poll: Instant,

    // Remote store
    client: StoreClient,

    // Cost-split claim prompt (one at a time)
    pub offer: Option<OfferButton>,
    claimed_slots: Vec<usize>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().unwrap_or_default();
        let token = config.session.as_ref().and_then(|s| s.token.clone());
        let client = StoreClient::from_url(config.store_url(), token)?;

        let mut app = Self {
            config,
            popup: Popup::None,

            cache: MemberCache::default(),
            selected_member: 0,

            user: None,
            user_watcher: UserWatcher::default(),
            last_session_poll: Instant::now(),

            client,

            offer: None,
            claimed_slots: Vec::new(),

            status_message: None,
            status_message_time: None,
        };

        // Initial sign-in state counts as an identity change and triggers
        // the first snapshot fetch
        app.sync_user().await;
        app.mount_next_offer();

        Ok(app)
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup == Popup::Help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter
            ) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        match key.code {
            // Vertical navigation in the member list
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),

            // Claim the visible cost-split offer
            KeyCode::Char(' ') | KeyCode::Enter => self.claim_offer(),

            // Manual snapshot refresh
            KeyCode::Char('R') => {
                self.refresh().await;
                self.set_status("Members refreshed");
            }

            // Toggle email masking in the list view
            KeyCode::Char('m') => {
                self.config.mask_emails = !self.config.mask_emails;
                let _ = self.config.save();
                self.set_status(if self.config.mask_emails {
                    "Emails masked"
                } else {
                    "Emails shown"
                });
            }

            // Help
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn move_down(&mut self) {
        let len = self.cache.members().len();
        if len > 0 {
            self.selected_member = (self.selected_member + 1) % len;
        }
    }

    fn move_up(&mut self) {
        let len = self.cache.members().len();
        if len > 0 {
            self.selected_member = self.selected_member.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Claim the currently visible offer. The press never hides the prompt;
    /// only its timer or a zeroed amount does that.
    fn claim_offer(&mut self) {
        let Some(button) = &self.offer else {
            return;
        };
        if !button.is_visible() {
            return;
        }

        let mut pressed = None;
        button.press(|slot| pressed = Some(slot));

        if let Some(slot) = pressed {
            // Repeat presses on a still-visible prompt must not claim twice
            if self.claimed_slots.contains(&slot) {
                return;
            }
            let amount = button.amount_label();
            self.claimed_slots.push(slot);
            self.config.open_splits.retain(|o| o.slot != slot);
            let _ = self.config.save();
            self.set_status(format!("Claimed split {} ({})", slot, amount));
        }
    }

    /// Mount a claim prompt for the next unclaimed cost-split, if any.
    fn mount_next_offer(&mut self) {
        if self.offer.is_some() {
            return;
        }
        let next = self
            .config
            .open_splits
            .iter()
            .find(|o| !self.claimed_slots.contains(&o.slot));
        if let Some(offer) = next {
            self.offer = Some(OfferButton::new(offer.slot, offer.remaining));
        }
    }

    /// Re-fetch the member snapshot for the signed-in user.
    pub async fn refresh(&mut self) {
        self.cache.refresh(self.user.as_ref(), &self.client).await;
        let len = self.cache.members().len();
        if self.selected_member >= len && len > 0 {
            self.selected_member = len - 1;
        }
    }

    /// Pick up session changes and refresh the snapshot when the signed-in
    /// identity changed (including signing in for the first time).
    async fn sync_user(&mut self) {
        let user = self.config.current_user();
        if self.user_watcher.changed(user.as_ref()) {
            self.user = user;

            // New identity means new credentials for the store
            let token = self.config.session.as_ref().and_then(|s| s.token.clone());
            match StoreClient::from_url(self.config.store_url(), token) {
                Ok(client) => self.client = client,
                Err(e) => tracing::warn!("Could not rebuild store client: {}", e),
            }

            self.refresh().await;
        } else {
            self.user = user;
        }
    }

    pub async fn tick(&mut self) -> Result<()> {
        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        // Re-read the session block and open splits so sign-ins and amount
        // changes from outside this process are picked up
        if self.last_session_poll.elapsed() >= SESSION_POLL {
            self.last_session_poll = Instant::now();
            if let Ok(disk) = AppConfig::load() {
                self.config.session = disk.session;
                self.config.open_splits = disk.open_splits;
            }
            self.sync_user().await;

            if let Some(button) = &mut self.offer {
                let slot = button.slot();
                if let Some(meta) = self.config.open_splits.iter().find(|o| o.slot == slot) {
                    button.set_remaining(meta.remaining);
                }
            }
        }

        // A hidden prompt never comes back; tear it down and mount the next
        // pending offer as a fresh button with its own timer
        let expired = self.offer.as_ref().is_some_and(|b| !b.is_visible());
        if expired {
            self.offer = None;
            self.mount_next_offer();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SplitOffer;

    fn app_with_offer(slot: usize, remaining: f64) -> App {
        let mut config = AppConfig::default();
        config.open_splits = vec![SplitOffer {
            slot,
            remaining,
            with: None,
            lift: None,
        }];

        // Never contacted in these tests
        let client = StoreClient::from_url("http://store.invalid/", None).unwrap();

        let mut app = App {
            config,
            popup: Popup::None,
            cache: MemberCache::default(),
            selected_member: 0,
            user: None,
            user_watcher: UserWatcher::default(),
            last_session_poll: Instant::now(),
            client,
            offer: None,
            claimed_slots: Vec::new(),
            status_message: None,
            status_message_time: None,
        };
        app.mount_next_offer();
        app
    }

    #[tokio::test]
    async fn test_repeated_claim_presses_record_once() {
        let mut app = app_with_offer(4, 12.5);

        app.claim_offer();
        app.claim_offer();

        assert_eq!(app.claimed_slots, vec![4]);
        assert!(app.config.open_splits.is_empty());
        // The prompt stays mounted and visible until its timer fires
        assert!(app.offer.as_ref().is_some_and(|b| b.is_visible()));
    }

    #[tokio::test]
    async fn test_claimed_split_does_not_remount() {
        let mut app = app_with_offer(2, 9.0);

        app.claim_offer();
        app.offer = None;
        app.mount_next_offer();

        assert!(app.offer.is_none());
    }
}
