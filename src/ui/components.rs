//! Reusable UI components
//!
//! Currently hosts the timed cost-split claim button; the rest of the
//! rendering lives in `ui::mod`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::task::JoinHandle;

/// How long the claim prompt stays on screen before hiding itself.
pub const AUTO_HIDE: Duration = Duration::from_millis(3000);

/// Aborts the auto-hide timer task when the button is torn down, so an
/// expired sleep never fires against a dead button.
#[derive(Debug)]
struct TimerGuard(JoinHandle<()>);

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A claim prompt for one cost-split pairing.
///
/// Visible from the moment it is created until either the auto-hide timer
/// fires or the remaining amount drops to zero, whichever happens first.
/// Hiding is one-way: nothing brings a hidden button back.
#[derive(Debug)]
pub struct OfferButton {
    slot: usize,
    remaining: f64,
    hidden: Arc<AtomicBool>,
    _timer: TimerGuard,
}

impl OfferButton {
    /// Mount a button for the pairing at `slot` with `remaining` still owed.
    ///
    /// Must be called from within a tokio runtime; the auto-hide timer is a
    /// single spawned sleep, cancelled on drop.
    pub fn new(slot: usize, remaining: f64) -> Self {
        // A non-positive amount latches the hidden flag from the start
        let hidden = Arc::new(AtomicBool::new(remaining <= 0.0));
        let flag = Arc::clone(&hidden);
        // Anchor the deadline at mount so it is not skewed by when the
        // spawned task is first polled.
        let deadline = tokio::time::Instant::now() + AUTO_HIDE;
        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            flag.store(true, Ordering::Release);
        });

        Self {
            slot,
            remaining,
            hidden,
            _timer: TimerGuard(timer),
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Update the outstanding amount (e.g. after a partial payment lands).
    ///
    /// Dropping to zero or below latches the hidden flag, so a later top-up
    /// never brings the prompt back.
    pub fn set_remaining(&mut self, remaining: f64) {
        self.remaining = remaining;
        if remaining <= 0.0 {
            self.hidden.store(true, Ordering::Release);
        }
    }

    /// Whether the button should be drawn. Visibility is governed only by
    /// the timer and the amount, never by presses.
    pub fn is_visible(&self) -> bool {
        self.remaining > 0.0 && !self.hidden.load(Ordering::Acquire)
    }

    /// Activate the button, handing the stored slot to the callback.
    pub fn press<F: FnMut(usize)>(&self, mut on_press: F) {
        on_press(self.slot);
    }

    /// The outstanding amount, two decimals with a currency glyph prefix.
    pub fn amount_label(&self) -> String {
        format!("${:.2}", self.remaining)
    }
}

/// Draw the claim prompt, if it is still visible.
pub fn draw_offer_button(f: &mut Frame, button: &OfferButton, area: Rect) {
    if !button.is_visible() {
        return;
    }

    let line = Line::from(vec![
        Span::styled("󰄬 ", Style::default().fg(super::accent())),
        Span::styled(
            format!("Claim {} ", button.amount_label()),
            Style::default()
                .fg(super::accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(super::inactive())),
        Span::styled("Enter", Style::default().fg(super::accent())),
        Span::styled(" to accept", Style::default().fg(super::text_dim())),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_or_negative_amount_is_never_visible() {
        let zero = OfferButton::new(0, 0.0);
        let negative = OfferButton::new(1, -4.2);

        assert!(!zero.is_visible());
        assert!(!negative.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hides_after_auto_hide_elapses() {
        let button = OfferButton::new(2, 12.5);
        assert!(button.is_visible());

        tokio::time::advance(Duration::from_millis(2999)).await;
        tokio::task::yield_now().await;
        assert!(button.is_visible());

        tokio::time::advance(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(!button.is_visible());

        // One-way: still hidden much later
        tokio::time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;
        assert!(!button.is_visible());
    }

    #[tokio::test]
    async fn test_raising_amount_never_reshows_hidden_button() {
        let mut button = OfferButton::new(0, 0.0);
        assert!(!button.is_visible());

        button.set_remaining(5.0);
        assert!(!button.is_visible());
    }

    #[tokio::test]
    async fn test_set_remaining_to_zero_hides_for_good() {
        let mut button = OfferButton::new(1, 8.0);
        assert!(button.is_visible());

        button.set_remaining(0.0);
        assert!(!button.is_visible());

        button.set_remaining(8.0);
        assert!(!button.is_visible());
    }

    #[tokio::test]
    async fn test_press_invokes_callback_with_slot_once() {
        let button = OfferButton::new(4, 9.99);
        let mut calls = Vec::new();

        button.press(|slot| calls.push(slot));

        assert_eq!(calls, vec![4]);
        // Pressing never hides the button
        assert!(button.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_before_expiry_cancels_timer() {
        let button = OfferButton::new(0, 5.0);
        drop(button);

        // The aborted sleep must not fire or panic once its deadline passes
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test]
    async fn test_amount_label_formatting() {
        let button = OfferButton::new(0, 12.5);
        assert_eq!(button.amount_label(), "$12.50");

        let button = OfferButton::new(0, 3.0);
        assert_eq!(button.amount_label(), "$3.00");
    }
}
