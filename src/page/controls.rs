//! Submit controls, loading indicator and error banners.

use std::time::{Duration, Instant};

use crate::config::{ERROR_BANNER_TTL, SUBMIT_LABEL};

/// The form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    /// Button text
    pub label: String,
    /// Whether clicks are ignored
    pub disabled: bool,
}

impl Default for SubmitButton {
    fn default() -> Self {
        SubmitButton {
            label: SUBMIT_LABEL.to_string(),
            disabled: false,
        }
    }
}

/// A dismissible error message at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    /// Text shown to the user
    pub message: String,
    /// When the banner appeared
    pub raised_at: Instant,
}

impl ErrorBanner {
    /// Whether the banner has been shown for `ttl` or longer.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Everything on the page outside the results themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageControls {
    /// Loading indicator shown
    pub loading: bool,
    /// Results section shown
    pub results_visible: bool,
    /// The form's submit button
    pub submit: SubmitButton,
    /// Newest first
    pub banners: Vec<ErrorBanner>,
}

impl PageControls {
    /// Shows `message` on top of the existing banners.
    pub fn raise_error(&mut self, message: impl Into<String>, now: Instant) {
        self.banners.insert(
            0,
            ErrorBanner {
                message: message.into(),
                raised_at: now,
            },
        );
    }

    /// Banners still on screen at `now`.
    pub fn active_banners(&self, now: Instant) -> impl Iterator<Item = &ErrorBanner> {
        self.banners
            .iter()
            .filter(move |b| !b.is_expired(now, ERROR_BANNER_TTL))
    }

    /// Drops banners past their display time; returns how many were removed.
    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        let before = self.banners.len();
        self.banners.retain(|b| !b.is_expired(now, ERROR_BANNER_TTL));
        before - self.banners.len()
    }
}
