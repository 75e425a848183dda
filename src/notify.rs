//! Transient notifications (toasts).
//!
//! At most one notification is shown at a time. A newer one replaces the
//! pending one, so nothing needs to be cancelled.

use std::time::{Duration, Instant};

/// How long table toasts stay on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);
/// How long debug viewer notifications stay on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A notification with its display deadline.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NoticeLevel,
    shown_at: Instant,
    ttl: Duration,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }
}

/// Holds the currently visible notification.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message`, replacing whatever was visible.
    pub fn show_at(&mut self, message: impl Into<String>, level: NoticeLevel, ttl: Duration, now: Instant) {
        let message = message.into();
        tracing::debug!(?level, %message, "notification");
        self.current = Some(Notification {
            message,
            level,
            shown_at: now,
            ttl,
        });
    }

    /// Shows a table toast starting now.
    pub fn toast(&mut self, message: impl Into<String>, level: NoticeLevel) {
        self.show_at(message, level, TOAST_TTL, Instant::now());
    }

    /// Shows a debug viewer notice starting now.
    pub fn notice(&mut self, message: impl Into<String>, level: NoticeLevel) {
        self.show_at(message, level, NOTICE_TTL, Instant::now());
    }

    /// Drops the notification once its time is up. Returns true if one was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
