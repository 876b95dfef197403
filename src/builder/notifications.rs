//! Notification Center
//!
//! Transient toast-style notifications. Every caught failure in the builder
//! surfaces here exactly once; nothing in the core throws past this boundary.
//! Notifications auto-dismiss after the configured lifetime.

use std::time::{Duration, Instant};

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// One transient toast
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    expires_at: Instant,
}

impl Notification {
    /// Whether the toast should still be visible at `now`
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Holds the currently visible toasts and sweeps expired ones
#[derive(Debug)]
pub struct NotificationCenter {
    lifetime: Duration,
    entries: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            entries: Vec::new(),
        }
    }

    /// Push a toast; also logs it at the matching tracing level
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NotificationLevel::Error => tracing::error!("[NOTIFY] {}", message),
            NotificationLevel::Warning => tracing::warn!("[NOTIFY] {}", message),
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!("[NOTIFY] {}", message)
            }
        }
        self.entries.push(Notification {
            level,
            message,
            expires_at: Instant::now() + self.lifetime,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Warning, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    /// Drop expired toasts
    pub fn sweep(&mut self, now: Instant) {
        self.entries.retain(|n| n.is_active(now));
    }

    /// Currently held toasts, expired ones included until the next sweep
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Latest toast of a given level, if any
    pub fn latest(&self, level: NotificationLevel) -> Option<&Notification> {
        self.entries.iter().rev().find(|n| n.level == level)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
