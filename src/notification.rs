//! Notification lifecycle manager.
//!
//! Owns the page's single notification slot. A notification goes through
//!
//! ```text
//! notify ──► Shown ──(display window)──► Leaving ──(exit transition)──► detached
//!              │                            │
//!              └────────── dismiss ─────────┴──────────────────────────► detached
//! ```
//!
//! A new `notify` replaces whatever is in the slot immediately, with no exit
//! transition. The manager keeps the [`TimerId`] of the pending countdown and
//! cancels it whenever the notification leaves the slot early, so a stale
//! timer can never touch a newer notification. Timers that still arrive for
//! an id no longer in the slot are ignored.

use crate::timer::{TimerId, TimerQueue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    /// CSS modifier class, e.g. `notification-error`.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notification-success",
            Self::Error => "notification-error",
            Self::Info => "notification-info",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

/// Transition the notification is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Entered and counting down the display window.
    Shown,
    /// Exit transition running; detached when it ends.
    Leaving,
}

/// A displayed notification. Immutable apart from its phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Duration,
    pub phase: Phase,
}

/// Timer payloads scheduled by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTimer {
    /// Display window elapsed; start the exit transition.
    Expire(NotificationId),
    /// Exit transition finished; detach.
    Detach(NotificationId),
}

#[derive(Debug)]
struct Slot {
    notification: Notification,
    timer: TimerId,
}

#[derive(Debug)]
pub struct NotificationManager {
    display: Duration,
    exit: Duration,
    next_id: u64,
    slot: Option<Slot>,
}

impl NotificationManager {
    pub fn new(display: Duration, exit: Duration) -> Self {
        Self {
            display,
            exit,
            next_id: 0,
            slot: None,
        }
    }

    /// The notification currently on the page, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.slot.as_ref().map(|s| &s.notification)
    }

    /// Show `message`, replacing any visible notification.
    pub fn notify<T>(
        &mut self,
        timers: &mut TimerQueue<T>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId
    where
        T: From<NotificationTimer>,
    {
        if let Some(previous) = self.slot.take() {
            timers.cancel(previous.timer);
            debug!(id = previous.notification.id.0, "notification replaced");
        }

        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let timer = timers.schedule(self.display, NotificationTimer::Expire(id));
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            created_at: timers.now(),
            phase: Phase::Shown,
        };
        debug!(id = id.0, %kind, message = %notification.message, "notification shown");
        self.slot = Some(Slot {
            notification,
            timer,
        });
        id
    }

    /// Close control: detach now and cancel the pending countdown.
    ///
    /// Returns the removed notification; dismissing an empty slot is a no-op.
    pub fn dismiss<T>(&mut self, timers: &mut TimerQueue<T>) -> Option<Notification> {
        let slot = self.slot.take()?;
        timers.cancel(slot.timer);
        debug!(id = slot.notification.id.0, "notification dismissed");
        Some(slot.notification)
    }

    /// Handle a fired [`NotificationTimer`].
    pub fn on_timer<T>(&mut self, timers: &mut TimerQueue<T>, timer: NotificationTimer)
    where
        T: From<NotificationTimer>,
    {
        match timer {
            NotificationTimer::Expire(id) => {
                let exit = self.exit;
                let Some(slot) = self.slot_for(id) else {
                    return;
                };
                if slot.notification.phase == Phase::Shown {
                    slot.notification.phase = Phase::Leaving;
                    slot.timer = timers.schedule(exit, NotificationTimer::Detach(id));
                }
            }
            NotificationTimer::Detach(id) => {
                if self.slot_for(id).is_some() {
                    self.slot = None;
                    debug!(id = id.0, "notification expired");
                }
            }
        }
    }

    fn slot_for(&mut self, id: NotificationId) -> Option<&mut Slot> {
        self.slot.as_mut().filter(|s| s.notification.id == id)
    }
}
