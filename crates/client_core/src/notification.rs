//! Transient status message with a single self-clearing timer.

use std::{
    fmt,
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::debug;

pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub text: String,
    pub kind: NotificationKind,
    pub visible: bool,
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.visible {
            return Ok(());
        }
        write!(f, "[{}] {}", self.kind.as_str(), self.text)
    }
}

struct NotificationSlot {
    state: NotificationState,
    generation: u64,
    clears_fired: u64,
    timer: Option<JoinHandle<()>>,
}

impl Drop for NotificationSlot {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[derive(Clone)]
pub struct NotificationService {
    slot: Arc<Mutex<NotificationSlot>>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(NotificationSlot {
                state: NotificationState::default(),
                generation: 0,
                clears_fired: 0,
                timer: None,
            })),
        }
    }

    /// Shows `text` and restarts the auto-clear countdown. A clear scheduled
    /// by an earlier call is cancelled first.
    pub async fn notify(&self, text: impl Into<String>, kind: NotificationKind) {
        let mut slot = self.slot.lock().await;
        if let Some(previous) = slot.timer.take() {
            previous.abort();
        }

        slot.generation += 1;
        let generation = slot.generation;
        slot.state = NotificationState {
            text: text.into(),
            kind,
            visible: true,
        };
        debug!(
            kind = kind.as_str(),
            generation,
            text = %slot.state.text,
            "notification shown"
        );

        slot.timer = Some(tokio::spawn(clear_after(
            Arc::downgrade(&self.slot),
            generation,
        )));
    }

    pub async fn snapshot(&self) -> NotificationState {
        self.slot.lock().await.state.clone()
    }

    pub async fn pending_timers(&self) -> usize {
        let slot = self.slot.lock().await;
        usize::from(slot.timer.as_ref().is_some_and(|timer| !timer.is_finished()))
    }

    pub async fn clears_fired(&self) -> u64 {
        self.slot.lock().await.clears_fired
    }
}

async fn clear_after(slot: Weak<Mutex<NotificationSlot>>, generation: u64) {
    tokio::time::sleep(NOTIFICATION_TTL).await;

    let Some(slot) = slot.upgrade() else {
        return;
    };
    let mut guard = slot.lock().await;
    if guard.generation != generation {
        return;
    }
    guard.state.visible = false;
    guard.clears_fired += 1;
    // Detach our own handle; nothing is pending any more.
    guard.timer = None;
    debug!(generation, "notification cleared");
}

#[cfg(test)]
#[path = "tests/notification_tests.rs"]
mod tests;
