//! Action Runner: the lifecycle of one user-triggered operation.
//!
//! A [`Trigger`] stands for the element that starts an action (a submit
//! button, a CLI command). While its operation is in flight the trigger is
//! busy and further invocations are refused without running anything.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::RenderdeskError;
use crate::notify::{Notification, Notifier};

/// Message shown for any failure where no response was obtained.
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error";

#[derive(Debug)]
pub struct Trigger {
    name: &'static str,
    busy: AtomicBool,
}

impl Trigger {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            busy: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Atomically take the in-flight slot. `None` if already taken.
    fn begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { trigger: self })
    }
}

/// Clears the busy flag when dropped: success, error, panic, or a dropped future.
struct BusyGuard<'a> {
    trigger: &'a Trigger,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.trigger.busy.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
pub enum ActionOutcome<T> {
    /// The operation ran to completion. It has shown its own success feedback.
    Completed(T),
    /// The operation failed; the error has already been shown to the user.
    Failed(RenderdeskError),
    /// The trigger was still busy; nothing ran.
    Busy,
}

impl<T> ActionOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed(_))
    }

    /// Convert to a `Result`, for front-ends that need an exit status.
    pub fn into_result(self) -> crate::error::Result<T> {
        match self {
            ActionOutcome::Completed(value) => Ok(value),
            ActionOutcome::Failed(e) => Err(e),
            ActionOutcome::Busy => Err(RenderdeskError::Busy),
        }
    }
}

#[derive(Clone)]
pub struct ActionRunner {
    notifier: Arc<dyn Notifier>,
}

impl ActionRunner {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Run `operation` bound to `trigger`.
    ///
    /// Never returns an error: failures are reported through the notifier and
    /// handed back as [`ActionOutcome::Failed`]. The trigger is not busy again
    /// once this returns, whatever the exit path.
    pub async fn run<T, F, Fut>(&self, trigger: &Trigger, operation: F) -> ActionOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = crate::error::Result<T>>,
    {
        let Some(_busy) = trigger.begin() else {
            tracing::debug!(trigger = trigger.name(), "trigger busy, ignoring");
            return ActionOutcome::Busy;
        };

        match operation().await {
            Ok(value) => ActionOutcome::Completed(value),
            Err(e) => {
                tracing::debug!(trigger = trigger.name(), error = %e, "action failed");
                let message = if e.is_transport() {
                    CONNECTION_ERROR_MESSAGE.to_string()
                } else {
                    e.to_string()
                };
                self.notifier.notify(Notification::error(message));
                ActionOutcome::Failed(e)
            }
        }
    }
}
