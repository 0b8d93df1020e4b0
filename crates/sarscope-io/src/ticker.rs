//! Repeating progress timer scoped to one upload session.
//!
//! [`ProgressTicker`] runs a Dioxus task that sleeps for the schedule's
//! interval and reports a tick, until the callback asks it to stop.
//! Dropping the ticker cancels the task, so holding it in an `Option`
//! and replacing or clearing that option is all a caller needs to stop
//! ticks on success, failure, reset or unmount.

use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use sarscope_core::SessionId;

/// Handle to a running progress timer. Dropping it stops the timer.
pub struct ProgressTicker {
    session: SessionId,
    task: Task,
}

impl ProgressTicker {
    /// Start ticking for `session` every `interval_ms` milliseconds.
    ///
    /// `on_tick` is called with the session after each interval; the
    /// timer stops once it returns `false`.
    ///
    /// The task belongs to the calling scope and is also cancelled when
    /// that scope unmounts.
    pub fn start(
        session: SessionId,
        interval_ms: u32,
        mut on_tick: impl FnMut(SessionId) -> bool + 'static,
    ) -> Self {
        let task = spawn(async move {
            loop {
                TimeoutFuture::new(interval_ms).await;
                if !on_tick(session) {
                    break;
                }
            }
        });
        Self { session, task }
    }

    /// The session this timer was started for.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.task.cancel();
    }
}
