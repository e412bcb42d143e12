//! Interval scheduling behind a small trait so uploader timers can run in the browser or be driven
//! by hand in tests.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use thiserror::Error;

/// How often pending removals are checked against their grace window.
pub const REMOVAL_SWEEP_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure to register an interval with the host.
pub enum SchedulerError {
    /// The browser refused the `setInterval` call.
    #[error("failed to schedule interval: {0}")]
    Interval(String),
}

/// Owned handle to a running interval. Dropping the handle cancels the interval.
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    /// Wraps a cancellation hook.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stops the interval. Further calls are no-ops.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Repeating timer source.
pub trait IntervalScheduler {
    /// Calls `tick` every `period` until the returned handle is cancelled or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] when the host cannot register the interval.
    fn every(&self, period: Duration, tick: Rc<dyn Fn()>) -> Result<TaskHandle, SchedulerError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// `setInterval`-backed scheduler used in the browser.
pub struct BrowserScheduler;

impl IntervalScheduler for BrowserScheduler {
    fn every(&self, period: Duration, tick: Rc<dyn Fn()>) -> Result<TaskHandle, SchedulerError> {
        let handle = leptos::set_interval_with_handle(move || tick(), period)
            .map_err(|err| SchedulerError::Interval(format!("{err:?}")))?;
        Ok(TaskHandle::new(move || handle.clear()))
    }
}

struct ManualTask {
    period: Duration,
    tick: Rc<dyn Fn()>,
    live: Rc<Cell<bool>>,
}

#[derive(Clone, Default)]
/// Scheduler whose intervals only fire when [`ManualScheduler::fire`] is called.
pub struct ManualScheduler {
    tasks: Rc<RefCell<Vec<ManualTask>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires every live interval registered with `period` once, in registration order.
    ///
    /// Intervals cancelled by an earlier tick in the same round do not fire.
    pub fn fire(&self, period: Duration) {
        let due: Vec<(Rc<dyn Fn()>, Rc<Cell<bool>>)> = {
            let mut tasks = self.tasks.borrow_mut();
            tasks.retain(|task| task.live.get());
            tasks
                .iter()
                .filter(|task| task.period == period)
                .map(|task| (task.tick.clone(), task.live.clone()))
                .collect()
        };
        for (tick, live) in due {
            if live.get() {
                tick();
            }
        }
    }

    /// Fires `period` intervals `rounds` times.
    pub fn fire_times(&self, period: Duration, rounds: usize) {
        for _ in 0..rounds {
            self.fire(period);
        }
    }

    /// Number of live intervals registered with `period`.
    pub fn live_tasks(&self, period: Duration) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|task| task.period == period && task.live.get())
            .count()
    }
}

impl IntervalScheduler for ManualScheduler {
    fn every(&self, period: Duration, tick: Rc<dyn Fn()>) -> Result<TaskHandle, SchedulerError> {
        let live = Rc::new(Cell::new(true));
        self.tasks.borrow_mut().push(ManualTask {
            period,
            tick,
            live: live.clone(),
        });
        Ok(TaskHandle::new(move || live.set(false)))
    }
}
