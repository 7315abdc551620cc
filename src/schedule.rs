//! Timer port.
//!
//! Every periodic or delayed behaviour (clock tick, theme reconciliation,
//! ripple removal, toggle pulse reset, click disambiguation) goes through a
//! [`Scheduler`]. The browser adapter maps it onto `setTimeout` and
//! `setInterval`; [`ManualScheduler`] runs tasks against virtual time so
//! tests never wait on a real clock.
//!
//! Dropping a [`TaskHandle`] leaves its task running. Only
//! [`TaskHandle::cancel`] stops it.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Cancel handle for a scheduled task.
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Handle for a task that has nothing left to cancel.
    #[must_use]
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Let the task run to completion without keeping the handle.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    /// Stop the task. Cancelling a one-shot task that already ran is a no-op.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle").field("cancellable", &self.cancel.is_some()).finish()
    }
}

/// Event-loop timer facility.
pub trait Scheduler {
    /// Run `task` once after `delay_ms`.
    fn once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Run `task` every `period_ms`, first after one full period.
    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle;
}

enum Job {
    Once(Box<dyn FnOnce()>),
    Every { period_ms: u64, task: Box<dyn FnMut()> },
}

struct Entry {
    id: u64,
    due_ms: u64,
    job: Job,
}

#[derive(Default)]
struct Queue {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
    /// Periodic task currently executing, and whether it was cancelled
    /// while it ran.
    running: Option<(u64, bool)>,
}

impl Queue {
    fn push(&mut self, due_ms: u64, job: Job) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, due_ms, job });
        id
    }

    /// Remove the earliest entry due at or before `limit_ms`.
    /// Ties run in scheduling order.
    fn pop_due(&mut self, limit_ms: u64) -> Option<Entry> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= limit_ms)
            .min_by_key(|(_, entry)| (entry.due_ms, entry.id))
            .map(|(index, _)| index)?;
        Some(self.entries.swap_remove(index))
    }
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Clones share one queue, so a clone can be handed to the code under test
/// while the test keeps another to move time forward.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds elapsed since creation.
    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    /// Number of tasks still waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Move virtual time forward by `ms`, running every task that comes due
    /// in order. Tasks may schedule or cancel other tasks while running.
    pub fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now_ms + ms;
        loop {
            let Some(entry) = self.queue.borrow_mut().pop_due(target) else {
                break;
            };
            self.queue.borrow_mut().now_ms = entry.due_ms;
            match entry.job {
                Job::Once(task) => task(),
                Job::Every { period_ms, mut task } => {
                    self.queue.borrow_mut().running = Some((entry.id, false));
                    task();
                    let mut queue = self.queue.borrow_mut();
                    let cancelled = matches!(queue.running.take(), Some((_, true)));
                    if !cancelled {
                        queue.entries.push(Entry {
                            id: entry.id,
                            due_ms: entry.due_ms + period_ms,
                            job: Job::Every { period_ms, task },
                        });
                    }
                }
            }
        }
        self.queue.borrow_mut().now_ms = target;
    }

    fn schedule(&self, delay_ms: u32, job: Job) -> TaskHandle {
        let mut queue = self.queue.borrow_mut();
        let due_ms = queue.now_ms + u64::from(delay_ms);
        let id = queue.push(due_ms, job);
        let shared = Rc::clone(&self.queue);
        TaskHandle::new(move || {
            let mut queue = shared.borrow_mut();
            queue.entries.retain(|entry| entry.id != id);
            // A periodic task cancelling itself is out of the queue while it runs.
            if queue.running.is_some_and(|(running, _)| running == id) {
                queue.running = Some((id, true));
            }
        })
    }
}

impl Scheduler for ManualScheduler {
    fn once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        self.schedule(delay_ms, Job::Once(task))
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle {
        // A zero period would spin `advance` forever.
        let period = u64::from(period_ms.max(1));
        self.schedule(period_ms.max(1), Job::Every { period_ms: period, task })
    }
}
