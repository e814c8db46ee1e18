mod timer;

pub use timer::TimerQueue;

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Deferred unit of work handed to the host
pub type Task = Box<dyn FnOnce()>;

/// Handle returned by [`HostScheduler::set_timeout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutId(u64);

impl TimeoutId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Host timer facilities the reconciler schedules through.
///
/// The adapter forwards to these unchanged: no buffering, no coalescing.
pub trait HostScheduler {
    fn set_timeout(&mut self, task: Task, delay: Duration) -> TimeoutId;

    fn clear_timeout(&mut self, id: TimeoutId);

    /// Run `task` at the end of the current synchronous turn
    fn queue_microtask(&mut self, task: Task);
}

#[derive(Default)]
struct SchedulerState {
    timers: TimerQueue,
    pending: HashMap<TimeoutId, Task>,
    microtasks: VecDeque<Task>,
    next_id: u64,
}

/// In-process host scheduler, driven by the embedding event loop
///
/// Clones share one queue, so tasks can capture a handle and schedule more
/// work while they run.
#[derive(Clone, Default)]
pub struct LocalScheduler {
    inner: Rc<RefCell<SchedulerState>>,
}

impl LocalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the microtask queue, including tasks queued while draining.
    /// Returns how many ran.
    pub fn run_microtasks(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.inner.borrow_mut().microtasks.pop_front();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Run every timeout due at `now` in deadline order. Returns how many ran.
    pub fn tick(&self, now: Instant) -> usize {
        let ready = self.inner.borrow_mut().timers.pop_ready(now);
        let mut ran = 0;
        for id in ready {
            let task = self.inner.borrow_mut().pending.remove(&id);
            if let Some(task) = task {
                task();
                ran += 1;
            }
        }
        ran
    }

    /// Earliest deadline among scheduled timeouts, for sleeping the loop
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.borrow().timers.peek_deadline()
    }

    pub fn pending_timeouts(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn pending_microtasks(&self) -> usize {
        self.inner.borrow().microtasks.len()
    }
}

impl HostScheduler for LocalScheduler {
    fn set_timeout(&mut self, task: Task, delay: Duration) -> TimeoutId {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let id = TimeoutId(state.next_id);
        state.timers.schedule(id, Instant::now() + delay);
        state.pending.insert(id, task);
        id
    }

    fn clear_timeout(&mut self, id: TimeoutId) {
        let mut state = self.inner.borrow_mut();
        if state.pending.remove(&id).is_some() {
            state.timers.cancel(id);
        }
    }

    fn queue_microtask(&mut self, task: Task) {
        self.inner.borrow_mut().microtasks.push_back(task);
    }
}
