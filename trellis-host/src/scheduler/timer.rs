use super::TimeoutId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Timer entry with deadline and the timeout it belongs to
#[derive(Debug, Clone)]
pub struct Timer {
    pub deadline: Instant,
    pub id: TimeoutId,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.id == other.id
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal deadlines fire in scheduling order
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.id.raw().cmp(&self.id.raw()))
    }
}

/// Deadline-ordered timer queue
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, id: TimeoutId, deadline: Instant) {
        self.heap.push(Timer { deadline, id });
    }

    /// Drop a timer before its deadline. Returns false if it was not queued.
    pub fn cancel(&mut self, id: TimeoutId) -> bool {
        let before = self.heap.len();
        self.heap.retain(|timer| timer.id != id);
        self.heap.len() != before
    }

    /// Earliest deadline without removing it
    pub fn peek_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|timer| timer.deadline)
    }

    /// Pop all timers due at `now`, earliest first
    pub fn pop_ready(&mut self, now: Instant) -> Vec<TimeoutId> {
        let mut ready = Vec::new();
        while self.heap.peek().is_some_and(|timer| timer.deadline <= now) {
            if let Some(timer) = self.heap.pop() {
                ready.push(timer.id);
            }
        }
        ready
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
