//! Process-scoped current update priority.
//!
//! The adapter runs on one logical thread: the value lives in a
//! thread-local cell and is never shared across threads, so no locking.

use crate::events::EventType;
use std::cell::Cell;

/// Priority attached to updates scheduled by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdatePriority {
    /// No priority has been set for the current turn
    #[default]
    NoPriority,
    Discrete,
    Continuous,
    Default,
    Idle,
}

thread_local! {
    static CURRENT: Cell<UpdatePriority> = const { Cell::new(UpdatePriority::NoPriority) };
}

pub fn current_update_priority() -> UpdatePriority {
    CURRENT.with(Cell::get)
}

pub fn set_current_update_priority(priority: UpdatePriority) {
    CURRENT.with(|current| current.set(priority));
}

/// The current priority, or `Default` when nothing has been set
pub fn resolve_update_priority() -> UpdatePriority {
    match current_update_priority() {
        UpdatePriority::NoPriority => UpdatePriority::Default,
        priority => priority,
    }
}

/// Run `f` as the dispatch of a native `event`, with the current priority
/// set to the event's priority. The previous value is restored afterwards,
/// also when `f` unwinds.
pub fn with_event_priority<R>(event: EventType, f: impl FnOnce() -> R) -> R {
    struct Restore(UpdatePriority);

    impl Drop for Restore {
        fn drop(&mut self) {
            set_current_update_priority(self.0);
        }
    }

    let _restore = Restore(current_update_priority());
    set_current_update_priority(event.priority());
    f()
}
