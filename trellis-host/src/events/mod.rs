mod registry;

pub use registry::{EventHandlers, HandlerMap};

use crate::priority::UpdatePriority;
use smartstring::alias::String as SmartString;
use std::fmt;
use std::rc::{Rc, Weak};

/// Interaction events the adapter knows how to wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Click,
    PointerDown,
    PointerUp,
    PointerMove,
    PointerEnter,
    PointerLeave,
    Focus,
    Blur,
    KeyDown,
    KeyUp,
    Change,
}

impl EventType {
    /// Fixed iteration order for event diffing
    pub const ALL: [EventType; 11] = [
        EventType::Click,
        EventType::PointerDown,
        EventType::PointerUp,
        EventType::PointerMove,
        EventType::PointerEnter,
        EventType::PointerLeave,
        EventType::Focus,
        EventType::Blur,
        EventType::KeyDown,
        EventType::KeyUp,
        EventType::Change,
    ];

    /// Declarative prop carrying the callback
    pub fn prop_name(self) -> &'static str {
        match self {
            EventType::Click => "onClick",
            EventType::PointerDown => "onPointerDown",
            EventType::PointerUp => "onPointerUp",
            EventType::PointerMove => "onPointerMove",
            EventType::PointerEnter => "onPointerEnter",
            EventType::PointerLeave => "onPointerLeave",
            EventType::Focus => "onFocus",
            EventType::Blur => "onBlur",
            EventType::KeyDown => "onKeyDown",
            EventType::KeyUp => "onKeyUp",
            EventType::Change => "onChange",
        }
    }

    /// Native event-type identifier
    pub fn native_name(self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::PointerDown => "pointerdown",
            EventType::PointerUp => "pointerup",
            EventType::PointerMove => "pointermove",
            EventType::PointerEnter => "pointerenter",
            EventType::PointerLeave => "pointerleave",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::Change => "change",
        }
    }

    pub fn from_prop_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.prop_name() == name)
    }

    /// Priority the reconciler should give updates scheduled from this event
    pub fn priority(self) -> UpdatePriority {
        match self {
            EventType::PointerMove | EventType::PointerEnter | EventType::PointerLeave => {
                UpdatePriority::Continuous
            }
            _ => UpdatePriority::Discrete,
        }
    }
}

/// Payload delivered by the native toolkit to a handler
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click,
    Pointer { event_type: EventType, x: f32, y: f32 },
    Focus,
    Blur,
    Key { event_type: EventType, key: SmartString },
    Change { value: SmartString },
}

impl UiEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            UiEvent::Click => EventType::Click,
            UiEvent::Pointer { event_type, .. } => *event_type,
            UiEvent::Focus => EventType::Focus,
            UiEvent::Blur => EventType::Blur,
            UiEvent::Key { event_type, .. } => *event_type,
            UiEvent::Change { .. } => EventType::Change,
        }
    }
}

/// Interaction callback
///
/// Identity, not behavior, decides re-registration: two handlers are the same
/// only when they share the allocation. Callers memoize handlers they want
/// to keep stable across commits.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&UiEvent)>);

impl Handler {
    pub fn new(f: impl Fn(&UiEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &UiEvent) {
        (self.0)(event)
    }

    pub fn same(&self, other: &Handler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Non-owning reference, for caches that must not keep handlers alive
    pub fn downgrade(&self) -> WeakHandler {
        WeakHandler(Rc::downgrade(&self.0))
    }
}

#[derive(Clone)]
pub struct WeakHandler(Weak<dyn Fn(&UiEvent)>);

impl WeakHandler {
    pub fn upgrade(&self) -> Option<Handler> {
        self.0.upgrade().map(Handler)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_names_round_trip() {
        for ty in EventType::ALL {
            assert_eq!(EventType::from_prop_name(ty.prop_name()), Some(ty));
        }
        assert_eq!(EventType::from_prop_name("onclick"), None);
        assert_eq!(EventType::from_prop_name("onScroll"), None);
    }

    #[test]
    fn test_event_priorities() {
        assert_eq!(EventType::Click.priority(), UpdatePriority::Discrete);
        assert_eq!(EventType::KeyDown.priority(), UpdatePriority::Discrete);
        assert_eq!(EventType::PointerMove.priority(), UpdatePriority::Continuous);
    }

    #[test]
    fn test_handler_identity() {
        let a = Handler::new(|_| {});
        let b = Handler::new(|_| {});
        let a2 = a.clone();

        assert!(a.same(&a2));
        assert!(!a.same(&b));
    }

    #[test]
    fn test_weak_handler_follows_last_owner() {
        let handler = Handler::new(|_| {});
        let weak = handler.downgrade();
        let copy = handler.clone();

        drop(handler);
        assert!(weak.upgrade().is_some_and(|h| h.same(&copy)));

        drop(copy);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_event_type_of_payload() {
        let event = UiEvent::Key {
            event_type: EventType::KeyUp,
            key: "Enter".into(),
        };
        assert_eq!(event.event_type(), EventType::KeyUp);
        assert_eq!(
            UiEvent::Change { value: "x".into() }.event_type(),
            EventType::Change
        );
    }
}
