use super::{EventType, Handler};
use crate::toolkit::{NativeResult, Toolkit};
use std::collections::BTreeMap;

/// Handlers carried by a props object, keyed by event type
pub type HandlerMap = BTreeMap<EventType, Handler>;

/// Native listeners currently registered on one node
///
/// Every entry corresponds to exactly one listener on the native side.
#[derive(Debug, Clone, Default)]
pub struct EventHandlers {
    registered: BTreeMap<EventType, Handler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, event: EventType) -> Option<&Handler> {
        self.registered.get(&event)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Bring registered listeners in line with `incoming`.
    ///
    /// Reference-equal handlers (or both absent) cost no native calls. A
    /// changed handler is deregistered before its replacement is registered.
    pub fn apply<T: Toolkit>(
        &mut self,
        toolkit: &mut T,
        node: &T::Node,
        incoming: &HandlerMap,
    ) -> NativeResult<()> {
        for event in EventType::ALL {
            let next = incoming.get(&event);
            let unchanged = match (self.registered.get(&event), next) {
                (None, None) => true,
                (Some(current), Some(next)) => current.same(next),
                _ => false,
            };
            if unchanged {
                continue;
            }

            if let Some(current) = self.registered.get(&event) {
                toolkit.remove_listener(node, event, current)?;
                tracing::trace!(event = event.native_name(), "listener removed");
                self.registered.remove(&event);
            }
            if let Some(next) = next {
                toolkit.add_listener(node, event, next)?;
                tracing::trace!(event = event.native_name(), "listener added");
                self.registered.insert(event, next.clone());
            }
        }
        Ok(())
    }

    /// Drop every listener on `node` with a single native call
    pub fn clear<T: Toolkit>(&mut self, toolkit: &mut T, node: &T::Node) -> NativeResult<()> {
        toolkit.remove_all_listeners(node)?;
        self.registered.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ElementKind;
    use crate::toolkit::{NativeCall, StubToolkit};

    fn handlers(entries: &[(EventType, &Handler)]) -> HandlerMap {
        entries
            .iter()
            .map(|(event, handler)| (*event, (*handler).clone()))
            .collect()
    }

    #[test]
    fn test_swap_deregisters_then_registers() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::Button).unwrap();
        let a = Handler::new(|_| {});
        let b = Handler::new(|_| {});
        let mut registry = EventHandlers::new();

        registry
            .apply(&mut toolkit, &node, &handlers(&[(EventType::Click, &a)]))
            .unwrap();
        toolkit.take_calls();

        registry
            .apply(&mut toolkit, &node, &handlers(&[(EventType::Click, &b)]))
            .unwrap();

        assert_eq!(
            toolkit.take_calls(),
            vec![
                NativeCall::RemoveListener {
                    node,
                    event: EventType::Click,
                    handler: a.clone(),
                },
                NativeCall::AddListener {
                    node,
                    event: EventType::Click,
                    handler: b.clone(),
                },
            ]
        );
        assert!(registry.get(EventType::Click).unwrap().same(&b));
        assert_eq!(toolkit.listener_count(node), 1);
    }

    #[test]
    fn test_same_reference_is_silent() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::Button).unwrap();
        let a = Handler::new(|_| {});
        let mut registry = EventHandlers::new();

        registry
            .apply(&mut toolkit, &node, &handlers(&[(EventType::Click, &a)]))
            .unwrap();
        toolkit.take_calls();

        registry
            .apply(&mut toolkit, &node, &handlers(&[(EventType::Click, &a)]))
            .unwrap();
        assert!(toolkit.take_calls().is_empty());

        registry.apply(&mut toolkit, &node, &HandlerMap::new()).unwrap();
        assert_eq!(
            toolkit.take_calls(),
            vec![NativeCall::RemoveListener {
                node,
                event: EventType::Click,
                handler: a.clone(),
            }]
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_uses_remove_all() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::TextField).unwrap();
        let focus = Handler::new(|_| {});
        let change = Handler::new(|_| {});
        let mut registry = EventHandlers::new();

        registry
            .apply(
                &mut toolkit,
                &node,
                &handlers(&[(EventType::Focus, &focus), (EventType::Change, &change)]),
            )
            .unwrap();
        assert_eq!(registry.len(), 2);
        toolkit.take_calls();

        registry.clear(&mut toolkit, &node).unwrap();

        assert_eq!(
            toolkit.take_calls(),
            vec![NativeCall::RemoveAllListeners { node }]
        );
        assert!(registry.is_empty());
        assert_eq!(toolkit.listener_count(node), 0);
    }

    #[test]
    fn test_failed_removal_keeps_entry() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::Button).unwrap();
        let a = Handler::new(|_| {});
        let mut registry = EventHandlers::new();

        registry
            .apply(&mut toolkit, &node, &handlers(&[(EventType::Click, &a)]))
            .unwrap();

        toolkit.fail_on("remove_listener");
        assert!(registry.apply(&mut toolkit, &node, &HandlerMap::new()).is_err());
        assert!(registry.get(EventType::Click).is_some());
        assert_eq!(toolkit.listener_count(node), 1);
    }
}
