use crate::class::update_class_names;
use crate::config::AdapterConfig;
use crate::error::Result;
use crate::instance::{Instance, PropValue, Props};
use crate::style::{StyleKeySet, apply_style, clear_removed_styles, compute_expanded_keys};
use crate::toolkit::{FieldValue, Toolkit};

/// Bring `instance` from its committed props to `next`.
///
/// Order: style, classes, events, then type-specific props. A fresh
/// instance (empty props, no applied keys) goes through the same path,
/// which is how creation seeds its bookkeeping.
pub(crate) fn commit_props<T: Toolkit>(
    toolkit: &mut T,
    config: &AdapterConfig,
    instance: &mut Instance<T::Node>,
    next: Props,
) -> Result<()> {
    let node = instance.node.clone();

    if next.style_changed(&instance.props) {
        let next_keys = match &next.style {
            Some(style) => compute_expanded_keys(style),
            None => StyleKeySet::new(),
        };
        clear_removed_styles(toolkit, &node, &instance.applied_style_keys, &next_keys)?;
        instance.applied_style_keys = match &next.style {
            Some(style) => apply_style(toolkit, &node, style)?,
            None => StyleKeySet::new(),
        };
    }

    if next.class_changed(&instance.props) {
        update_class_names(
            toolkit,
            &node,
            instance.props.class_name.as_deref(),
            next.class_name.as_deref(),
            config.class_names,
        )?;
    }

    instance.handlers.apply(toolkit, &node, &next.handlers)?;
    apply_bound_props(toolkit, instance, &next)?;

    instance.props = next;
    Ok(())
}

/// Assign every defined prop the instance's kind binds. Undefined props
/// are left as they are on the native side.
fn apply_bound_props<T: Toolkit>(
    toolkit: &mut T,
    instance: &Instance<T::Node>,
    props: &Props,
) -> Result<()> {
    for binding in instance.kind.bindings() {
        let Some(value) = props.get(binding.prop) else {
            continue;
        };
        let value = match (binding.enum_table, value) {
            (Some(table), PropValue::Text(name)) => {
                FieldValue::Enum(toolkit.resolve_enum(table, name)?)
            }
            _ => FieldValue::from(value),
        };
        tracing::trace!(prop = binding.prop, ?value, "field set");
        toolkit.set_field(&instance.node, binding.field, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, Handler};
    use crate::instance::ElementKind;
    use crate::style::Style;
    use crate::toolkit::{Field, NativeCall, StubNode, StubToolkit};
    use std::rc::Rc;

    fn fresh(toolkit: &mut StubToolkit, kind: ElementKind) -> Instance<StubNode> {
        let node = toolkit.create_node(kind).unwrap();
        toolkit.take_calls();
        Instance::new(node, kind, Props::new())
    }

    #[test]
    fn test_first_commit_seeds_bookkeeping() {
        let mut toolkit = StubToolkit::new();
        let mut instance = fresh(&mut toolkit, ElementKind::Button);
        let click = Handler::new(|_| {});

        let props = Props::new()
            .with_style(Rc::new(Style::new().set("margin", 2)))
            .with_class("primary")
            .on(EventType::Click, click.clone())
            .attr("text", "OK");
        commit_props(&mut toolkit, &AdapterConfig::default(), &mut instance, props).unwrap();

        assert_eq!(instance.applied_style_keys.len(), 4);
        assert_eq!(instance.handlers.len(), 1);
        assert_eq!(toolkit.classes(instance.node), vec!["primary".to_string()]);
        assert_eq!(
            toolkit.field(instance.node, Field::Text),
            Some(FieldValue::Text("OK".into()))
        );
    }

    #[test]
    fn test_enum_props_resolve_through_toolkit() {
        let mut toolkit = StubToolkit::new();
        let mut instance = fresh(&mut toolkit, ElementKind::ScrollView);

        let props = Props::new()
            .attr("mode", "Horizontal")
            .attr("elasticity", 0.25);
        commit_props(&mut toolkit, &AdapterConfig::default(), &mut instance, props).unwrap();

        assert_eq!(
            toolkit.take_calls(),
            vec![
                NativeCall::SetField {
                    node: instance.node,
                    field: Field::ScrollMode,
                    value: FieldValue::Enum(1),
                },
                NativeCall::SetField {
                    node: instance.node,
                    field: Field::Elasticity,
                    value: FieldValue::Number(0.25),
                },
            ]
        );
    }

    #[test]
    fn test_unknown_enum_name_fails() {
        let mut toolkit = StubToolkit::new();
        let mut instance = fresh(&mut toolkit, ElementKind::Slider);

        let props = Props::new().attr("direction", "Sideways");
        let result = commit_props(&mut toolkit, &AdapterConfig::default(), &mut instance, props);
        assert!(result.is_err());
    }

    #[test]
    fn test_unbound_attrs_are_ignored() {
        let mut toolkit = StubToolkit::new();
        let mut instance = fresh(&mut toolkit, ElementKind::View);

        let props = Props::new().attr("text", "ignored on views");
        commit_props(&mut toolkit, &AdapterConfig::default(), &mut instance, props).unwrap();
        assert!(toolkit.take_calls().is_empty());
    }

    #[test]
    fn test_opaque_list_props_pass_through() {
        let mut toolkit = StubToolkit::new();
        let mut instance = fresh(&mut toolkit, ElementKind::ListView);
        let items = PropValue::opaque(vec!["a", "b"]);

        let props = Props::new()
            .attr("itemsSource", items.clone())
            .attr("selectionType", "Multiple");
        commit_props(&mut toolkit, &AdapterConfig::default(), &mut instance, props).unwrap();

        assert_eq!(
            toolkit.field(instance.node, Field::ItemsSource),
            Some(FieldValue::from(&items))
        );
        assert_eq!(
            toolkit.field(instance.node, Field::SelectionType),
            Some(FieldValue::Enum(2))
        );
    }
}
