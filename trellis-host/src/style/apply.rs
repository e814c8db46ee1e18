use super::props::{expand_key, parse_style_value};
use super::value::{Style, StyleInput, StyleKey};
use crate::toolkit::{NativeResult, Toolkit};
use std::collections::BTreeSet;

/// Longhand keys written on a native node
pub type StyleKeySet = BTreeSet<StyleKey>;

/// The longhand keys `style` would write, without touching any node
pub fn compute_expanded_keys(style: &Style) -> StyleKeySet {
    style
        .iter()
        .filter(|(_, value)| !matches!(value, StyleInput::Undefined))
        .flat_map(|(key, _)| expand_key(key))
        .map(StyleKey::from)
        .collect()
}

/// Write every defined entry of `style` onto `node`.
///
/// Shorthands are parsed once and the same value goes to each longhand.
/// Returns the exact set of longhand keys written.
pub fn apply_style<T: Toolkit>(
    toolkit: &mut T,
    node: &T::Node,
    style: &Style,
) -> NativeResult<StyleKeySet> {
    let mut written = StyleKeySet::new();
    for (key, input) in style.iter() {
        let Some(value) = parse_style_value(key, input) else {
            continue;
        };
        for longhand in expand_key(key) {
            toolkit.set_style(node, longhand, &value)?;
            tracing::trace!(key = longhand, ?value, "style set");
            written.insert(longhand.into());
        }
    }
    Ok(written)
}

/// Unset every key in `old_keys` that `new_keys` no longer carries
pub fn clear_removed_styles<T: Toolkit>(
    toolkit: &mut T,
    node: &T::Node,
    old_keys: &StyleKeySet,
    new_keys: &StyleKeySet,
) -> NativeResult<()> {
    for key in old_keys.difference(new_keys) {
        toolkit.unset_style(node, key)?;
        tracing::trace!(key = key.as_str(), "style unset");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ElementKind;
    use crate::style::{Length, StyleValue};
    use crate::toolkit::{NativeCall, StubToolkit};

    fn keys(names: &[&str]) -> StyleKeySet {
        names.iter().map(|name| StyleKey::from(*name)).collect()
    }

    #[test]
    fn test_expanded_keys_match_applied_keys() {
        let styles = [
            Style::new(),
            Style::new().set("width", 100).set("color", "red"),
            Style::new()
                .set("padding", 4)
                .set("paddingTop", 8)
                .set("borderRadius", "50%"),
            Style::new()
                .set("margin", StyleInput::Undefined)
                .set("opacity", StyleInput::Null)
                .set("unityFontStyle", "bold"),
        ];

        for style in &styles {
            let mut toolkit = StubToolkit::new();
            let node = toolkit.create_node(ElementKind::View).unwrap();
            let applied = apply_style(&mut toolkit, &node, style).unwrap();
            assert_eq!(applied, compute_expanded_keys(style), "{style:?}");
        }
    }

    #[test]
    fn test_shorthand_writes_every_longhand() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::View).unwrap();

        let applied = apply_style(&mut toolkit, &node, &Style::new().set("padding", 10)).unwrap();

        let longhands = ["paddingTop", "paddingRight", "paddingBottom", "paddingLeft"];
        assert_eq!(applied, keys(&longhands));
        for key in longhands {
            assert_eq!(
                toolkit.style(node, key),
                Some(StyleValue::Length(Length::Px(10.0)))
            );
        }
        assert_eq!(toolkit.style(node, "padding"), None);
    }

    #[test]
    fn test_undefined_entries_are_skipped() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::View).unwrap();
        toolkit.take_calls();

        let style = Style::new().set("width", StyleInput::Undefined);
        let applied = apply_style(&mut toolkit, &node, &style).unwrap();

        assert!(applied.is_empty());
        assert!(toolkit.take_calls().is_empty());
    }

    #[test]
    fn test_clear_only_touches_removed_keys() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::View).unwrap();
        toolkit.take_calls();

        let old = keys(&["width", "height", "color"]);
        let new = keys(&["width", "opacity"]);
        clear_removed_styles(&mut toolkit, &node, &old, &new).unwrap();

        assert_eq!(
            toolkit.take_calls(),
            vec![
                NativeCall::UnsetStyle {
                    node,
                    key: "color".into(),
                },
                NativeCall::UnsetStyle {
                    node,
                    key: "height".into(),
                },
            ]
        );
    }

    #[test]
    fn test_native_rejection_propagates() {
        let mut toolkit = StubToolkit::new();
        let node = toolkit.create_node(ElementKind::View).unwrap();

        toolkit.fail_on("set_style");
        let err = apply_style(&mut toolkit, &node, &Style::new().set("width", 1)).unwrap_err();
        assert_eq!(err.op, "set_style");
    }
}
