use super::color::parse_color;
use super::length::parse_length;
use super::value::{StyleInput, StyleValue};
use smallvec::{SmallVec, smallvec};

/// How a style property's value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyClass {
    Length,
    Color,
    Number,
    Enumerated,
    Unknown,
}

pub fn classify(key: &str) -> PropertyClass {
    match key {
        "width" | "height" | "minWidth" | "minHeight" | "maxWidth" | "maxHeight" | "left"
        | "top" | "right" | "bottom" | "flexBasis" | "fontSize" | "letterSpacing"
        | "wordSpacing" | "margin" | "marginTop" | "marginRight" | "marginBottom"
        | "marginLeft" | "padding" | "paddingTop" | "paddingRight" | "paddingBottom"
        | "paddingLeft" | "borderRadius" | "borderTopLeftRadius" | "borderTopRightRadius"
        | "borderBottomRightRadius" | "borderBottomLeftRadius" => PropertyClass::Length,

        "color" | "backgroundColor" | "borderColor" | "borderTopColor" | "borderRightColor"
        | "borderBottomColor" | "borderLeftColor" | "imageTintColor" | "textOutlineColor" => {
            PropertyClass::Color
        }

        "opacity" | "flexGrow" | "flexShrink" | "borderWidth" | "borderTopWidth"
        | "borderRightWidth" | "borderBottomWidth" | "borderLeftWidth" | "textOutlineWidth" => {
            PropertyClass::Number
        }

        "display" | "position" | "flexDirection" | "flexWrap" | "alignItems" | "alignSelf"
        | "alignContent" | "justifyContent" | "overflow" | "visibility" | "whiteSpace"
        | "textOverflow" | "textAlign" | "fontStyle" => PropertyClass::Enumerated,

        _ => PropertyClass::Unknown,
    }
}

/// Longhands of a shorthand property, in native order
pub fn shorthand_longhands(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "padding" => Some(&["paddingTop", "paddingRight", "paddingBottom", "paddingLeft"]),
        "margin" => Some(&["marginTop", "marginRight", "marginBottom", "marginLeft"]),
        "borderWidth" => Some(&[
            "borderTopWidth",
            "borderRightWidth",
            "borderBottomWidth",
            "borderLeftWidth",
        ]),
        "borderColor" => Some(&[
            "borderTopColor",
            "borderRightColor",
            "borderBottomColor",
            "borderLeftColor",
        ]),
        "borderRadius" => Some(&[
            "borderTopLeftRadius",
            "borderTopRightRadius",
            "borderBottomRightRadius",
            "borderBottomLeftRadius",
        ]),
        _ => None,
    }
}

/// Native keys a style key writes: its longhands, or the key itself
pub fn expand_key(key: &str) -> SmallVec<[&str; 4]> {
    match shorthand_longhands(key) {
        Some(longhands) => longhands.iter().copied().collect(),
        None => smallvec![key],
    }
}

/// Convert a friendly value for `key` into a native value.
///
/// `Undefined` yields `None`. Length and color properties fall back to the
/// raw value when parsing fails; every other class passes the raw value.
pub fn parse_style_value(key: &str, input: &StyleInput) -> Option<StyleValue> {
    let parsed = match (classify(key), input) {
        (_, StyleInput::Undefined | StyleInput::Null) => None,
        (PropertyClass::Length, _) => parse_length(input).map(StyleValue::Length),
        (PropertyClass::Color, _) => parse_color(input).map(StyleValue::Color),
        _ => return StyleValue::raw(input),
    };
    if parsed.is_none() && !matches!(input, StyleInput::Undefined | StyleInput::Null) {
        tracing::debug!(key, ?input, "style value not parsed, passing raw value");
    }
    parsed.or_else(|| StyleValue::raw(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Length};

    #[test]
    fn test_classification() {
        assert_eq!(classify("width"), PropertyClass::Length);
        assert_eq!(classify("padding"), PropertyClass::Length);
        assert_eq!(classify("borderColor"), PropertyClass::Color);
        assert_eq!(classify("opacity"), PropertyClass::Number);
        assert_eq!(classify("flexDirection"), PropertyClass::Enumerated);
        assert_eq!(classify("unityFontDefinition"), PropertyClass::Unknown);
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(
            expand_key("margin").as_slice(),
            &["marginTop", "marginRight", "marginBottom", "marginLeft"]
        );
        assert_eq!(expand_key("width").as_slice(), &["width"]);
    }

    #[test]
    fn test_parse_dispatch() {
        assert_eq!(
            parse_style_value("width", &"50%".into()),
            Some(StyleValue::Length(Length::Percent(50.0)))
        );
        assert_eq!(
            parse_style_value("color", &"#fff".into()),
            Some(StyleValue::Color(Color::rgba(1.0, 1.0, 1.0, 1.0)))
        );
        assert_eq!(
            parse_style_value("opacity", &StyleInput::Number(0.5)),
            Some(StyleValue::Number(0.5))
        );
        assert_eq!(
            parse_style_value("display", &"flex".into()),
            Some(StyleValue::Text("flex".into()))
        );
    }

    #[test]
    fn test_parse_failure_falls_back_to_raw() {
        assert_eq!(
            parse_style_value("width", &"100em".into()),
            Some(StyleValue::Text("100em".into()))
        );
        assert_eq!(
            parse_style_value("color", &StyleInput::Number(3.0)),
            Some(StyleValue::Number(3.0))
        );
    }

    #[test]
    fn test_null_and_undefined_pass_through() {
        assert_eq!(
            parse_style_value("width", &StyleInput::Null),
            Some(StyleValue::Null)
        );
        assert_eq!(parse_style_value("width", &StyleInput::Undefined), None);
    }
}
