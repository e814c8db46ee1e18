use super::color::Color;
use super::length::Length;
use smartstring::alias::String as SmartString;

/// Style property name, camelCase as written in declarative style objects
pub type StyleKey = SmartString;

/// Friendly style value as authored in a declarative style object
#[derive(Debug, Clone, PartialEq)]
pub enum StyleInput {
    /// Key present but unset; excluded from application entirely
    Undefined,
    Null,
    Number(f64),
    Str(SmartString),
}

impl From<f64> for StyleInput {
    fn from(value: f64) -> Self {
        StyleInput::Number(value)
    }
}

impl From<i32> for StyleInput {
    fn from(value: i32) -> Self {
        StyleInput::Number(value as f64)
    }
}

impl From<&str> for StyleInput {
    fn from(value: &str) -> Self {
        StyleInput::Str(value.into())
    }
}

impl From<String> for StyleInput {
    fn from(value: String) -> Self {
        StyleInput::Str(value.into())
    }
}

impl<T: Into<StyleInput>> From<Option<T>> for StyleInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleInput::Undefined, Into::into)
    }
}

/// Value written to the native style surface
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Null,
    Number(f64),
    /// Enumerated keyword, or a raw string the parsers could not handle
    Text(SmartString),
    Length(Length),
    Color(Color),
}

impl StyleValue {
    /// The raw input, passed through unparsed
    pub fn raw(input: &StyleInput) -> Option<Self> {
        match input {
            StyleInput::Undefined => None,
            StyleInput::Null => Some(StyleValue::Null),
            StyleInput::Number(n) => Some(StyleValue::Number(*n)),
            StyleInput::Str(s) => Some(StyleValue::Text(s.clone())),
        }
    }
}

/// Declarative style object: ordered `key -> value` entries
///
/// Shared between props as `Rc<Style>`; a new `Rc` is what marks a style
/// as changed for the update commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(StyleKey, StyleInput)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an earlier value in place
    pub fn set(mut self, key: &str, value: impl Into<StyleInput>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: StyleInput) {
        match self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.into(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&StyleInput> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleInput)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<StyleInput>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (key, value) in iter {
            style.insert(key.as_ref(), value.into());
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let style = Style::new()
            .set("width", 10)
            .set("color", "red")
            .set("width", "50%");

        let keys: Vec<_> = style.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["width", "color"]);
        assert_eq!(style.get("width"), Some(&StyleInput::Str("50%".into())));
    }

    #[test]
    fn test_option_maps_to_undefined() {
        let none: Option<f64> = None;
        assert_eq!(StyleInput::from(none), StyleInput::Undefined);
        assert_eq!(StyleInput::from(Some(2.0)), StyleInput::Number(2.0));
    }

    #[test]
    fn test_raw_pass_through() {
        assert_eq!(StyleValue::raw(&StyleInput::Undefined), None);
        assert_eq!(StyleValue::raw(&StyleInput::Null), Some(StyleValue::Null));
        assert_eq!(
            StyleValue::raw(&"flex".into()),
            Some(StyleValue::Text("flex".into()))
        );
    }
}
