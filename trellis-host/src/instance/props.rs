use crate::events::{EventType, Handler, HandlerMap};
use crate::style::Style;
use smartstring::alias::String as SmartString;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Scalar or opaque value of a type-specific prop
#[derive(Clone)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(SmartString),
    /// Handed to the toolkit untouched (item factories, data sources)
    Opaque(Rc<dyn Any>),
}

impl PropValue {
    pub fn opaque<T: Any>(value: T) -> Self {
        PropValue::Opaque(Rc::new(value))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(v) => write!(f, "Bool({v})"),
            PropValue::Number(v) => write!(f, "Number({v})"),
            PropValue::Text(v) => write!(f, "Text({v:?})"),
            PropValue::Opaque(v) => write!(f, "Opaque({:p})", Rc::as_ptr(v) as *const ()),
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => a == b,
            (PropValue::Text(a), PropValue::Text(b)) => a == b,
            (PropValue::Opaque(a), PropValue::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value.into())
    }
}

/// Committed declarative props of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    /// Compared by reference on update
    pub style: Option<Rc<Style>>,
    pub class_name: Option<SmartString>,
    pub handlers: HandlerMap,
    /// Type-specific props, looked up through the element's bindings
    pub attrs: BTreeMap<SmartString, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: Rc<Style>) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn on(mut self, event: EventType, handler: Handler) -> Self {
        self.handlers.insert(event, handler);
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.attrs.get(name)
    }

    /// Whether the class string changed between two commits.
    /// Strings have no identity of their own, so this compares contents.
    pub(crate) fn class_changed(&self, old: &Props) -> bool {
        self.class_name != old.class_name
    }

    pub(crate) fn style_changed(&self, old: &Props) -> bool {
        match (&self.style, &old.style) {
            (Some(new), Some(old)) => !Rc::ptr_eq(new, old),
            (None, None) => false,
            _ => true,
        }
    }
}
