use crate::instance::PropValue;
use smartstring::alias::String as SmartString;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Native scalar property targeted by a declarative prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    PickingMode,
    Focusable,
    Tooltip,
    Text,
    Value,
    Label,
    Multiline,
    MaxLength,
    ReadOnly,
    LowValue,
    HighValue,
    Direction,
    Source,
    ScaleMode,
    ScrollMode,
    HorizontalScrollerVisibility,
    VerticalScrollerVisibility,
    Elasticity,
    DecelerationRate,
    TouchScrollBehavior,
    ItemsSource,
    MakeItem,
    BindItem,
    UnbindItem,
    DestroyItem,
    FixedItemHeight,
    VirtualizationMethod,
    SelectionType,
    Reorderable,
    ShowBorder,
    AlternatingRowBackgrounds,
}

/// Named-constant tables exposed by the native toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumTable {
    PickingMode,
    SliderDirection,
    ScaleMode,
    ScrollViewMode,
    ScrollerVisibility,
    TouchScrollBehavior,
    VirtualizationMethod,
    SelectionType,
    AlternatingRowBackground,
}

impl EnumTable {
    /// Constant names in declaration order; a constant's value is its index.
    pub fn constants(self) -> &'static [&'static str] {
        match self {
            EnumTable::PickingMode => &["Position", "Ignore"],
            EnumTable::SliderDirection => &["Horizontal", "Vertical"],
            EnumTable::ScaleMode => &["StretchToFill", "ScaleAndCrop", "ScaleToFit"],
            EnumTable::ScrollViewMode => &["Vertical", "Horizontal", "VerticalAndHorizontal"],
            EnumTable::ScrollerVisibility => &["Auto", "AlwaysVisible", "Hidden"],
            EnumTable::TouchScrollBehavior => &["Unrestricted", "Elastic", "Clamped"],
            EnumTable::VirtualizationMethod => &["FixedHeight", "DynamicHeight"],
            EnumTable::SelectionType => &["None", "Single", "Multiple"],
            EnumTable::AlternatingRowBackground => &["None", "ContentOnly", "All"],
        }
    }
}

/// Value written to a native field
#[derive(Clone)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(SmartString),
    Enum(i32),
    Opaque(Rc<dyn Any>),
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "Bool({v})"),
            FieldValue::Number(v) => write!(f, "Number({v})"),
            FieldValue::Text(v) => write!(f, "Text({v:?})"),
            FieldValue::Enum(v) => write!(f, "Enum({v})"),
            FieldValue::Opaque(v) => write!(f, "Opaque({:p})", Rc::as_ptr(v) as *const ()),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Number(a), FieldValue::Number(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Enum(a), FieldValue::Enum(b)) => a == b,
            (FieldValue::Opaque(a), FieldValue::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&PropValue> for FieldValue {
    fn from(value: &PropValue) -> Self {
        match value {
            PropValue::Bool(v) => FieldValue::Bool(*v),
            PropValue::Number(v) => FieldValue::Number(*v),
            PropValue::Text(v) => FieldValue::Text(v.clone()),
            PropValue::Opaque(v) => FieldValue::Opaque(Rc::clone(v)),
        }
    }
}
