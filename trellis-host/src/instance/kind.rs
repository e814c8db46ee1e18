use crate::toolkit::{EnumTable, Field};

/// Declarative element kinds the adapter can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    View,
    Text,
    Label,
    Button,
    TextField,
    Toggle,
    Slider,
    Image,
    ScrollView,
    ListView,
    /// Bare text content inside another element
    RawText,
}

/// One declarative prop and the native field it lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropBinding {
    pub prop: &'static str,
    pub field: Field,
    /// Set for enumerated props: string values resolve against this table
    pub enum_table: Option<EnumTable>,
}

const fn bind(prop: &'static str, field: Field) -> PropBinding {
    PropBinding {
        prop,
        field,
        enum_table: None,
    }
}

const fn bind_enum(prop: &'static str, field: Field, table: EnumTable) -> PropBinding {
    PropBinding {
        prop,
        field,
        enum_table: Some(table),
    }
}

const COMMON: &[PropBinding] = &[
    bind("name", Field::Name),
    bind_enum("pickingMode", Field::PickingMode, EnumTable::PickingMode),
    bind("focusable", Field::Focusable),
    bind("tooltip", Field::Tooltip),
];

const TEXT: &[PropBinding] = &[bind("text", Field::Text)];

const TEXT_FIELD: &[PropBinding] = &[
    bind("value", Field::Value),
    bind("label", Field::Label),
    bind("multiline", Field::Multiline),
    bind("maxLength", Field::MaxLength),
    bind("readOnly", Field::ReadOnly),
];

const TOGGLE: &[PropBinding] = &[bind("value", Field::Value), bind("label", Field::Label)];

const SLIDER: &[PropBinding] = &[
    bind("value", Field::Value),
    bind("lowValue", Field::LowValue),
    bind("highValue", Field::HighValue),
    bind("label", Field::Label),
    bind_enum("direction", Field::Direction, EnumTable::SliderDirection),
];

const IMAGE: &[PropBinding] = &[
    bind("source", Field::Source),
    bind_enum("scaleMode", Field::ScaleMode, EnumTable::ScaleMode),
];

const SCROLL_VIEW: &[PropBinding] = &[
    bind_enum("mode", Field::ScrollMode, EnumTable::ScrollViewMode),
    bind_enum(
        "horizontalScrollerVisibility",
        Field::HorizontalScrollerVisibility,
        EnumTable::ScrollerVisibility,
    ),
    bind_enum(
        "verticalScrollerVisibility",
        Field::VerticalScrollerVisibility,
        EnumTable::ScrollerVisibility,
    ),
    bind("elasticity", Field::Elasticity),
    bind("decelerationRate", Field::DecelerationRate),
    bind_enum(
        "touchScrollBehavior",
        Field::TouchScrollBehavior,
        EnumTable::TouchScrollBehavior,
    ),
];

// Virtualization itself is the toolkit's job; these are handed over as-is.
const LIST_VIEW: &[PropBinding] = &[
    bind("itemsSource", Field::ItemsSource),
    bind("makeItem", Field::MakeItem),
    bind("bindItem", Field::BindItem),
    bind("unbindItem", Field::UnbindItem),
    bind("destroyItem", Field::DestroyItem),
    bind("fixedItemHeight", Field::FixedItemHeight),
    bind_enum(
        "virtualizationMethod",
        Field::VirtualizationMethod,
        EnumTable::VirtualizationMethod,
    ),
    bind_enum("selectionType", Field::SelectionType, EnumTable::SelectionType),
    bind("reorderable", Field::Reorderable),
    bind("showBorder", Field::ShowBorder),
    bind_enum(
        "showAlternatingRowBackgrounds",
        Field::AlternatingRowBackgrounds,
        EnumTable::AlternatingRowBackground,
    ),
];

impl ElementKind {
    /// Element kinds reachable from a declarative tag
    pub const TAGGED: [ElementKind; 10] = [
        ElementKind::View,
        ElementKind::Text,
        ElementKind::Label,
        ElementKind::Button,
        ElementKind::TextField,
        ElementKind::Toggle,
        ElementKind::Slider,
        ElementKind::Image,
        ElementKind::ScrollView,
        ElementKind::ListView,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::TAGGED.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::View => "view",
            ElementKind::Text => "text",
            ElementKind::Label => "label",
            ElementKind::Button => "button",
            ElementKind::TextField => "textfield",
            ElementKind::Toggle => "toggle",
            ElementKind::Slider => "slider",
            ElementKind::Image => "image",
            ElementKind::ScrollView => "scrollview",
            ElementKind::ListView => "listview",
            ElementKind::RawText => "#text",
        }
    }

    fn own_bindings(self) -> &'static [PropBinding] {
        match self {
            ElementKind::View | ElementKind::RawText => &[],
            ElementKind::Text | ElementKind::Label | ElementKind::Button => TEXT,
            ElementKind::TextField => TEXT_FIELD,
            ElementKind::Toggle => TOGGLE,
            ElementKind::Slider => SLIDER,
            ElementKind::Image => IMAGE,
            ElementKind::ScrollView => SCROLL_VIEW,
            ElementKind::ListView => LIST_VIEW,
        }
    }

    /// Every prop binding in application order: common props, then the
    /// kind's own. Text instances carry none.
    pub fn bindings(self) -> impl Iterator<Item = &'static PropBinding> {
        let common: &'static [PropBinding] = match self {
            ElementKind::RawText => &[],
            _ => COMMON,
        };
        common.iter().chain(self.own_bindings())
    }
}
