//! Style property engine: friendly values in, native style writes out.

mod apply;
mod color;
mod length;
mod names;
mod props;
mod value;

pub use apply::{StyleKeySet, apply_style, clear_removed_styles, compute_expanded_keys};
pub use color::{Color, parse_color, parse_color_str};
pub use length::{Length, StyleKeyword, parse_length, parse_length_str};
pub use props::{PropertyClass, classify, expand_key, parse_style_value, shorthand_longhands};
pub use value::{Style, StyleInput, StyleKey, StyleValue};
