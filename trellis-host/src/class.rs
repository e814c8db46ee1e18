//! Class membership diffing.

use crate::config::ClassNamePolicy;
use crate::toolkit::{NativeResult, Toolkit};
use smartstring::alias::String as SmartString;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Distinct tokens of a whitespace-separated class string.
/// A missing string is the empty set.
pub fn class_tokens(classes: Option<&str>, policy: ClassNamePolicy) -> BTreeSet<SmartString> {
    classes
        .unwrap_or_default()
        .split_whitespace()
        .map(|token| match policy {
            ClassNamePolicy::Verbatim => token.into(),
            ClassNamePolicy::Escape => escape_class_name(token),
        })
        .collect()
}

/// Escape a class token for native class lists: `md:w-1/2` -> `md_x3a_w-1_x2f_2`
pub fn escape_class_name(token: &str) -> SmartString {
    let mut escaped = SmartString::new();
    for ch in token.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            escaped.push(ch);
        } else {
            // writing to a SmartString cannot fail
            let _ = write!(escaped, "_x{:x}_", ch as u32);
        }
    }
    escaped
}

/// Remove classes that left the string and add classes that joined it.
/// Classes present in both receive no native calls.
pub fn update_class_names<T: Toolkit>(
    toolkit: &mut T,
    node: &T::Node,
    old: Option<&str>,
    new: Option<&str>,
    policy: ClassNamePolicy,
) -> NativeResult<()> {
    let old = class_tokens(old, policy);
    let new = class_tokens(new, policy);

    for class in old.difference(&new) {
        toolkit.remove_class(node, class)?;
        tracing::trace!(class = class.as_str(), "class removed");
    }
    for class in new.difference(&old) {
        toolkit.add_class(node, class)?;
        tracing::trace!(class = class.as_str(), "class added");
    }
    Ok(())
}
