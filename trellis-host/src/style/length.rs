use super::value::StyleInput;

/// Keyword sentinels accepted where a length is expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKeyword {
    Auto,
    None,
    Initial,
}

/// Parsed length value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
    Keyword(StyleKeyword),
}

/// Parse a length from a number (pixels) or a string.
///
/// Strings accept `auto`/`none`/`initial` (any case) or an optionally
/// negative decimal with an optional `px` or `%` suffix. Anything else,
/// including other units, yields `None`.
pub fn parse_length(input: &StyleInput) -> Option<Length> {
    match input {
        StyleInput::Number(n) => Some(Length::Px(*n as f32)),
        StyleInput::Str(s) => parse_length_str(s),
        StyleInput::Null | StyleInput::Undefined => None,
    }
}

pub fn parse_length_str(raw: &str) -> Option<Length> {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "auto" => return Some(Length::Keyword(StyleKeyword::Auto)),
        "none" => return Some(Length::Keyword(StyleKeyword::None)),
        "initial" => return Some(Length::Keyword(StyleKeyword::Initial)),
        _ => {}
    }

    if let Some(number) = trimmed.strip_suffix('%') {
        return parse_decimal(number).map(Length::Percent);
    }
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    parse_decimal(number).map(Length::Px)
}

/// `-?digits(.digits)?`, nothing else
pub(crate) fn parse_decimal(text: &str) -> Option<f32> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_pixels() {
        assert_eq!(parse_length(&StyleInput::Number(12.0)), Some(Length::Px(12.0)));
        assert_eq!(parse_length(&StyleInput::Null), None);
    }

    #[test]
    fn test_units() {
        assert_eq!(parse_length_str("50%"), Some(Length::Percent(50.0)));
        assert_eq!(parse_length_str("10px"), Some(Length::Px(10.0)));
        assert_eq!(parse_length_str("  -4.5 "), Some(Length::Px(-4.5)));
        assert_eq!(parse_length_str("0.25%"), Some(Length::Percent(0.25)));
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            parse_length_str("auto"),
            Some(Length::Keyword(StyleKeyword::Auto))
        );
        assert_eq!(
            parse_length_str(" AUTO "),
            Some(Length::Keyword(StyleKeyword::Auto))
        );
        assert_eq!(
            parse_length_str("None"),
            Some(Length::Keyword(StyleKeyword::None))
        );
        assert_eq!(
            parse_length_str("initial"),
            Some(Length::Keyword(StyleKeyword::Initial))
        );
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert_eq!(parse_length_str("100em"), None);
        assert_eq!(parse_length_str("10PX"), None);
        assert_eq!(parse_length_str("10 px"), None);
        assert_eq!(parse_length_str(".5"), None);
        assert_eq!(parse_length_str("5."), None);
        assert_eq!(parse_length_str("+5"), None);
        assert_eq!(parse_length_str("--5"), None);
        assert_eq!(parse_length_str(""), None);
        assert_eq!(parse_length_str("px"), None);
    }
}
