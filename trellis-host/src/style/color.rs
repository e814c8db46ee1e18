use super::length::parse_decimal;
use super::names::NAMED_COLORS;
use super::value::StyleInput;

/// RGBA color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Build a color, clamping every channel to `[0, 1]`
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    fn from_rgb24(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Self::rgba(channel(16), channel(8), channel(0), 1.0)
    }
}

/// Parse a color from `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
/// `rgb(..)`/`rgba(..)` or a CSS color name. Non-strings never parse.
pub fn parse_color(input: &StyleInput) -> Option<Color> {
    match input {
        StyleInput::Str(s) => parse_color_str(s),
        _ => None,
    }
}

pub fn parse_color_str(raw: &str) -> Option<Color> {
    let text = raw.trim().to_ascii_lowercase();

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = text
        .strip_prefix("rgba(")
        .or_else(|| text.strip_prefix("rgb("))
    {
        return parse_rgb_args(args.strip_suffix(')')?);
    }
    if text == "transparent" {
        return Some(Color::TRANSPARENT);
    }
    NAMED_COLORS
        .binary_search_by_key(&text.as_str(), |&(name, _)| name)
        .ok()
        .map(|index| Color::from_rgb24(NAMED_COLORS[index].1))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    // single-digit components are doubled: `f` reads as `ff`
    let (width, count) = match hex.len() {
        3 => (1, 3),
        4 => (1, 4),
        6 => (2, 3),
        8 => (2, 4),
        _ => return None,
    };
    let mut channels = [1.0_f32; 4];
    for (i, channel) in channels.iter_mut().take(count).enumerate() {
        let digits = &hex[i * width..(i + 1) * width];
        let value = u8::from_str_radix(digits, 16).ok()?;
        let value = if width == 1 { value * 17 } else { value };
        *channel = value as f32 / 255.0;
    }
    let [r, g, b, a] = channels;
    Some(Color::rgba(r, g, b, a))
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let percent = parts[..3].iter().all(|p| p.ends_with('%'));
    let mut rgb = [0.0_f32; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts[..3]) {
        *slot = if percent {
            parse_decimal(part.strip_suffix('%')?)? / 100.0
        } else {
            parse_channel_byte(part)? as f32 / 255.0
        };
    }

    let alpha = match parts.get(3) {
        Some(alpha) => parse_alpha(alpha)?,
        None => 1.0,
    };
    let [r, g, b] = rgb;
    Some(Color::rgba(r, g, b, alpha))
}

fn parse_channel_byte(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Alpha accepts `1`, `0.5` and `.5`
fn parse_alpha(part: &str) -> Option<f32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    part.parse().ok()
}
