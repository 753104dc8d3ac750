//! Color parsing for widget configuration.
//!
//! Colors are linear RGB triples stored as [`Vec3`] with components in `[0, 1]`.

use glam::Vec3;

use crate::error::{Result, VizkitError};

/// Highlight color applied to a hovered or dragged handle.
pub const DARK_YELLOW: Vec3 = Vec3::new(0.964_705_9, 0.745_098_05, 0.0);

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("orange", [255, 165, 0]),
    ("tomato", [255, 99, 71]),
    ("seagreen", [46, 139, 87]),
    ("mediumblue", [0, 0, 205]),
    ("gold", [255, 215, 0]),
];

fn from_rgb8(rgb: [u8; 3]) -> Vec3 {
    Vec3::new(
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
    )
}

/// Parses a color from a name, a single-letter shorthand, or a hex string.
///
/// Accepted forms: `"tomato"`, `"r"`, `"#f00"`, `"#ff6347"`. Matching is
/// case-insensitive and ignores surrounding whitespace.
pub fn parse_color(value: &str) -> Result<Vec3> {
    let key = value.trim().to_ascii_lowercase();

    if let Some(hex) = key.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| {
            VizkitError::InvalidArgument(format!("'{value}' is not a valid hex color"))
        });
    }

    let name = match key.as_str() {
        "r" => "red",
        "g" => "green",
        "b" => "blue",
        "k" => "black",
        "w" => "white",
        "y" => "yellow",
        "c" => "cyan",
        "m" => "magenta",
        other => other,
    };

    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rgb)| from_rgb8(*rgb))
        .ok_or_else(|| VizkitError::InvalidArgument(format!("unknown color '{value}'")))
}

fn parse_hex(hex: &str) -> Option<Vec3> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d).ok()))
        .collect::<Option<_>>()?;

    match digits.as_slice() {
        [r, g, b] => Some(from_rgb8([r * 17, g * 17, b * 17])),
        [r1, r0, g1, g0, b1, b0] => Some(from_rgb8([
            r1 * 16 + r0,
            g1 * 16 + g0,
            b1 * 16 + b0,
        ])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn test_named_and_shorthand() {
        assert!(close(parse_color("r").unwrap(), Vec3::X));
        assert!(close(parse_color("Red").unwrap(), Vec3::X));
        assert!(close(parse_color(" blue ").unwrap(), Vec3::Z));
        assert!(close(
            parse_color("tomato").unwrap(),
            Vec3::new(1.0, 99.0 / 255.0, 71.0 / 255.0)
        ));
    }

    #[test]
    fn test_hex() {
        assert!(close(parse_color("#ff0000").unwrap(), Vec3::X));
        assert!(close(parse_color("#0F0").unwrap(), Vec3::Y));
        assert!(close(
            parse_color("#2e8b57").unwrap(),
            parse_color("seagreen").unwrap()
        ));
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            parse_color("not-a-color"),
            Err(VizkitError::InvalidArgument(_))
        ));
        assert!(parse_color("#12").is_err());
        assert!(parse_color("#gggggg").is_err());
    }
}
