//! Color representation

use std::fmt;

/// A color as it appears in SpreadsheetML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Application default (usually black text, no fill)
    #[default]
    Auto,

    Rgb { r: u8, g: u8, b: u8 },

    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme slot with tint in percent (-100..=100)
    Theme { index: u8, tint: i8 },

    /// Legacy palette entry
    Indexed(u8),
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Parse `"4472C4"`, `"#4472C4"` or an eight-digit ARGB string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => {
                let (a, r, g, b) = (byte(0)?, byte(2)?, byte(4)?, byte(6)?);
                // Opaque ARGB is just RGB
                if a == 0xFF {
                    Some(Color::rgb(r, g, b))
                } else {
                    Some(Color::Argb { a, r, g, b })
                }
            }
            _ => None,
        }
    }

    /// Eight-digit ARGB hex for the `rgb` attribute, or `None` for colors that are
    /// written with `theme`/`indexed`/`auto` instead
    pub fn to_argb_hex(&self) -> Option<String> {
        match self {
            Color::Rgb { r, g, b } => Some(format!("FF{:02X}{:02X}{:02X}", r, g, b)),
            Color::Argb { a, r, g, b } => Some(format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b)),
            _ => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Rgb { r, g, b } => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => write!(f, "#{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Theme { index, tint } => write!(f, "theme({}, {}%)", index, tint),
            Color::Indexed(i) => write!(f, "indexed({})", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("4472C4"), Some(Color::rgb(0x44, 0x72, 0xC4)));
        assert_eq!(Color::from_hex("#FFFFFF"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("FF4472C4"), Some(Color::rgb(0x44, 0x72, 0xC4)));
        assert_eq!(
            Color::from_hex("80FFFFFF"),
            Some(Color::Argb { a: 0x80, r: 255, g: 255, b: 255 })
        );
        assert_eq!(Color::from_hex("12345"), None);
        assert_eq!(Color::from_hex("GG0000"), None);
        assert_eq!(Color::from_hex("ЖЖЖ"), None);
    }

    #[test]
    fn test_to_argb_hex() {
        assert_eq!(Color::WHITE.to_argb_hex().as_deref(), Some("FFFFFFFF"));
        assert_eq!(Color::Theme { index: 4, tint: 0 }.to_argb_hex(), None);
    }
}
