//! Paint and motion configuration handed to pieces at construction
//!
//! Hosts may keep styles in JSON; colors serialize as `#rrggbbaa` strings.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BALL_SPEED, DEFAULT_PIECE_SPEED};
use crate::error::StyleError;

/// An RGBA fill color (straight alpha)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS-style color name or a `#rrggbb` / `#rrggbbaa` literal
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        let color = match s.to_lowercase().as_str() {
            "transparent" => Color::TRANSPARENT,
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "lime" => Color::rgb(0, 255, 0),
            "blue" => Color::BLUE,
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "cyan" | "aqua" => Color::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            _ => return None,
        };
        Some(color)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// `#rrggbbaa`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    #[inline]
    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_array(px: [u8; 4]) -> Self {
        Color::rgba(px[0], px[1], px[2], px[3])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_name(&s).ok_or(StyleError::UnknownColor(s))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Construction-time options for a piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceStyle {
    /// Fill paint
    pub color: Color,
    /// Initial velocity magnitude, applied to both axes
    pub speed: f32,
}

impl Default for PieceStyle {
    fn default() -> Self {
        Self::piece()
    }
}

impl PieceStyle {
    /// Defaults for a generic rectangular piece
    pub fn piece() -> Self {
        Self {
            color: Color::RED,
            speed: DEFAULT_PIECE_SPEED,
        }
    }

    /// Defaults for a ball (slower pacing)
    pub fn ball() -> Self {
        Self {
            color: Color::RED,
            speed: DEFAULT_BALL_SPEED,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Parse a style from JSON; missing fields take the piece defaults
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StyleError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names() {
        assert_eq!(Color::from_name("red"), Some(Color::RED));
        assert_eq!(Color::from_name(" Blue "), Some(Color::BLUE));
        assert_eq!(Color::from_name("grey"), Color::from_name("gray"));
        assert_eq!(Color::from_name("chartreuse-ish"), None);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_name("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(
            Color::from_name("#10203040"),
            Some(Color::rgba(0x10, 0x20, 0x30, 0x40))
        );
        assert_eq!(Color::from_name("#fff"), None);
        assert_eq!(Color::from_name("#gg0000"), None);
        assert_eq!(Color::rgb(1, 2, 3).to_hex(), "#010203ff");
    }

    #[test]
    fn test_distinct_default_speeds() {
        assert_eq!(PieceStyle::piece().speed, 6.0);
        assert_eq!(PieceStyle::ball().speed, 2.0);
        assert_eq!(PieceStyle::default(), PieceStyle::piece());
    }

    #[test]
    fn test_style_from_json() {
        let style = PieceStyle::from_json(r#"{"color":"blue","speed":3.5}"#).unwrap();
        assert_eq!(style.color, Color::BLUE);
        assert_eq!(style.speed, 3.5);

        // Missing fields fall back to the piece defaults
        let style = PieceStyle::from_json(r##"{"color":"#00ff00"}"##).unwrap();
        assert_eq!(style.color, Color::rgb(0, 255, 0));
        assert_eq!(style.speed, DEFAULT_PIECE_SPEED);
    }

    #[test]
    fn test_style_json_round_trip_uses_hex() {
        let style = PieceStyle::ball().with_color(Color::rgb(0, 0, 255));
        let json = style.to_json().unwrap();
        assert!(json.contains("#0000ffff"));
        assert_eq!(PieceStyle::from_json(&json).unwrap(), style);
    }

    #[test]
    fn test_style_rejects_unknown_color() {
        let err = PieceStyle::from_json(r#"{"color":"nope"}"#).unwrap_err();
        assert!(matches!(err, StyleError::Json(_)));
    }
}
