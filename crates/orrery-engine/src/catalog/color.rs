use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A color string that is not `#RRGGBB` or `#RGB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #RRGGBB")]
pub struct HexColorError(pub String);

/// 8-bit sRGB color as authored in the catalog (`#RRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or the short `#RGB` form.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                let nibble =
                    |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self {
                    r: nibble(0)?,
                    g: nibble(1)?,
                    b: nibble(2)?,
                })
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

}

impl TryFrom<String> for Rgb8 {
    type Error = HexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or(HexColorError(value))
    }
}

impl From<Rgb8> for String {
    fn from(color: Rgb8) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb8::parse_hex("#FDB813"), Some(Rgb8::new(0xFD, 0xB8, 0x13)));
        assert_eq!(Rgb8::parse_hex("#fff"), Some(Rgb8::new(255, 255, 255)));
        assert_eq!(Rgb8::parse_hex("#888"), Some(Rgb8::new(0x88, 0x88, 0x88)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgb8::parse_hex("FDB813"), None);
        assert_eq!(Rgb8::parse_hex("#FDB81"), None);
        assert_eq!(Rgb8::parse_hex("#GGGGGG"), None);
        assert_eq!(Rgb8::parse_hex("#+1+2+3"), None);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c: Rgb8 = serde_json::from_str("\"#6B93D6\"").unwrap();
        assert_eq!(c, Rgb8::new(0x6B, 0x93, 0xD6));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#6B93D6\"");
        assert!(serde_json::from_str::<Rgb8>("\"blue\"").is_err());
        assert_eq!(
            Rgb8::try_from(String::from("#12345")),
            Err(HexColorError(String::from("#12345")))
        );
    }
}
