use palette::Srgb;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// The closed colour vocabulary understood by the settings page.
///
/// Each colour round-trips through its short code (`"blk"`, `"red"`, ...);
/// the full English name is accepted as an alias when parsing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Color {
    #[strum(to_string = "blk", serialize = "black")]
    Black,
    #[default]
    #[strum(to_string = "wht", serialize = "white")]
    White,
    #[strum(to_string = "red")]
    Red,
    #[strum(to_string = "grn", serialize = "green")]
    Green,
    #[strum(to_string = "blu", serialize = "blue")]
    Blue,
    #[strum(to_string = "ylw", serialize = "yellow")]
    Yellow,
    #[strum(to_string = "org", serialize = "orange")]
    Orange,
    #[strum(to_string = "prp", serialize = "purple")]
    Purple,
    #[strum(to_string = "cyn", serialize = "cyan")]
    Cyan,
    #[strum(to_string = "mgt", serialize = "magenta")]
    Magenta,
    #[strum(to_string = "gry", serialize = "gray", serialize = "grey")]
    Gray,
    #[strum(to_string = "lgy", serialize = "lightgray", serialize = "lightgrey")]
    LightGray,
    #[strum(to_string = "dgy", serialize = "darkgray", serialize = "darkgrey")]
    DarkGray,
}

pub const OUTLINE_OFF: &str = "off";

impl Color {
    /// Parses a colour code. Anything outside the vocabulary is logged and
    /// comes back as `Err` carrying the default (white) to use instead.
    pub fn decode(code: &str) -> Result<Self, Self> {
        code.trim().parse().map_err(|_| {
            log::error!(
                "Unrecognized colour {:?}, falling back to {}",
                code,
                Self::default()
            );
            Self::default()
        })
    }

    pub fn encode_outline(outline: Option<Self>) -> String {
        outline.map_or_else(|| OUTLINE_OFF.to_string(), |c| c.to_string())
    }

    pub fn rgb(&self) -> Srgb<u8> {
        let (r, g, b) = match self {
            Self::Black => (0x00, 0x00, 0x00),
            Self::White => (0xff, 0xff, 0xff),
            Self::Red => (0xff, 0x00, 0x00),
            Self::Green => (0x00, 0xaa, 0x00),
            Self::Blue => (0x00, 0x55, 0xff),
            Self::Yellow => (0xff, 0xff, 0x00),
            Self::Orange => (0xff, 0x55, 0x00),
            Self::Purple => (0xaa, 0x00, 0xff),
            Self::Cyan => (0x00, 0xff, 0xff),
            Self::Magenta => (0xff, 0x00, 0xff),
            Self::Gray => (0x80, 0x80, 0x80),
            Self::LightGray => (0xaa, 0xaa, 0xaa),
            Self::DarkGray => (0x55, 0x55, 0x55),
        };
        Srgb::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_capture as capture;
    use strum::IntoEnumIterator;

    #[test]
    fn test_decode_vocabulary() {
        let cases = vec![
            ("blk", Color::Black),
            ("BLK", Color::Black),
            ("black", Color::Black),
            ("red", Color::Red),
            ("grey", Color::Gray),
            ("lgy", Color::LightGray),
            (" ylw ", Color::Yellow),
        ];

        for (code, expected) in cases {
            assert_eq!(Color::decode(code), Ok(expected), "code {code:?}");
        }
    }

    #[test]
    fn test_unknown_colour_falls_back_to_white() {
        let cases = vec!["zzz", "", "bl k"];

        for code in cases {
            let logged = capture::errors(|| assert_eq!(Color::decode(code), Err(Color::White)));
            assert_eq!(logged.len(), 1, "code {code:?}");
            assert!(logged[0].contains("Unrecognized colour"), "{logged:?}");
        }

        assert!(capture::errors(|| Color::decode("blk")).is_empty());
    }

    #[test]
    fn test_codes_round_trip() {
        for color in Color::iter() {
            assert_eq!(Color::decode(&color.to_string()), Ok(color));
        }
    }

    #[test]
    fn test_outline_encoding() {
        assert_eq!(Color::encode_outline(None), "off");
        assert_eq!(Color::encode_outline(Some(Color::Black)), "blk");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Color::Orange).unwrap();
        assert_eq!(json, "\"org\"");
        let parsed: Color = serde_json::from_str("\"Magenta\"").unwrap();
        assert_eq!(parsed, Color::Magenta);
    }

    #[test]
    fn test_rgb() {
        assert_eq!(Color::Black.rgb(), Srgb::new(0, 0, 0));
        assert_eq!(Color::White.rgb(), Srgb::new(255, 255, 255));
    }
}
