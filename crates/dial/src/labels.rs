use derive_more::{AsRef, Deref, Display, From, Into};
use serde::Serialize;

/// Digits shown in an hour label, already formatted for the notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct HourText(String);

crate::impl_string_newtype!(HourText);

impl HourText {
    /// 24-hour notation always prints two digits. 12-hour notation prints the
    /// zero-padded 12-hour value with its leading zero dropped, so only
    /// "10", "11" and "12" keep two digits.
    pub fn format(hour24: u32, use_24h: bool) -> Self {
        let hour24 = hour24 % 24;
        if use_24h {
            return Self(format!("{hour24:02}"));
        }

        let raw = format!("{:02}", to_twelve_hour(hour24));
        match raw.strip_prefix('0') {
            Some(trimmed) => Self::new(trimmed),
            None => Self(raw),
        }
    }
}

/// Maps 0..=23 onto 1..=12, midnight and noon both reading 12.
pub fn to_twelve_hour(hour24: u32) -> u32 {
    match hour24 % 12 {
        0 => 12,
        h => h,
    }
}
