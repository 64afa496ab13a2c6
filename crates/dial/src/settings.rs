//! Decoding of settings-page messages into typed preference updates.

use crate::color::{Color, OUTLINE_OFF};
use crate::prefs::{DEFAULT_VIBE_END, DEFAULT_VIBE_START, DateOverlayMode, Preferences};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Every key the settings page may send.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "camelCase")]
pub enum SettingKey {
    BackgroundColor,
    HandColor,
    DotColor,
    HourColor,
    HandOutlineColor,
    Vibrate,
    VibrateStart,
    VibrateEnd,
    HourFormat,
    DateMode,
    BluetoothAlert,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown settings key {0:?}")]
    UnknownKey(String),
    #[error("{key}: unrecognized colour {value:?}, using white")]
    UnknownColor { key: SettingKey, value: String },
    #[error("{key}: expected on/off, got {value:?}")]
    BadToggle { key: SettingKey, value: String },
    #[error("{key}: hour {value:?} is outside 0..=23, using {default}")]
    BadHour {
        key: SettingKey,
        value: String,
        default: u32,
    },
    #[error("hourFormat: expected 12 or 24, got {0:?}")]
    BadHourFormat(String),
    #[error("dateMode: expected off, tap or on, got {0:?}")]
    BadDateMode(String),
}

/// What a batch of settings did to the preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    pub changed: Vec<SettingKey>,
    pub rejected: Vec<SettingsError>,
}

pub fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_hour_format(value: &str) -> Option<bool> {
    match value.trim() {
        "12" => Some(false),
        "24" => Some(true),
        other => parse_toggle(other),
    }
}

impl Preferences {
    /// Applies `(key, value)` pairs in order. Nothing here is fatal: unknown
    /// keys are skipped, bad values either keep the previous value or fall
    /// back to a default, and every such case is logged and reported in
    /// [`Applied::rejected`].
    ///
    /// The updated display configuration is `self.display` afterwards.
    pub fn apply_settings<I, K, V>(&mut self, pairs: I) -> Applied
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut applied = Applied::default();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Ok(setting) = key.parse::<SettingKey>() else {
                log::warn!("Ignoring unknown settings key {:?}", key);
                applied.rejected.push(SettingsError::UnknownKey(key.to_string()));
                continue;
            };

            let before = self.stored(setting);
            if let Err(e) = self.set(setting, value) {
                match e {
                    // already logged by Color::decode
                    SettingsError::UnknownColor { .. } => {}
                    SettingsError::BadHour { .. } => log::error!("{}", e),
                    _ => log::warn!("{}, keeping previous value", e),
                }
                applied.rejected.push(e);
            }
            if self.stored(setting) != before && !applied.changed.contains(&setting) {
                log::debug!("{} = {}", setting, value);
                applied.changed.push(setting);
            }
        }

        applied
    }

    /// Typed setter for one key. Colour and hour errors have already
    /// substituted a default when they are returned; other errors leave the
    /// previous value in place.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        let value = value.trim();
        match key {
            SettingKey::BackgroundColor => substitute(&mut self.background, color(key, value)),
            SettingKey::HandColor => substitute(&mut self.hand, color(key, value)),
            SettingKey::DotColor => substitute(&mut self.dot, color(key, value)),
            SettingKey::HourColor => substitute(&mut self.hour, color(key, value)),
            SettingKey::HandOutlineColor => substitute(&mut self.hand_outline, outline(key, value)),
            SettingKey::Vibrate => retain(&mut self.vibrate, toggle(key, value)),
            SettingKey::BluetoothAlert => retain(&mut self.bluetooth_alert, toggle(key, value)),
            SettingKey::VibrateStart => substitute(
                &mut self.vibe_window.start,
                hour(key, value, DEFAULT_VIBE_START),
            ),
            SettingKey::VibrateEnd => {
                substitute(&mut self.vibe_window.end, hour(key, value, DEFAULT_VIBE_END))
            }
            SettingKey::HourFormat => retain(
                &mut self.display.use_24h,
                parse_hour_format(value)
                    .ok_or_else(|| SettingsError::BadHourFormat(value.to_string())),
            ),
            SettingKey::DateMode => retain(
                &mut self.date_overlay,
                value
                    .parse::<DateOverlayMode>()
                    .map_err(|_| SettingsError::BadDateMode(value.to_string())),
            ),
        }
    }
}

/// A decoded value, or the fallback to store alongside the complaint.
type Substituted<T> = Result<T, (T, SettingsError)>;

fn substitute<T>(slot: &mut T, decoded: Substituted<T>) -> Result<(), SettingsError> {
    match decoded {
        Ok(v) => {
            *slot = v;
            Ok(())
        }
        Err((fallback, e)) => {
            *slot = fallback;
            Err(e)
        }
    }
}

fn retain<T>(slot: &mut T, decoded: Result<T, SettingsError>) -> Result<(), SettingsError> {
    *slot = decoded?;
    Ok(())
}

fn color(key: SettingKey, value: &str) -> Substituted<Color> {
    Color::decode(value).map_err(|fallback| {
        let e = SettingsError::UnknownColor {
            key,
            value: value.to_string(),
        };
        (fallback, e)
    })
}

fn outline(key: SettingKey, value: &str) -> Substituted<Option<Color>> {
    if value.eq_ignore_ascii_case(OUTLINE_OFF) {
        Ok(None)
    } else {
        color(key, value).map(Some).map_err(|(c, e)| (Some(c), e))
    }
}

fn toggle(key: SettingKey, value: &str) -> Result<bool, SettingsError> {
    parse_toggle(value).ok_or_else(|| SettingsError::BadToggle {
        key,
        value: value.to_string(),
    })
}

fn hour(key: SettingKey, value: &str, default: u32) -> Substituted<u32> {
    match value.parse::<u32>() {
        Ok(h) if h < 24 => Ok(h),
        _ => Err((
            default,
            SettingsError::BadHour {
                key,
                value: value.to_string(),
                default,
            },
        )),
    }
}
