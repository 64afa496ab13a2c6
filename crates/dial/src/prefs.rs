use crate::color::Color;
use crate::geometry::DisplayConfig;
use crate::settings::SettingKey;
use crate::store::{Store, StoreError, StoredValue};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

pub const DEFAULT_VIBE_START: u32 = 8;
pub const DEFAULT_VIBE_END: u32 = 22;

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
pub enum DateOverlayMode {
    #[strum(to_string = "off", serialize = "none")]
    Off,
    #[default]
    #[strum(to_string = "tap", serialize = "tap-to-reveal", serialize = "reveal")]
    TapToReveal,
    #[strum(to_string = "on", serialize = "always", serialize = "always-on")]
    AlwaysOn,
}

/// Inclusive range of hours in which hourly vibration is allowed. A window
/// whose start is after its end runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl Default for HourWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_VIBE_START,
            end: DEFAULT_VIBE_END,
        }
    }
}

impl HourWindow {
    pub fn contains(&self, hour24: u32) -> bool {
        if self.start <= self.end {
            (self.start..=self.end).contains(&hour24)
        } else {
            hour24 >= self.start || hour24 <= self.end
        }
    }
}

/// Everything the user can change from the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub display: DisplayConfig,
    pub background: Color,
    pub hand: Color,
    pub dot: Color,
    pub hour: Color,
    pub hand_outline: Option<Color>,
    pub vibrate: bool,
    pub vibe_window: HourWindow,
    pub date_overlay: DateOverlayMode,
    pub bluetooth_alert: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            background: Color::Black,
            hand: Color::White,
            dot: Color::White,
            hour: Color::White,
            hand_outline: None,
            vibrate: false,
            vibe_window: HourWindow::default(),
            date_overlay: DateOverlayMode::default(),
            bluetooth_alert: true,
        }
    }
}

impl Preferences {
    /// Reads every preference from `store`. Missing keys keep their defaults;
    /// stored values of the wrong type, or that no longer decode, are logged
    /// and replaced the same way a bad settings message would be.
    pub fn load(store: &impl Store, layout: DisplayConfig) -> Self {
        let mut prefs = Self {
            display: layout,
            ..Self::default()
        };

        let stored: Vec<(String, String)> = SettingKey::iter()
            .filter_map(|key| {
                let name = key.to_string();
                if !store.contains(&name) {
                    log::debug!("No stored value for {}, using default", name);
                    return None;
                }
                let value = match prefs.stored(key) {
                    StoredValue::Str(_) => store.get_string(&name),
                    StoredValue::Bool(_) => store
                        .get_bool(&name)
                        .map(|b| StoredValue::from(b).to_setting()),
                    StoredValue::Int(_) => store.get_int(&name).map(|n| n.to_string()),
                };
                if value.is_none() {
                    log::warn!("Stored {} has the wrong type, using default", name);
                }
                value.map(|v| (name, v))
            })
            .collect();

        let applied = prefs.apply_settings(stored);
        if !applied.rejected.is_empty() {
            log::warn!(
                "{} stored preference(s) could not be restored",
                applied.rejected.len()
            );
        }
        prefs
    }

    /// The value persisted for `key`.
    pub fn stored(&self, key: SettingKey) -> StoredValue {
        match key {
            SettingKey::BackgroundColor => StoredValue::from(self.background.to_string()),
            SettingKey::HandColor => StoredValue::from(self.hand.to_string()),
            SettingKey::DotColor => StoredValue::from(self.dot.to_string()),
            SettingKey::HourColor => StoredValue::from(self.hour.to_string()),
            SettingKey::HandOutlineColor => {
                StoredValue::from(Color::encode_outline(self.hand_outline))
            }
            SettingKey::Vibrate => StoredValue::from(self.vibrate),
            SettingKey::VibrateStart => StoredValue::from(self.vibe_window.start as i64),
            SettingKey::VibrateEnd => StoredValue::from(self.vibe_window.end as i64),
            SettingKey::HourFormat => StoredValue::from(self.display.use_24h),
            SettingKey::DateMode => StoredValue::from(self.date_overlay.to_string()),
            SettingKey::BluetoothAlert => StoredValue::from(self.bluetooth_alert),
        }
    }

    pub fn persist(&self, key: SettingKey, store: &mut impl Store) -> Result<(), StoreError> {
        store.set(&key.to_string(), self.stored(key))
    }
}
