use super::keys::{KEY_BLUETOOTH, KEY_MODE_DARK, KEY_VIBRATION, KEY_VOLUME_LEVEL, SettingKey};
use super::prefs::{PrefValue, Preferences};
use serde::Serialize;

pub const DEFAULT_DARK_MODE: bool = false;
pub const DEFAULT_BLUETOOTH: bool = true;
pub const DEFAULT_VOLUME: u8 = 50;
pub const DEFAULT_VIBRATION: bool = false;

pub const MIN_VOLUME: u8 = 0;
pub const MAX_VOLUME: u8 = 100;

/// 四项设置的完整视图
///
/// 每次读取都从偏好重新构造，缺失的键用默认值补齐；
/// 修改只能通过 `with_*` 得到新的记录。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsModel {
    pub dark_mode: bool,
    pub bluetooth: bool,
    pub volume: u8,
    pub vibration: bool,
}

impl Default for SettingsModel {
    fn default() -> Self {
        Self {
            dark_mode: DEFAULT_DARK_MODE,
            bluetooth: DEFAULT_BLUETOOTH,
            volume: DEFAULT_VOLUME,
            vibration: DEFAULT_VIBRATION,
        }
    }
}

impl SettingsModel {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            dark_mode: prefs.get_bool(KEY_MODE_DARK).unwrap_or(DEFAULT_DARK_MODE),
            bluetooth: prefs.get_bool(KEY_BLUETOOTH).unwrap_or(DEFAULT_BLUETOOTH),
            volume: prefs
                .get_int(KEY_VOLUME_LEVEL)
                .map(clamp_volume)
                .unwrap_or(DEFAULT_VOLUME),
            vibration: prefs.get_bool(KEY_VIBRATION).unwrap_or(DEFAULT_VIBRATION),
        }
    }

    #[must_use]
    pub fn with_dark_mode(self, dark_mode: bool) -> Self {
        Self { dark_mode, ..self }
    }

    #[must_use]
    pub fn with_bluetooth(self, bluetooth: bool) -> Self {
        Self { bluetooth, ..self }
    }

    #[must_use]
    pub fn with_volume(self, volume: u8) -> Self {
        Self {
            volume: volume.min(MAX_VOLUME),
            ..self
        }
    }

    #[must_use]
    pub fn with_vibration(self, vibration: bool) -> Self {
        Self { vibration, ..self }
    }

    /// 按键取出对应的持久化值
    pub fn value_of(&self, key: SettingKey) -> PrefValue {
        match key {
            SettingKey::DarkMode => PrefValue::Bool(self.dark_mode),
            SettingKey::Bluetooth => PrefValue::Bool(self.bluetooth),
            SettingKey::VolumeLevel => PrefValue::Int(i64::from(self.volume)),
            SettingKey::Vibration => PrefValue::Bool(self.vibration),
        }
    }
}

/// 落盘的音量可能被手工改过，读取时收敛到 0..=100
pub fn clamp_volume(raw: i64) -> u8 {
    let clamped = raw.clamp(i64::from(MIN_VOLUME), i64::from(MAX_VOLUME));
    u8::try_from(clamped).unwrap_or(DEFAULT_VOLUME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_preferences_yield_defaults() {
        let model = SettingsModel::from_preferences(&Preferences::new());
        assert_eq!(
            model,
            SettingsModel {
                dark_mode: false,
                bluetooth: true,
                volume: 50,
                vibration: false,
            }
        );
        assert_eq!(model, SettingsModel::default());
    }

    #[test]
    fn test_partial_preferences_fill_defaults() {
        let mut prefs = Preferences::new();
        prefs.set(KEY_MODE_DARK, true.into());
        prefs.set(KEY_VOLUME_LEVEL, 80_i64.into());

        let model = SettingsModel::from_preferences(&prefs);
        assert!(model.dark_mode);
        assert!(model.bluetooth);
        assert_eq!(model.volume, 80);
        assert!(!model.vibration);
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let mut prefs = Preferences::new();
        prefs.set(KEY_BLUETOOTH, PrefValue::Int(0));
        prefs.set(KEY_VOLUME_LEVEL, PrefValue::Bool(false));

        let model = SettingsModel::from_preferences(&prefs);
        assert!(model.bluetooth);
        assert_eq!(model.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn test_volume_is_clamped() {
        assert_eq!(clamp_volume(-5), 0);
        assert_eq!(clamp_volume(0), 0);
        assert_eq!(clamp_volume(100), 100);
        assert_eq!(clamp_volume(300), 100);
        assert_eq!(SettingsModel::default().with_volume(250).volume, 100);
    }

    #[test]
    fn test_with_returns_new_record() {
        let base = SettingsModel::default();
        let changed = base.with_vibration(true);
        assert!(!base.vibration);
        assert!(changed.vibration);
        assert_eq!(changed.value_of(SettingKey::Vibration), PrefValue::Bool(true));
        assert_eq!(changed.value_of(SettingKey::VolumeLevel), PrefValue::Int(50));
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&SettingsModel::default()).expect("to_string");
        assert_eq!(
            json,
            r#"{"darkMode":false,"bluetooth":true,"volume":50,"vibration":false}"#
        );
    }
}
