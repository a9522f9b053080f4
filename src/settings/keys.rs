//! 持久化键名
//!
//! 键名与已落盘的数据保持一致：`volumen_level` 的拼写不能修改。

use std::fmt;
use std::str::FromStr;

/// 偏好命名空间，对应 `{data_dir}/settings.json`
pub const NAMESPACE: &str = "settings";

pub const KEY_MODE_DARK: &str = "mode_dark";
pub const KEY_BLUETOOTH: &str = "bluetooth";
pub const KEY_VOLUME_LEVEL: &str = "volumen_level";
pub const KEY_VIBRATION: &str = "vibration";

/// 四个已知设置项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    DarkMode,
    Bluetooth,
    VolumeLevel,
    Vibration,
}

/// 设置项的值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::DarkMode,
        SettingKey::Bluetooth,
        SettingKey::VolumeLevel,
        SettingKey::Vibration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::DarkMode => KEY_MODE_DARK,
            SettingKey::Bluetooth => KEY_BLUETOOTH,
            SettingKey::VolumeLevel => KEY_VOLUME_LEVEL,
            SettingKey::Vibration => KEY_VIBRATION,
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            SettingKey::VolumeLevel => ValueKind::Int,
            SettingKey::DarkMode | SettingKey::Bluetooth | SettingKey::Vibration => ValueKind::Bool,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = SettingKey::ALL.iter().map(|k| k.as_str()).collect();
                format!("未知的设置键: {s}（可选: {}）", known.join(", "))
            })
    }
}
