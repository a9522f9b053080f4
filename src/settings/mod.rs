//! 设置持久化：键名、偏好集合、设置记录、后端与存储句柄

pub mod backend;
pub mod keys;
pub mod model;
pub mod prefs;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, PreferenceBackend};
pub use keys::{
    KEY_BLUETOOTH, KEY_MODE_DARK, KEY_VIBRATION, KEY_VOLUME_LEVEL, NAMESPACE, SettingKey,
    ValueKind,
};
pub use model::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, SettingsModel};
pub use prefs::{PrefValue, Preferences};
pub use store::{PendingWrite, SettingsStore, WritePolicy};
