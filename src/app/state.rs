use crate::settings::{SettingKey, SettingsModel};

/// 设置页上的一行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    DarkMode,
    Bluetooth,
    Volume,
    Vibration,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 4] = [
        SettingsItem::DarkMode,
        SettingsItem::Bluetooth,
        SettingsItem::Volume,
        SettingsItem::Vibration,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn key(self) -> SettingKey {
        match self {
            SettingsItem::DarkMode => SettingKey::DarkMode,
            SettingsItem::Bluetooth => SettingKey::Bluetooth,
            SettingsItem::Volume => SettingKey::VolumeLevel,
            SettingsItem::Vibration => SettingKey::Vibration,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingsItem::DarkMode => "深色模式",
            SettingsItem::Bluetooth => "蓝牙",
            SettingsItem::Volume => "音量",
            SettingsItem::Vibration => "振动",
        }
    }

    pub fn is_switch(self) -> bool {
        !matches!(self, SettingsItem::Volume)
    }
}

/// 设置页状态（由 actor 持有，UI 只拿快照）
#[derive(Debug, Clone)]
pub struct App {
    pub settings: SettingsModel,
    pub settings_selected: usize,
    /// 初始值已从存储读取并应用
    pub loaded: bool,
    /// 已提交但还没有结果的写入数
    pub pending_writes: usize,
    /// 最近一次操作的提示
    pub settings_status: String,
    /// 自上次修改以来的写入失败；下一次修改前一直保留
    pub save_error: Option<String>,
    /// 自上次修改以来的写入全部成功
    pub saved: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            settings: SettingsModel::default(),
            settings_selected: 0,
            loaded: false,
            pending_writes: 0,
            settings_status: "加载中...".to_owned(),
            save_error: None,
            saved: false,
        }
    }
}

impl App {
    pub fn selected_item(&self) -> SettingsItem {
        SettingsItem::from_index(self.settings_selected).unwrap_or(SettingsItem::DarkMode)
    }

    /// 状态栏文本：写入失败优先于其它提示
    pub fn status_line(&self) -> String {
        if let Some(err) = &self.save_error {
            return err.clone();
        }
        if self.pending_writes > 0 {
            format!("{}（保存中 {}）", self.settings_status, self.pending_writes)
        } else if self.saved {
            format!("{}（已保存）", self.settings_status)
        } else {
            self.settings_status.clone()
        }
    }

    /// 某一行当前显示的值
    pub fn value_label(&self, item: SettingsItem) -> String {
        let on_off = |v: bool| if v { "开" } else { "关" }.to_owned();
        match item {
            SettingsItem::DarkMode => on_off(self.settings.dark_mode),
            SettingsItem::Bluetooth => on_off(self.settings.bluetooth),
            SettingsItem::Volume => format!("{}%", self.settings.volume),
            SettingsItem::Vibration => on_off(self.settings.vibration),
        }
    }
}
