use crate::app::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// 打开设置页：读取一次存储并应用到控件
    Bootstrap,
    SettingsMoveUp,
    SettingsMoveDown,
    /// 切换当前开关项
    SettingsToggle,
    /// 开关项置为关 / 音量减一档
    SettingsDecrease,
    /// 开关项置为开 / 音量加一档
    SettingsIncrease,
    SettingsVolumeMin,
    SettingsVolumeMax,
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    State(Box<App>),
    Error(String),
}
