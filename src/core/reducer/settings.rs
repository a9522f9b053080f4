use super::{CoreState, UiAction};
use crate::app::{App, SettingsItem};
use crate::core::effects::{CoreEffects, WriteOutcome};
use crate::messages::app::AppCommand;
use crate::settings::{MAX_VOLUME, MIN_VOLUME, SettingsModel};

/// 音量每档步长
const VOLUME_STEP: u8 = 5;

pub(super) fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    let app = &mut state.app;
    match cmd {
        AppCommand::SettingsMoveUp => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
                effects.emit_state(app);
            }
        }
        AppCommand::SettingsMoveDown => {
            let next = (app.settings_selected + 1).min(SettingsItem::ALL.len() - 1);
            if next != app.settings_selected {
                app.settings_selected = next;
                effects.emit_state(app);
            }
        }
        AppCommand::SettingsToggle => {
            let item = app.selected_item();
            if item.is_switch() {
                toggle(app, item, effects);
            }
        }
        // 开关行上 ←/→ 与 Enter 一样切换
        AppCommand::SettingsDecrease => {
            let item = app.selected_item();
            if item.is_switch() {
                toggle(app, item, effects);
            } else {
                let next = app
                    .settings
                    .with_volume(app.settings.volume.saturating_sub(VOLUME_STEP));
                apply_change(app, item, next, effects);
            }
        }
        AppCommand::SettingsIncrease => {
            let item = app.selected_item();
            if item.is_switch() {
                toggle(app, item, effects);
            } else {
                let next = app
                    .settings
                    .with_volume(app.settings.volume.saturating_add(VOLUME_STEP));
                apply_change(app, item, next, effects);
            }
        }
        AppCommand::SettingsVolumeMin => {
            let next = app.settings.with_volume(MIN_VOLUME);
            apply_change(app, SettingsItem::Volume, next, effects);
        }
        AppCommand::SettingsVolumeMax => {
            let next = app.settings.with_volume(MAX_VOLUME);
            apply_change(app, SettingsItem::Volume, next, effects);
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

/// 处理一次写入的结果
///
/// 失败时不回滚控件；错误提示保留到用户下一次修改，之后的成功不会覆盖它。
pub(super) fn handle_write_outcome(
    outcome: WriteOutcome,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) {
    let app = &mut state.app;
    app.pending_writes = app.pending_writes.saturating_sub(1);
    let key = outcome.write.key;
    match outcome.result {
        Ok(()) => {
            tracing::debug!(key = %key, pending = app.pending_writes, "设置已保存");
            if app.pending_writes == 0 && app.save_error.is_none() {
                app.saved = true;
            }
        }
        Err(e) => {
            tracing::warn!(key = %key, err = %e, "保存设置失败");
            let msg = format!("保存设置失败（{key}）: {e}");
            app.save_error = Some(msg.clone());
            app.saved = false;
            effects.error(msg);
        }
    }
    effects.emit_state(app);
}

/// 每次真实变化对应一次写入；值没变（例如音量已在 100）则什么都不做
fn apply_change(app: &mut App, item: SettingsItem, next: SettingsModel, effects: &mut CoreEffects) {
    if !app.loaded {
        app.settings_status = "加载中，请稍候...".to_owned();
        effects.emit_state(app);
        return;
    }
    if next == app.settings {
        return;
    }

    let key = item.key();
    app.settings = next;
    app.pending_writes += 1;
    app.save_error = None;
    app.saved = false;
    app.settings_status = match item {
        SettingsItem::DarkMode if next.dark_mode => "已切换为深色主题".to_owned(),
        SettingsItem::DarkMode => "已切换为浅色主题".to_owned(),
        _ => format!("{}: {}", item.label(), app.value_label(item)),
    };
    effects.persist(key, next.value_of(key));
    effects.emit_state(app);
}

fn toggle(app: &mut App, item: SettingsItem, effects: &mut CoreEffects) {
    let current = switch_value(&app.settings, item);
    let next = set_switch(app.settings, item, !current);
    apply_change(app, item, next, effects);
}

fn switch_value(settings: &SettingsModel, item: SettingsItem) -> bool {
    match item {
        SettingsItem::DarkMode => settings.dark_mode,
        SettingsItem::Bluetooth => settings.bluetooth,
        SettingsItem::Vibration => settings.vibration,
        SettingsItem::Volume => false,
    }
}

fn set_switch(settings: SettingsModel, item: SettingsItem, value: bool) -> SettingsModel {
    match item {
        SettingsItem::DarkMode => settings.with_dark_mode(value),
        SettingsItem::Bluetooth => settings.with_bluetooth(value),
        SettingsItem::Vibration => settings.with_vibration(value),
        SettingsItem::Volume => settings,
    }
}
