use super::{CoreState, UiAction};
use crate::core::effects::CoreEffects;
use crate::messages::app::AppCommand;
use crate::settings::SettingsStore;

pub(super) fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
    store: &SettingsStore,
) -> UiAction {
    match cmd {
        AppCommand::Quit => UiAction::Quit,
        AppCommand::Bootstrap => {
            // 每个设置页实例只从存储初始化一次；之后控件以用户操作为准，
            // 不再被存储的变更（包括自己写入的回声）覆盖
            if state.app.loaded {
                tracing::debug!("设置页已初始化，忽略重复的 Bootstrap");
                return UiAction::Handled;
            }
            state.app.settings = store.snapshot();
            state.app.loaded = true;
            state.app.settings_status = "已加载".to_owned();
            tracing::info!(settings = ?state.app.settings, "设置页初始化完成");
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        _ => UiAction::NotHandled,
    }
}
