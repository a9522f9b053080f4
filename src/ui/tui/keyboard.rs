use crate::app::App;
use crate::messages::app::AppCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// 返回 true 表示退出
pub(super) async fn handle_key(
    app: &App,
    key: KeyEvent,
    tx: &mpsc::Sender<AppCommand>,
) -> bool {
    // 部分终端会同时上报按下/松开，只处理按下和重复
    if matches!(key.kind, KeyEventKind::Release) {
        return false;
    }

    let Some(cmd) = command_for_key(app, key.code) else {
        return false;
    };
    let quit = matches!(cmd, AppCommand::Quit);
    if tx.send(cmd).await.is_err() {
        tracing::warn!("设置页 actor 通道已关闭");
        return true;
    }
    quit
}

fn command_for_key(app: &App, code: KeyCode) -> Option<AppCommand> {
    let cmd = match code {
        KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
        KeyCode::Up | KeyCode::Char('k') => AppCommand::SettingsMoveUp,
        KeyCode::Down | KeyCode::Char('j') => AppCommand::SettingsMoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => AppCommand::SettingsToggle,
        KeyCode::Left | KeyCode::Char('h') => AppCommand::SettingsDecrease,
        KeyCode::Right | KeyCode::Char('l') => AppCommand::SettingsIncrease,
        KeyCode::Home if !app.selected_item().is_switch() => AppCommand::SettingsVolumeMin,
        KeyCode::End if !app.selected_item().is_switch() => AppCommand::SettingsVolumeMax,
        _ => return None,
    };
    Some(cmd)
}
