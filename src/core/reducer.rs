use crate::app::App;
use crate::messages::app::{AppCommand, AppEvent};
use crate::settings::SettingsStore;

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::core::effects::{CoreDispatch, CoreEffects, WriteOutcome, run_effects};

mod settings;
mod ui;

/// 退出时等待未完成写入的上限
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

enum CoreMsg {
    Ui(AppCommand),
    Written(WriteOutcome),
}

#[derive(Default)]
struct CoreState {
    app: App,
}

enum UiAction {
    Handled,
    NotHandled,
    Quit,
}

fn reduce(
    msg: CoreMsg,
    state: &mut CoreState,
    effects: &mut CoreEffects,
    store: &SettingsStore,
) -> bool {
    match msg {
        CoreMsg::Ui(cmd) => {
            match ui::handle_ui(&cmd, state, effects, store) {
                UiAction::Quit => return true,
                UiAction::Handled => return false,
                UiAction::NotHandled => {}
            }
            if matches!(
                settings::handle_ui(&cmd, state, effects),
                UiAction::NotHandled
            ) {
                tracing::debug!(?cmd, "未处理的命令");
            }
        }
        CoreMsg::Written(outcome) => settings::handle_write_outcome(outcome, state, effects),
    }
    false
}

/// 启动设置页 actor
///
/// 存储句柄由调用方注入。actor 退出（收到 Quit 或命令通道关闭）前会在
/// `DRAIN_TIMEOUT` 内等待已提交的写入完成，随后关闭事件通道。
pub fn spawn_app_actor(
    store: SettingsStore,
) -> (mpsc::Sender<AppCommand>, mpsc::Receiver<AppEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    tokio::spawn(async move {
        let mut state = CoreState::default();
        let mut writes: JoinSet<WriteOutcome> = JoinSet::new();

        loop {
            let msg = tokio::select! {
                maybe_cmd = rx_cmd.recv() => {
                    let Some(cmd) = maybe_cmd else {
                        break;
                    };
                    CoreMsg::Ui(cmd)
                }
                Some(joined) = writes.join_next() => match joined {
                    Ok(outcome) => CoreMsg::Written(outcome),
                    Err(e) => {
                        tracing::warn!(err = %e, "写入结果任务异常");
                        continue;
                    }
                },
            };

            let mut effects = CoreEffects::default();
            let quit = reduce(msg, &mut state, &mut effects, &store);
            let mut dispatch = CoreDispatch {
                store: &store,
                tx_evt: &tx_evt,
                writes: &mut writes,
            };
            run_effects(effects, &mut dispatch).await;
            if quit {
                break;
            }
        }

        drain_writes(&mut writes, &mut state).await;
        tracing::info!("设置页 actor 退出");
    });

    (tx_cmd, rx_evt)
}

async fn drain_writes(writes: &mut JoinSet<WriteOutcome>, state: &mut CoreState) {
    if writes.is_empty() {
        return;
    }
    tracing::info!(pending = writes.len(), "等待未完成的写入");

    let deadline = tokio::time::sleep(DRAIN_TIMEOUT);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => {
                tracing::warn!(pending = writes.len(), "退出时仍有写入未完成");
                writes.abort_all();
                break;
            }
            joined = writes.join_next() => match joined {
                None => break,
                Some(Ok(outcome)) => {
                    // UI 已经退出，只记录结果
                    let mut effects = CoreEffects::default();
                    settings::handle_write_outcome(outcome, state, &mut effects);
                }
                Some(Err(e)) => tracing::warn!(err = %e, "写入结果任务异常"),
            },
        }
    }
}
