use crate::app::App;
use crate::error::SettingsError;
use crate::messages::app::AppEvent;
use crate::settings::{PrefValue, SettingKey, SettingsStore};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// 一次待持久化的变更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefWrite {
    pub key: SettingKey,
    pub value: PrefValue,
}

/// 写入结果，回到 actor 主循环处理
#[derive(Debug)]
pub struct WriteOutcome {
    pub write: PrefWrite,
    pub result: Result<(), SettingsError>,
}

#[derive(Default)]
pub struct CoreEffects {
    pub(super) actions: Vec<CoreEffect>,
}

#[derive(Debug)]
pub enum CoreEffect {
    EmitState(Box<App>),
    EmitError(String),
    Persist(PrefWrite),
}

impl CoreEffects {
    pub fn emit_state(&mut self, app: &App) {
        self.actions.push(CoreEffect::EmitState(Box::new(app.clone())));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitError(message.into()));
    }

    pub fn persist(&mut self, key: SettingKey, value: PrefValue) {
        self.actions.push(CoreEffect::Persist(PrefWrite { key, value }));
    }

    pub fn actions(&self) -> &[CoreEffect] {
        &self.actions
    }
}

pub(super) struct CoreDispatch<'a> {
    pub(super) store: &'a SettingsStore,
    pub(super) tx_evt: &'a mpsc::Sender<AppEvent>,
    pub(super) writes: &'a mut JoinSet<WriteOutcome>,
}

pub(super) async fn run_effects(effects: CoreEffects, dispatch: &mut CoreDispatch<'_>) {
    for effect in effects.actions {
        match effect {
            CoreEffect::EmitState(app) => {
                let _ = dispatch.tx_evt.send(AppEvent::State(app)).await;
            }
            CoreEffect::EmitError(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Error(msg)).await;
            }
            CoreEffect::Persist(write) => {
                // 入队在这里同步完成，保证写入顺序与操作顺序一致；
                // 只有等待结果的部分放进 JoinSet
                match dispatch.store.enqueue(write.key.as_str(), write.value).await {
                    Ok(pending) => {
                        dispatch.writes.spawn(async move {
                            WriteOutcome {
                                write,
                                result: pending.wait().await,
                            }
                        });
                    }
                    Err(e) => {
                        dispatch
                            .writes
                            .spawn(async move { WriteOutcome { write, result: Err(e) } });
                    }
                }
            }
        }
    }
}
