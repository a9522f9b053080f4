use menu_settings::app::App;
use menu_settings::core::spawn_app_actor;
use menu_settings::messages::app::{AppCommand, AppEvent};
use menu_settings::settings::{
    KEY_MODE_DARK, KEY_VOLUME_LEVEL, MemoryBackend, SettingsStore, WritePolicy,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

async fn next_event(rx: &mut mpsc::Receiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timeout")
        .expect("channel closed")
}

async fn next_state(rx: &mut mpsc::Receiver<AppEvent>) -> App {
    loop {
        if let AppEvent::State(app) = next_event(rx).await {
            return *app;
        }
    }
}

async fn state_where(rx: &mut mpsc::Receiver<AppEvent>, pred: impl Fn(&App) -> bool) -> App {
    loop {
        let app = next_state(rx).await;
        if pred(&app) {
            return app;
        }
    }
}

async fn open_store(backend: Arc<MemoryBackend>) -> SettingsStore {
    SettingsStore::open(backend, WritePolicy::default()).await
}

#[tokio::test]
async fn bootstrap_applies_stored_values() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_store(backend.clone()).await;
    store.write_bool(KEY_MODE_DARK, true).await.expect("write");
    store.write_int(KEY_VOLUME_LEVEL, 30).await.expect("write");

    let (tx, mut rx) = spawn_app_actor(store);
    tx.send(AppCommand::Bootstrap).await.expect("send");

    let app = next_state(&mut rx).await;
    assert!(app.loaded);
    assert!(app.settings.dark_mode);
    assert_eq!(app.settings.volume, 30);
    assert!(app.settings.bluetooth);
}

#[tokio::test]
async fn store_changes_after_init_do_not_overwrite_controls() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_store(backend.clone()).await;
    let external = store.clone();

    let (tx, mut rx) = spawn_app_actor(store);
    tx.send(AppCommand::Bootstrap).await.expect("send");
    assert_eq!(next_state(&mut rx).await.settings.volume, 50);

    // 存储在初始化之后又变化了（比如另一个进程/句柄写入）
    external.write_int(KEY_VOLUME_LEVEL, 90).await.expect("external write");
    external.write_bool(KEY_MODE_DARK, true).await.expect("external write");

    // 重复的 Bootstrap 不会重新应用存储
    tx.send(AppCommand::Bootstrap).await.expect("send");
    tx.send(AppCommand::SettingsMoveDown).await.expect("send");
    let app = next_state(&mut rx).await;
    assert_eq!(app.settings_selected, 1);
    assert_eq!(app.settings.volume, 50);
    assert!(!app.settings.dark_mode);
}

#[tokio::test]
async fn each_control_change_is_persisted() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_store(backend.clone()).await;
    let reader = store.clone();

    let (tx, mut rx) = spawn_app_actor(store);
    tx.send(AppCommand::Bootstrap).await.expect("send");
    next_state(&mut rx).await;

    // 深色模式开，移到音量行连调三次，再移到振动行打开
    for cmd in [
        AppCommand::SettingsToggle,
        AppCommand::SettingsMoveDown,
        AppCommand::SettingsMoveDown,
        AppCommand::SettingsIncrease,
        AppCommand::SettingsIncrease,
        AppCommand::SettingsIncrease,
        AppCommand::SettingsMoveDown,
        AppCommand::SettingsToggle,
    ] {
        tx.send(cmd).await.expect("send");
    }

    // 最后一个操作打开振动；等它的写入也有结果
    let app = state_where(&mut rx, |app| app.settings.vibration && app.pending_writes == 0).await;
    assert!(app.saved);
    assert_eq!(app.status_line(), "振动: 开（已保存）");

    let stored = reader.snapshot();
    assert!(stored.dark_mode);
    assert_eq!(stored.volume, 65);
    assert!(stored.vibration);
    assert!(stored.bluetooth);
    assert_eq!(stored, app.settings);
    assert_eq!(backend.stored().len(), 3);
}

#[tokio::test]
async fn failed_write_surfaces_error() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_store(backend.clone()).await;

    let (tx, mut rx) = spawn_app_actor(store);
    tx.send(AppCommand::Bootstrap).await.expect("send");
    next_state(&mut rx).await;

    backend.fail_next_saves(1);
    tx.send(AppCommand::SettingsToggle).await.expect("send");

    let message = loop {
        if let AppEvent::Error(msg) = next_event(&mut rx).await {
            break msg;
        }
    };
    assert!(message.contains("mode_dark"));
    assert!(backend.stored().is_empty());

    // 控件保持用户的选择
    let app = next_state(&mut rx).await;
    assert!(app.settings.dark_mode);
    assert_eq!(app.pending_writes, 0);
}
