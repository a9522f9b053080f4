use super::guard::TuiGuard;
use super::keyboard::handle_key;
use super::views::draw_ui;
use crate::app::App;
use crate::messages::app::{AppCommand, AppEvent};
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// 退出后等待 actor 收尾（落盘未完成的写入）的上限
const SHUTDOWN_WAIT: Duration = Duration::from_secs(3);

pub(super) async fn run_tui_internal(
    mut app: App,
    tx: mpsc::Sender<AppCommand>,
    mut rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    let guard = TuiGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let _ = tx.send(AppCommand::Bootstrap).await;

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(evt) = rx.try_recv() {
            apply_event(&mut app, evt);
        }

        terminal.draw(|f| draw_ui(f, &app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && handle_key(&app, key, &tx).await
        {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    drop(terminal);
    drop(guard);
    wait_actor_shutdown(&mut rx).await;
    Ok(())
}

fn apply_event(app: &mut App, evt: AppEvent) {
    match evt {
        AppEvent::State(s) => *app = *s,
        AppEvent::Error(e) => {
            app.save_error = Some(e);
            app.saved = false;
        }
    }
}

/// actor 退出时会关闭事件通道
async fn wait_actor_shutdown(rx: &mut mpsc::Receiver<AppEvent>) {
    let drained = tokio::time::timeout(SHUTDOWN_WAIT, async {
        while let Some(evt) = rx.recv().await {
            if let AppEvent::Error(e) = evt {
                tracing::warn!(err = %e, "退出过程中的错误");
            }
        }
    })
    .await;
    if drained.is_err() {
        tracing::warn!("等待设置页 actor 退出超时");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_event_updates_status() {
        let mut app = App::default();
        apply_event(&mut app, AppEvent::Error("disk full".to_owned()));
        assert_eq!(app.status_line(), "disk full");

        let next = App {
            loaded: true,
            ..App::default()
        };
        apply_event(&mut app, AppEvent::State(Box::new(next)));
        assert!(app.loaded);
    }

    #[tokio::test]
    async fn test_dark_mode_status_reaches_screen() {
        use crate::core::spawn_app_actor;
        use crate::settings::{MemoryBackend, SettingsStore, WritePolicy};
        use crate::ui::tui::views::draw_ui;
        use ratatui::backend::TestBackend;
        use std::sync::Arc;

        let store =
            SettingsStore::open(Arc::new(MemoryBackend::new()), WritePolicy::default()).await;
        let (tx, mut rx) = spawn_app_actor(store);
        tx.send(AppCommand::Bootstrap).await.expect("send");
        tx.send(AppCommand::SettingsToggle).await.expect("send");

        let mut app = App::default();
        while !(app.settings.dark_mode && app.saved) {
            let evt = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("timeout")
                .expect("channel closed");
            apply_event(&mut app, evt);
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 14)).expect("terminal");
        terminal.draw(|f| draw_ui(f, &app)).expect("draw");
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
            .replace(' ', "");
        assert!(text.contains("已切换为深色主题（已保存）"));
    }
}
