use clap::Parser;
use futures_util::StreamExt;
use menu_settings::app::App;
use menu_settings::config::AppConfig;
use menu_settings::core;
use menu_settings::error::AppError;
use menu_settings::logging;
use menu_settings::settings::{JsonFileBackend, MemoryBackend, PreferenceBackend, SettingsStore};
use menu_settings::ui::{Cli, Command, parse_assignment, run_tui};
use std::pin::pin;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::default();
    if let Some(v) = cli.data_dir.clone() {
        cfg.data_dir = v;
    }
    if let Some(v) = cli.write_retries {
        cfg.write_policy.retries = v;
    }

    let _log_guard = logging::init(
        &cfg.data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(
        data_dir = %cfg.data_dir.display(),
        ephemeral = cli.ephemeral,
        retries = cfg.write_policy.retries,
        "menu-settings 启动"
    );

    let backend: Arc<dyn PreferenceBackend> = if cli.ephemeral {
        Arc::new(MemoryBackend::new())
    } else {
        Arc::new(JsonFileBackend::new(&cfg.data_dir, &cfg.namespace))
    };
    let store = SettingsStore::open(backend, cfg.write_policy.clone()).await;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let (tx, rx) = core::spawn_app_actor(store);
            run_tui(App::default(), tx, rx).await?;
            Ok(())
        }
        Command::Show => {
            println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
            Ok(())
        }
        Command::Set { key, value } => {
            let (key, value) = parse_assignment(&key, &value)?;
            tracing::info!(key = %key, value = ?value, "启动模式: Set");
            store.write(key.as_str(), value).await?;
            println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
            Ok(())
        }
        Command::Watch => {
            tracing::info!("启动模式: Watch");
            let mut changes = pin!(store.read_all());
            let mut ctrl_c = pin!(tokio::signal::ctrl_c());
            loop {
                tokio::select! {
                    res = &mut ctrl_c => {
                        res?;
                        break;
                    }
                    item = changes.next() => {
                        let Some(model) = item else {
                            break;
                        };
                        println!("{}", serde_json::to_string(&model)?);
                    }
                }
            }
            Ok(())
        }
    }
}
