use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "menu-settings.log";
const DEFAULT_FILTER: &str = "info";

/// 持有到进程退出，保证缓冲的日志被刷出
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

/// `--log-dir` / `--log-filter` 的覆盖项
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

/// 初始化 tracing，只写按天滚动的日志文件
///
/// TUI 独占 stdout，所以不装终端输出层。日志目录默认 `{data_dir}/logs`，
/// 建不出来时退到系统临时目录。过滤规则依次取 `--log-filter`、`RUST_LOG`、`info`。
/// 重复调用时保留第一次安装的 subscriber。
pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let log_dir = resolve_log_dir(cfg.dir.unwrap_or_else(|| data_dir.join("logs")));

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(cfg.filter.as_deref()))
        .with(file_layer);

    let _ = subscriber.try_init();
    tracing::info!(log_dir = %log_dir.display(), "tracing 已初始化");

    LogGuard(Some(guard))
}

fn resolve_log_dir(preferred: PathBuf) -> PathBuf {
    if fs::create_dir_all(&preferred).is_ok() {
        return preferred;
    }
    let fallback = std::env::temp_dir().join("menu-settings-logs");
    let _ = fs::create_dir_all(&fallback);
    fallback
}

fn build_filter(explicit: Option<&str>) -> EnvFilter {
    match explicit {
        Some(s) if !s.trim().is_empty() => EnvFilter::new(s),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}
