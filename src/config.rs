use crate::settings::{NAMESPACE, WritePolicy};
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// 运行配置：数据目录、偏好命名空间、写入策略
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub namespace: String,
    pub write_policy: WritePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("dev", "levp", "menu-settings")
            .map(|p| p.data_local_dir().to_path_buf())
            .unwrap_or_else(|| env::temp_dir().join("menu-settings"));
        Self {
            data_dir,
            namespace: NAMESPACE.to_owned(),
            write_policy: write_policy_from_env(),
        }
    }
}

fn write_policy_from_env() -> WritePolicy {
    write_policy_from(|name| env::var(name).ok())
}

/// 每个变量单独解析，缺失或无法解析时保留默认值
fn write_policy_from(lookup: impl Fn(&str) -> Option<String>) -> WritePolicy {
    let defaults = WritePolicy::default();
    WritePolicy {
        retries: parse_var(&lookup, "MENU_SETTINGS_WRITE_RETRIES").unwrap_or(defaults.retries),
        backoff_ms: parse_var(&lookup, "MENU_SETTINGS_WRITE_BACKOFF_MS")
            .unwrap_or(defaults.backoff_ms),
        backoff_max_ms: parse_var(&lookup, "MENU_SETTINGS_WRITE_BACKOFF_MAX_MS")
            .unwrap_or(defaults.backoff_max_ms),
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    lookup(name).and_then(|s| s.trim().parse().ok())
}
