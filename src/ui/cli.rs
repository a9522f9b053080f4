use crate::error::AppError;
use crate::settings::{MAX_VOLUME, PrefValue, SettingKey, ValueKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "menu-settings",
    version,
    about = "设置页（深色模式 / 蓝牙 / 音量 / 振动），偏好持久化到本地"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 覆盖数据目录（默认走系统 data_local_dir）
    #[arg(long, env = "MENU_SETTINGS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// 覆盖日志目录（默认 `{data_dir}/logs`）
    #[arg(long, env = "MENU_SETTINGS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// 覆盖日志过滤（等价于设置 RUST_LOG）
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// 写入失败后的重试次数（默认不重试）
    #[arg(long, env = "MENU_SETTINGS_WRITE_RETRIES")]
    pub write_retries: Option<u32>,

    /// 只在内存中保存，不落盘
    #[arg(long)]
    pub ephemeral: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 运行设置页 TUI（默认）
    Tui,

    /// 以 JSON 打印当前设置
    Show,

    /// 写入单个设置项，例如 `set volumen_level 80`
    Set {
        /// mode_dark | bluetooth | volumen_level | vibration
        key: String,

        /// 布尔项接受 true/false/on/off/1/0/yes/no，音量为 0-100 的整数
        value: String,
    },

    /// 持续打印设置变化（每行一个 JSON），Ctrl-C 退出
    Watch,
}

/// 解析 `set <key> <value>` 的参数
pub fn parse_assignment(key: &str, value: &str) -> Result<(SettingKey, PrefValue), AppError> {
    let key: SettingKey = key.parse().map_err(AppError::InvalidValue)?;
    let raw = value.trim();
    let value = match key.kind() {
        ValueKind::Bool => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => PrefValue::Bool(true),
            "0" | "false" | "no" | "off" => PrefValue::Bool(false),
            _ => {
                return Err(AppError::InvalidValue(format!(
                    "{key} 需要布尔值，收到 {raw:?}"
                )));
            }
        },
        ValueKind::Int => {
            let v: i64 = raw.parse().map_err(|_| {
                AppError::InvalidValue(format!("{key} 需要整数，收到 {raw:?}"))
            })?;
            if !(0..=i64::from(MAX_VOLUME)).contains(&v) {
                return Err(AppError::InvalidValue(format!(
                    "{key} 取值范围 0-{MAX_VOLUME}，收到 {v}"
                )));
            }
            PrefValue::Int(v)
        }
    };
    Ok((key, value))
}
