//! 设置页：四项偏好（深色模式 / 蓝牙 / 音量 / 振动）的持久化与 TUI

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod messages;
pub mod settings;
pub mod ui;
