//! 统一错误处理模块
//!
//! 持久化层与应用层各自一套结构化错误类型。

mod app;
mod settings;

pub use app::AppError;
pub use settings::SettingsError;
