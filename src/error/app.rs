//! 应用通用错误

use super::SettingsError;

/// 应用通用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("JSON 序列化失败: {0}")]
    Serde(#[from] serde_json::Error),

    /// 设置错误
    #[error("设置错误: {0}")]
    Settings(#[from] SettingsError),

    /// 命令行传入的设置值无效
    #[error("设置值无效: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件未找到");
        let err = AppError::Io(io_err);
        assert!(err.to_string().contains("IO 错误"));
    }

    #[test]
    fn test_settings_error_wraps() {
        let err = AppError::from(SettingsError::WriterClosed);
        assert!(matches!(err, AppError::Settings(SettingsError::WriterClosed)));
        assert!(err.to_string().starts_with("设置错误"));
    }

    #[test]
    fn test_invalid_value() {
        let err = AppError::InvalidValue("volumen_level=300".to_owned());
        assert!(err.to_string().contains("volumen_level=300"));
    }
}
