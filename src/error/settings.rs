//! 偏好持久化相关错误

/// 偏好存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("JSON 序列化失败: {0}")]
    Serde(#[from] serde_json::Error),

    /// 写入队列已关闭（SettingsStore 已被释放）
    #[error("设置写入通道已关闭")]
    WriterClosed,

    /// 后台写入任务异常退出
    #[error("后台写入任务失败: {0}")]
    Worker(String),
}

impl SettingsError {
    /// 判断是否是可重试的错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, SettingsError::Io(_) | SettingsError::Worker(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        assert!(err.to_string().contains("IO 错误"));
        assert!(err.to_string().contains("access denied"));

        assert!(SettingsError::WriterClosed.to_string().contains("已关闭"));
    }

    #[test]
    fn test_is_retryable() {
        let io_err = SettingsError::Io(std::io::Error::other("test"));
        assert!(io_err.is_retryable());
        assert!(SettingsError::Worker("panicked".to_owned()).is_retryable());

        let serde_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        assert!(!SettingsError::from(serde_err).is_retryable());
        assert!(!SettingsError::WriterClosed.is_retryable());
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err = SettingsError::from(io_err);

        // 应该能获取到 source
        use std::error::Error;
        assert!(err.source().is_some());
    }
}
