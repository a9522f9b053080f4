use super::prefs::Preferences;
use crate::error::SettingsError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

/// 偏好的持久化后端
///
/// 方法都是阻塞调用，`SettingsStore` 会把它们放到 `spawn_blocking` 里执行。
/// `save` 必须整体替换整个命名空间：要么全部落盘，要么保持原样。
pub trait PreferenceBackend: Send + Sync + 'static {
    /// 读取整个命名空间；不存在时返回空集合
    fn load(&self) -> Result<Preferences, SettingsError>;

    fn save(&self, prefs: &Preferences) -> Result<(), SettingsError>;

    /// 用于日志的位置描述
    fn location(&self) -> String;
}

/// `{data_dir}/{namespace}.json`
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: &Path, namespace: &str) -> Self {
        Self {
            path: data_dir.join(format!("{namespace}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for JsonFileBackend {
    fn load(&self) -> Result<Preferences, SettingsError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Preferences::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(Preferences::from_json(&bytes)?)
    }

    fn save(&self, prefs: &Preferences) -> Result<(), SettingsError> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)?;

        let bytes = serde_json::to_vec_pretty(prefs)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        // 原子性替换
        tmp.persist(&self.path).map_err(|e| SettingsError::Io(e.error))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// 不落盘的后端：`--ephemeral` 模式以及测试使用
#[derive(Debug, Default)]
pub struct MemoryBackend {
    prefs: Mutex<Preferences>,
    failing_saves: AtomicU32,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            prefs: Mutex::new(prefs),
            failing_saves: AtomicU32::new(0),
        }
    }

    /// 让接下来的 `n` 次 `save` 返回 IO 错误
    pub fn fail_next_saves(&self, n: u32) {
        self.failing_saves.store(n, Ordering::SeqCst);
    }

    /// 当前"已落盘"的内容
    pub fn stored(&self) -> Preferences {
        self.prefs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&self) -> Result<Preferences, SettingsError> {
        Ok(self.stored())
    }

    fn save(&self, prefs: &Preferences) -> Result<(), SettingsError> {
        let should_fail = self
            .failing_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(SettingsError::Io(io::Error::other("模拟写入失败")));
        }

        *self.prefs.lock().unwrap_or_else(PoisonError::into_inner) = prefs.clone();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
