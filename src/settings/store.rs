use super::backend::PreferenceBackend;
use super::model::SettingsModel;
use super::prefs::{PrefValue, Preferences};
use crate::error::SettingsError;
use futures_util::stream::{self, Stream};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::{mpsc, oneshot, watch};

const WRITE_QUEUE_CAPACITY: usize = 64;

/// 写入失败时的重试策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePolicy {
    /// 重试次数（0 表示失败即返回）
    pub retries: u32,
    /// 重试退避初始时间（毫秒）
    pub backoff_ms: u64,
    /// 重试退避最大时间（毫秒）
    pub backoff_max_ms: u64,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            retries: 0,
            backoff_ms: 250,
            backoff_max_ms: 2_000,
        }
    }
}

struct WriteRequest {
    key: String,
    value: PrefValue,
    reply: oneshot::Sender<Result<(), SettingsError>>,
}

/// 已入队的写入；`wait` 得到最终结果
#[derive(Debug)]
pub struct PendingWrite {
    rx: oneshot::Receiver<Result<(), SettingsError>>,
}

impl PendingWrite {
    pub async fn wait(self) -> Result<(), SettingsError> {
        self.rx.await.map_err(|_| SettingsError::WriterClosed)?
    }
}

/// 偏好存储句柄
///
/// 可随意 clone；所有 clone 共享同一个写入任务。写入按提交顺序串行执行，
/// 落盘成功后才更新内存视图并通知 `read_all` 的订阅者。
/// 最后一个句柄释放后写入任务退出，订阅流随之结束。
#[derive(Clone)]
pub struct SettingsStore {
    tx_write: mpsc::Sender<WriteRequest>,
    changes: watch::Receiver<Preferences>,
}

impl SettingsStore {
    /// 加载一次后端并启动写入任务（需在 tokio runtime 内调用）
    ///
    /// 读取失败不会报错：记录警告后按空偏好（全部默认值）启动。
    pub async fn open(backend: Arc<dyn PreferenceBackend>, policy: WritePolicy) -> Self {
        let location = backend.location();
        let loader = Arc::clone(&backend);
        let prefs = match tokio::task::spawn_blocking(move || loader.load()).await {
            Ok(Ok(prefs)) => prefs,
            Ok(Err(e)) => {
                tracing::warn!(location = %location, err = %e, "读取偏好失败，使用默认值");
                Preferences::new()
            }
            Err(e) => {
                tracing::warn!(location = %location, err = %e, "读取偏好任务异常，使用默认值");
                Preferences::new()
            }
        };
        tracing::info!(location = %location, keys = prefs.len(), "偏好已加载");

        let (tx_changes, rx_changes) = watch::channel(prefs.clone());
        let (tx_write, rx_write) = mpsc::channel(WRITE_QUEUE_CAPACITY);
        tokio::spawn(run_writer(backend, prefs, tx_changes, rx_write, policy));

        Self {
            tx_write,
            changes: rx_changes,
        }
    }

    /// 一次性读取当前设置
    pub fn snapshot(&self) -> SettingsModel {
        SettingsModel::from_preferences(&self.changes.borrow())
    }

    /// 设置变化流
    ///
    /// 第一项总是当前值，之后读出的设置每次发生变化都会产出新记录；
    /// 消费者来不及读取时，连续的变更会合并为最新状态。
    /// 每次调用都是一个独立的新订阅。
    pub fn read_all(&self) -> impl Stream<Item = SettingsModel> + Send + 'static {
        let mut rx = self.changes.clone();
        rx.mark_changed();
        stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let model = SettingsModel::from_preferences(&rx.borrow_and_update());
            Some((model, rx))
        })
    }

    /// 提交一次写入但不等待结果；提交顺序即执行顺序
    pub async fn enqueue(
        &self,
        key: &str,
        value: PrefValue,
    ) -> Result<PendingWrite, SettingsError> {
        let (reply, rx) = oneshot::channel();
        self.tx_write
            .send(WriteRequest {
                key: key.to_owned(),
                value,
                reply,
            })
            .await
            .map_err(|_| SettingsError::WriterClosed)?;
        Ok(PendingWrite { rx })
    }

    pub async fn write(&self, key: &str, value: PrefValue) -> Result<(), SettingsError> {
        self.enqueue(key, value).await?.wait().await
    }

    pub async fn write_bool(&self, key: &str, value: bool) -> Result<(), SettingsError> {
        self.write(key, PrefValue::Bool(value)).await
    }

    pub async fn write_int(&self, key: &str, value: i64) -> Result<(), SettingsError> {
        self.write(key, PrefValue::Int(value)).await
    }
}

async fn run_writer(
    backend: Arc<dyn PreferenceBackend>,
    mut prefs: Preferences,
    tx_changes: watch::Sender<Preferences>,
    mut rx_write: mpsc::Receiver<WriteRequest>,
    policy: WritePolicy,
) {
    while let Some(req) = rx_write.recv().await {
        let result = apply_write(&backend, &mut prefs, &req.key, req.value, &policy).await;
        match &result {
            Ok(true) => {
                tracing::debug!(key = %req.key, value = ?req.value, "偏好已写入");
                // 缺失的键写入默认值时落盘内容变了，但读出的设置不变：不通知订阅者
                let notified = tx_changes.send_if_modified(|current| {
                    let before = SettingsModel::from_preferences(current);
                    *current = prefs.clone();
                    SettingsModel::from_preferences(current) != before
                });
                if !notified {
                    tracing::debug!(key = %req.key, "设置视图未变化，不通知订阅者");
                }
            }
            Ok(false) => {
                tracing::debug!(key = %req.key, "值未变化，跳过写入");
            }
            Err(e) => {
                tracing::warn!(key = %req.key, err = %e, "偏好写入失败");
            }
        }
        // 调用方可能已不关心结果
        let _ = req.reply.send(result.map(|_| ()));
    }
    tracing::debug!("偏好写入任务退出");
}

/// 返回是否真的发生了写入
async fn apply_write(
    backend: &Arc<dyn PreferenceBackend>,
    prefs: &mut Preferences,
    key: &str,
    value: PrefValue,
    policy: &WritePolicy,
) -> Result<bool, SettingsError> {
    if prefs.get(key) == Some(value) {
        return Ok(false);
    }

    let mut next = prefs.clone();
    next.set(key, value);
    persist_with_retry(backend, &next, policy).await?;
    *prefs = next;
    Ok(true)
}

async fn persist_with_retry(
    backend: &Arc<dyn PreferenceBackend>,
    prefs: &Preferences,
    policy: &WritePolicy,
) -> Result<(), SettingsError> {
    let mut attempt = 0;
    loop {
        let saver = Arc::clone(backend);
        let snapshot = prefs.clone();
        let result = match tokio::task::spawn_blocking(move || saver.save(&snapshot)).await {
            Ok(r) => r,
            Err(e) => Err(SettingsError::Worker(e.to_string())),
        };

        match result {
            Ok(()) => return Ok(()),
            Err(e) if attempt < policy.retries && e.is_retryable() => {
                tracing::warn!(attempt, err = %e, "偏好写入失败，准备重试");
                sleep_backoff(attempt, policy.backoff_ms, policy.backoff_max_ms).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

async fn sleep_backoff(attempt: u32, base_ms: u64, max_ms: u64) {
    let exp = base_ms.saturating_mul(2u64.saturating_pow(attempt.min(6)));
    let mut ms = exp.min(max_ms);

    // 少量抖动（0..=50ms），不额外引入 RNG 依赖
    let jitter = now_ms() % 51;
    ms = ms.saturating_add(jitter).min(max_ms);

    tokio::time::sleep(Duration::from_millis(ms)).await;
}
