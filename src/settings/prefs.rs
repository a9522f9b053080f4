use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 偏好存储中的标量值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
}

impl From<bool> for PrefValue {
    fn from(v: bool) -> Self {
        PrefValue::Bool(v)
    }
}

impl From<i64> for PrefValue {
    fn from(v: i64) -> Self {
        PrefValue::Int(v)
    }
}

/// 一个命名空间下的全部偏好（键 → 标量值）
///
/// 用 `BTreeMap` 保证落盘时键的顺序稳定。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(BTreeMap<String, PrefValue>);

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<PrefValue> {
        self.0.get(key).copied()
    }

    /// 类型不匹配时视为缺失
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            PrefValue::Bool(v) => Some(v),
            PrefValue::Int(_) => None,
        }
    }

    /// 类型不匹配时视为缺失
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            PrefValue::Int(v) => Some(v),
            PrefValue::Bool(_) => None,
        }
    }

    /// 写入（覆盖）一个值，返回值是否发生了变化
    pub fn set(&mut self, key: &str, value: PrefValue) -> bool {
        self.0.insert(key.to_owned(), value) != Some(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 宽松解析：顶层必须是 JSON 对象，非 bool/整数的条目直接丢弃
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;
        let mut prefs = Self::new();
        for (key, value) in raw {
            let value = match value {
                serde_json::Value::Bool(b) => PrefValue::Bool(b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => PrefValue::Int(i),
                    None => {
                        tracing::debug!(key = %key, "忽略非整数的数值偏好");
                        continue;
                    }
                },
                other => {
                    tracing::debug!(key = %key, value = %other, "忽略不支持的偏好类型");
                    continue;
                }
            };
            prefs.0.insert(key, value);
        }
        Ok(prefs)
    }
}

impl FromIterator<(String, PrefValue)> for Preferences {
    fn from_iter<T: IntoIterator<Item = (String, PrefValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters_ignore_mismatch() {
        let mut prefs = Preferences::new();
        prefs.set("mode_dark", PrefValue::Int(1));
        prefs.set("volumen_level", PrefValue::Bool(true));

        assert_eq!(prefs.get_bool("mode_dark"), None);
        assert_eq!(prefs.get_int("volumen_level"), None);
        assert_eq!(prefs.get_int("missing"), None);
    }

    #[test]
    fn test_set_reports_change() {
        let mut prefs = Preferences::new();
        assert!(prefs.set("bluetooth", false.into()));
        assert!(!prefs.set("bluetooth", false.into()));
        assert!(prefs.set("bluetooth", true.into()));
        assert_eq!(prefs.len(), 1);
    }

    #[test]
    fn test_from_json_drops_unsupported_entries() {
        let json = br#"{"mode_dark": true, "volumen_level": 80, "name": "x", "ratio": 0.5, "nested": {}}"#;
        let prefs = Preferences::from_json(json).expect("from_json");

        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs.get_bool("mode_dark"), Some(true));
        assert_eq!(prefs.get_int("volumen_level"), Some(80));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Preferences::from_json(b"[1, 2]").is_err());
        assert!(Preferences::from_json(b"{not-json").is_err());
    }

    #[test]
    fn test_serialize_is_flat_object() {
        let prefs: Preferences = [
            ("vibration".to_owned(), PrefValue::Bool(true)),
            ("volumen_level".to_owned(), PrefValue::Int(0)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&prefs).expect("to_string");
        assert_eq!(json, r#"{"vibration":true,"volumen_level":0}"#);
    }
}
