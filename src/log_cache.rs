//! 日別ログキャッシュモジュール

use crate::error::CacheError;
use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// 日別ログキャッシュ
pub struct LogCache {
    cache_dir: PathBuf,
}

impl LogCache {
    /// 新しいLogCacheを作成
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// 日付からファイルパスを生成
    ///
    /// 形式: YYYY-MM-DD.json
    pub fn get_path(&self, date: NaiveDate) -> PathBuf {
        self.cache_dir
            .join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    /// その日のログを保存（既存ファイルは上書き）
    pub fn store(&self, date: NaiveDate, logs: &Value) -> Result<PathBuf, CacheError> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir).map_err(CacheError::DirectoryCreationFailed)?;
        }

        let path = self.get_path(date);
        fs::write(&path, serde_json::to_string_pretty(logs)?)?;
        info!("ログをキャッシュしました: {}", path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn read_json(path: &std::path::Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
    }

    #[test]
    fn test_get_path() {
        let cache = LogCache::new(PathBuf::from("/tmp/logs"));
        assert_eq!(cache.get_path(day()), PathBuf::from("/tmp/logs/2024-12-30.json"));
    }

    #[test]
    fn test_store_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LogCache::new(temp_dir.path().join("nested").join("logs"));

        let path = cache.store(day(), &json!([{"id": "e1"}])).unwrap();
        assert!(path.exists());
        assert_eq!(read_json(&path), json!([{"id": "e1"}]));
    }

    #[test]
    fn test_store_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LogCache::new(temp_dir.path().to_path_buf());

        cache.store(day(), &json!([1])).unwrap();
        let path = cache.store(day(), &json!([2, 3])).unwrap();
        assert_eq!(read_json(&path), json!([2, 3]));
    }
}
