//! 設定モジュール

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// ClockifyのデフォルトAPIエンドポイント
pub const DEFAULT_API_BASE_URL: &str = "https://api.clockify.me/api/v1";

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct Config {
    /// 日記データベースファイルパス
    pub db_path: PathBuf,
    /// 日別ログキャッシュの保存ディレクトリ
    pub log_cache_dir: PathBuf,
    /// Clockify APIのベースURL
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = base_dir();

        Self {
            db_path: base_dir.join("diary.db"),
            log_cache_dir: base_dir.join("logs"),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// TOML設定ファイル用構造体
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    db_path: Option<String>,
    log_cache_dir: Option<String>,
    api_base_url: Option<String>,
}

/// CLI引数
#[derive(Debug, Default)]
pub struct CliArgs {
    pub db: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
}

/// 設定ディレクトリ（~/.diary-tools）
fn base_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".diary-tools")
}

impl Config {
    /// 設定を読み込む
    ///
    /// 優先順位: CLI引数 > 設定ファイル > デフォルト値
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_file_path(), cli_args)
    }

    /// 指定した設定ファイルから読み込む
    pub fn load_from(config_path: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let file_config: FileConfig = toml::from_str(&content)?;
            config.merge_file_config(&file_config);
        }

        config.merge_cli_args(cli_args);
        config.validate()?;
        config.ensure_directories()?;

        Ok(config)
    }

    /// 設定ファイルのパスを取得
    pub fn config_file_path() -> PathBuf {
        base_dir().join("config.toml")
    }

    /// ファイル設定をマージ
    fn merge_file_config(&mut self, file_config: &FileConfig) {
        if let Some(ref path) = file_config.db_path {
            self.db_path = PathBuf::from(path);
        }
        if let Some(ref path) = file_config.log_cache_dir {
            self.log_cache_dir = PathBuf::from(path);
        }
        if let Some(ref url) = file_config.api_base_url {
            self.api_base_url = url.clone();
        }
    }

    /// CLI引数をマージ
    fn merge_cli_args(&mut self, cli_args: &CliArgs) {
        if let Some(ref path) = cli_args.db {
            self.db_path = path.clone();
        }
        if let Some(ref path) = cli_args.cache_dir {
            self.log_cache_dir = path.clone();
        }
    }

    /// 設定値をバリデート
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "api_base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// 必要なディレクトリを作成
    ///
    /// キャッシュディレクトリは書き込み時に作成する
    fn ensure_directories(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(ConfigError::DirectoryCreationError)?;
            }
        }

        Ok(())
    }
}
