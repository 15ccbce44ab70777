//! エラー型定義モジュール

use std::io;
use thiserror::Error;

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("ディレクトリ作成エラー: {0}")]
    DirectoryCreationError(io::Error),

    #[error("無効な設定値: {0}")]
    InvalidValue(String),
}

/// データベースエラー（ストレージ利用不可）
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLiteエラー: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("不正な日付: {0}")]
    InvalidDate(String),
}

/// Clockify APIエラー
#[derive(Error, Debug)]
pub enum ClockifyError {
    #[error("環境変数が設定されていません: {0}")]
    MissingEnv(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("レスポンス解析エラー: {0}")]
    InvalidResponse(String),
}

impl ClockifyError {
    /// HTTP通信・ステータス起因のエラーならその中身を返す
    pub fn http_error(&self) -> Option<&reqwest::Error> {
        match self {
            ClockifyError::Http(e) => Some(e),
            _ => None,
        }
    }
}

/// ログキャッシュエラー
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("ディレクトリ作成失敗: {0}")]
    DirectoryCreationFailed(io::Error),

    #[error("書き込み失敗: {0}")]
    WriteFailed(#[from] io::Error),

    #[error("JSONシリアライズ失敗: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}
