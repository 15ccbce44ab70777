//! Clockify APIクライアントモジュール

use crate::error::ClockifyError;
use chrono::{DateTime, Days, NaiveDate, Utc};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// APIキーの環境変数名
pub const API_KEY_VAR: &str = "API_KEY";
/// ワークスペースIDの環境変数名
pub const WORKSPACE_ID_VAR: &str = "WORKSPACE_ID";

/// タイムスタンプのクエリ形式
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// 認証情報（環境変数の値をそのまま渡す）
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub workspace_id: String,
}

impl Credentials {
    /// 環境変数から読み込む
    pub fn from_env() -> Result<Self, ClockifyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から読み込む
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClockifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ClockifyError::MissingEnv(name.to_string()))
        };

        Ok(Self {
            api_key: get(API_KEY_VAR)?,
            workspace_id: get(WORKSPACE_ID_VAR)?,
        })
    }
}

/// 時間エントリの計測区間
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    /// 計測中はnull
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// 時間エントリ
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    pub time_interval: TimeInterval,
}

impl TimeEntry {
    /// 計測時間（秒）。計測中のエントリは `now` までで数える
    pub fn duration_seconds(&self, now: DateTime<Utc>) -> i64 {
        let end = self.time_interval.end.unwrap_or(now);
        (end - self.time_interval.start).num_seconds().max(0)
    }
}

/// Clockify APIクライアント
pub struct ClockifyClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl ClockifyClient {
    /// 新しいClockifyClientを作成
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ClockifyError> {
        let http = Client::builder()
            .user_agent(concat!("diary-tools/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// ワークスペースID
    pub fn workspace_id(&self) -> &str {
        &self.credentials.workspace_id
    }

    /// エンドポイントの完全なURLを組み立てる
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// APIリクエストを送信しJSONを返す
    ///
    /// 4xx/5xxはエラーとして返す（リトライしない）
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClockifyError> {
        let url = self.url(endpoint);
        debug!(%method, %url, "Clockifyリクエスト");

        let mut request = self
            .http
            .request(method, &url)
            .header("X-Api-Key", &self.credentials.api_key)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?.error_for_status()?;
        // 2xxでもJSONでない本文は通信エラーではなく解析エラー
        response
            .json()
            .map_err(|e| ClockifyError::InvalidResponse(e.to_string()))
    }

    /// 認証ユーザーのIDを取得
    pub fn current_user_id(&self) -> Result<String, ClockifyError> {
        let user = self.request(Method::GET, "/user", None)?;
        extract_user_id(&user)
    }

    /// 指定日（UTC）の時間エントリを生のJSONで取得
    pub fn time_entries_json(&self, user_id: &str, day: NaiveDate) -> Result<Value, ClockifyError> {
        let endpoint = time_entries_endpoint(self.workspace_id(), user_id, day);
        self.request(Method::GET, &endpoint, None)
    }

    /// 指定日（UTC）の時間エントリを取得
    pub fn time_entries(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Vec<TimeEntry>, ClockifyError> {
        parse_time_entries(self.time_entries_json(user_id, day)?)
    }
}

/// `/user` レスポンスからIDを取り出す
fn extract_user_id(user: &Value) -> Result<String, ClockifyError> {
    user.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClockifyError::InvalidResponse("user id missing".to_string()))
}

/// 時間エントリ取得エンドポイント（対象日の0時から翌日0時まで）
pub fn time_entries_endpoint(workspace_id: &str, user_id: &str, day: NaiveDate) -> String {
    let start = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    let end = day
        .checked_add_days(Days::new(1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(start);

    format!(
        "/workspaces/{}/user/{}/time-entries?start={}&end={}",
        workspace_id,
        user_id,
        start.format(QUERY_TIME_FORMAT),
        end.format(QUERY_TIME_FORMAT)
    )
}

/// JSON配列を時間エントリに変換
pub fn parse_time_entries(json: Value) -> Result<Vec<TimeEntry>, ClockifyError> {
    serde_json::from_value(json).map_err(|e| ClockifyError::InvalidResponse(e.to_string()))
}
