//! タイムトラッカーCLIモジュール

use crate::clockify::{ClockifyClient, Credentials};
use crate::config::{CliArgs, Config};
use crate::error::ClockifyError;
use crate::log_cache::LogCache;
use crate::time_report::{format_duration, format_entry_line, time_by_project};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// Clockify - タイムトラッキングAPIのCLIラッパー
#[derive(Parser, Debug)]
#[command(name = "clockify")]
#[command(about = "ClockifyのCLIラッパー", long_about = None)]
pub struct Cli {
    /// ログキャッシュの保存ディレクトリ
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// サブコマンド
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 今日の時間エントリを表示
    Logs,
    /// 今日の時間エントリを日別フォルダにキャッシュ
    LogsStorage,
    /// プロジェクト別の作業時間を表示
    TimeSpent,
}

/// CLIエントリポイント
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&CliArgs {
        db: None,
        cache_dir: cli.cache_dir,
    })?;

    let client = ClockifyClient::new(&config.api_base_url, Credentials::from_env()?)?;
    let today = Utc::now().date_naive();

    let result = match cli.command {
        Commands::Logs => show_logs(&client, today),
        Commands::LogsStorage => store_logs(&client, &LogCache::new(config.log_cache_dir), today),
        Commands::TimeSpent => show_time_spent(&client, today),
    };

    // HTTPエラーはその場で表示して終了（リトライしない）
    match result {
        Err(e) => match http_error_message(&e) {
            Some(message) => {
                warn!("Clockify APIの呼び出しに失敗しました: {}", e);
                println!("{}", message);
                Ok(())
            }
            None => Err(e),
        },
        Ok(()) => Ok(()),
    }
}

/// HTTPエラーなら利用者向けのメッセージを返す
fn http_error_message(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<ClockifyError>()
        .and_then(ClockifyError::http_error)
        .map(|e| format!("HTTPエラーが発生しました: {}", e))
}

/// 今日の時間エントリを表示
fn show_logs(client: &ClockifyClient, day: NaiveDate) -> Result<()> {
    let user_id = client.current_user_id()?;
    let entries = client.time_entries(&user_id, day)?;

    println!("今日の時間エントリ:");
    for entry in &entries {
        println!("{}", format_entry_line(entry));
    }

    Ok(())
}

/// 今日の時間エントリをキャッシュ
fn store_logs(client: &ClockifyClient, cache: &LogCache, day: NaiveDate) -> Result<()> {
    let user_id = client.current_user_id()?;
    let logs = client.time_entries_json(&user_id, day)?;
    let count = logs.as_array().map(Vec::len).unwrap_or(0);

    let path = cache.store(day, &logs)?;
    info!("{}件のエントリを保存しました", count);
    println!("{}件のエントリを保存しました: {}", count, path.display());

    Ok(())
}

/// プロジェクト別の作業時間を表示
fn show_time_spent(client: &ClockifyClient, day: NaiveDate) -> Result<()> {
    let user_id = client.current_user_id()?;
    let entries = client.time_entries(&user_id, day)?;
    let summaries = time_by_project(&entries, Utc::now());

    if summaries.is_empty() {
        println!("{}の時間エントリはありません", day);
        return Ok(());
    }

    println!("=== {} のプロジェクト別作業時間 ===", day);
    for summary in &summaries {
        println!(
            "{}: {} ({} エントリ)",
            summary.project,
            format_duration(summary.duration_seconds),
            summary.entry_count
        );
    }

    Ok(())
}
