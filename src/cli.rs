//! 日記CLIモジュール

use crate::config::{CliArgs, Config};
use crate::database::Database;
use crate::formatter::render_entries;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// 利用可能なコマンドと説明
pub const COMMANDS: &[(&str, &str)] = &[
    ("add-entry", "日記エントリを追加"),
    ("list-entries", "すべてのエントリを一覧表示"),
    ("search-entries <KEYWORD>", "ログをキーワードで検索"),
    ("delete-entry <ID>", "IDを指定してエントリを削除"),
    ("show-commands", "利用可能なコマンドを表示"),
];

/// Diary - 個人用日記ロガー
#[derive(Parser, Debug)]
#[command(name = "diary")]
#[command(about = "個人用日記ロガー", long_about = None)]
pub struct Cli {
    /// データベースファイルパス
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// サブコマンド
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 日記エントリを追加
    AddEntry {
        /// ログ本文（省略時は入力を求める）
        #[arg(short, long)]
        log: Option<String>,

        /// タグ（カンマ区切り、省略時は入力を求める）
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// すべてのエントリを一覧表示
    ListEntries,
    /// ログをキーワードで検索
    SearchEntries {
        /// 検索キーワード（大文字小文字を区別しない）
        keyword: String,
    },
    /// IDを指定してエントリを削除
    DeleteEntry {
        /// エントリID
        id: i64,
    },
    /// 利用可能なコマンドを表示
    ShowCommands,
}

/// CLIエントリポイント
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cli_args = CliArgs {
        db: cli.db,
        cache_dir: None,
    };

    match cli.command {
        Commands::AddEntry { log, tags } => {
            let db = open_database(&cli_args)?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();

            let log = match log {
                Some(log) => log,
                None => prompt(&mut input, &mut output, "ログを入力してください", None)?,
            };
            if log.trim().is_empty() {
                bail!("ログが空です");
            }
            let tags = match tags {
                Some(tags) => tags,
                None => prompt(&mut input, &mut output, "タグを入力してください（カンマ区切り）", Some(""))?,
            };

            let entry = db.add(&log, &tags)?;
            info!("エントリを追加しました (id={})", entry.id);
            println!("エントリを追加しました（ID: {}）", entry.id);
        }
        Commands::ListEntries => {
            let db = open_database(&cli_args)?;
            let entries = db.list_all()?;
            if entries.is_empty() {
                println!("エントリはありません");
            } else {
                print!("{}", render_entries("日記エントリ", &entries));
            }
        }
        Commands::SearchEntries { keyword } => {
            let db = open_database(&cli_args)?;
            let entries = db.search(&keyword)?;
            if entries.is_empty() {
                println!("「{}」に一致するエントリはありません", keyword);
            } else {
                print!("{}", render_entries(&format!("検索結果: {}", keyword), &entries));
            }
        }
        Commands::DeleteEntry { id } => {
            let db = open_database(&cli_args)?;
            if db.delete(id)? {
                println!("ID {} のエントリを削除しました", id);
            } else {
                println!("ID {} のエントリは見つかりませんでした", id);
            }
        }
        Commands::ShowCommands => {
            print!("{}", render_commands());
        }
    }

    Ok(())
}

/// 設定を読み込みデータベースを開く
///
/// 開けない場合はエラーで終了する
fn open_database(cli_args: &CliArgs) -> Result<Database> {
    let config = Config::load(cli_args)?;
    Ok(Database::open(&config.db_path)?)
}

/// コマンド一覧を整形
pub fn render_commands() -> String {
    let width = COMMANDS.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = String::from("利用可能なコマンド:\n");
    for (name, description) in COMMANDS {
        out.push_str(&format!("  {:<width$}  {}\n", name, description, width = width));
    }
    out
}

/// 1行の入力を求める
///
/// 空入力かEOFの場合は `default` を返す（指定がなければ空文字列）
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: Option<&str>,
) -> io::Result<String> {
    match default {
        Some(d) if !d.is_empty() => write!(output, "{} [{}]: ", message, d)?,
        _ => write!(output, "{}: ", message)?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(line.to_string())
    }
}
