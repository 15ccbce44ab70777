//! データベースモジュール（日記エントリストア）

use crate::error::DatabaseError;
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tracing::debug;

/// 日付の保存形式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 日記エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub log: String,
    pub date: NaiveDate,
    /// カンマ区切り（慣例のみ、解析しない）
    pub tags: String,
}

/// 日記データベース
///
/// コマンド実行ごとに開き、スコープを抜けると閉じる
pub struct Database {
    conn: Connection,
}

impl Database {
    /// データベースを開く（必要に応じて作成）
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        debug!("データベースを開きます: {}", path.display());
        let conn = Connection::open(path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// インメモリデータベースを開く
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let db = Database {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;

        Ok(db)
    }

    /// スキーマを初期化
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        let sql = r#"
            CREATE TABLE IF NOT EXISTS diary (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                log TEXT NOT NULL,
                date TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT ''
            );
            "#;
        debug!(sql, "スキーマ初期化");
        self.conn.execute_batch(sql)?;

        Ok(())
    }

    /// 今日の日付でエントリを追加
    pub fn add(&self, log: &str, tags: &str) -> Result<Entry, DatabaseError> {
        self.insert_entry(log, Local::now().date_naive(), tags)
    }

    /// 日付を指定してエントリを追加
    pub fn insert_entry(
        &self,
        log: &str,
        date: NaiveDate,
        tags: &str,
    ) -> Result<Entry, DatabaseError> {
        let sql = "INSERT INTO diary (log, date, tags) VALUES (?1, ?2, ?3)";
        debug!(sql, "エントリ挿入");
        self.conn.execute(
            sql,
            params![log, date.format(DATE_FORMAT).to_string(), tags],
        )?;

        Ok(Entry {
            id: self.conn.last_insert_rowid(),
            log: log.to_string(),
            date,
            tags: tags.to_string(),
        })
    }

    /// 全エントリを挿入順で取得
    pub fn list_all(&self) -> Result<Vec<Entry>, DatabaseError> {
        let sql = "SELECT id, log, date, tags FROM diary ORDER BY id ASC";
        debug!(sql, "エントリ一覧");
        let mut stmt = self.conn.prepare(sql)?;

        let rows = stmt.query_map([], read_row)?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, log, date, tags) = row?;
            entries.push(Entry {
                id,
                log,
                date: parse_date(&date)?,
                tags,
            });
        }

        Ok(entries)
    }

    /// ログ本文にキーワードを含むエントリを検索（大文字小文字を区別しない）
    ///
    /// SQLiteのLIKEはASCIIしか畳み込まないため、照合はRust側で行う
    pub fn search(&self, keyword: &str) -> Result<Vec<Entry>, DatabaseError> {
        let needle = keyword.to_lowercase();

        let entries = self
            .list_all()?
            .into_iter()
            .filter(|entry| entry.log.to_lowercase().contains(&needle))
            .collect();

        Ok(entries)
    }

    /// IDを指定してエントリを削除
    ///
    /// 削除が発生したかどうかを返す（存在しないIDはエラーにしない）
    pub fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let sql = "DELETE FROM diary WHERE id = ?1";
        debug!(sql, id, "エントリ削除");
        let affected = self.conn.execute(sql, params![id])?;

        Ok(affected > 0)
    }
}

type RawEntry = (i64, String, String, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn parse_date(value: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| DatabaseError::InvalidDate(value.to_string()))
}
