//! 表示整形モジュール

use crate::database::Entry;
use unicode_width::UnicodeWidthStr;

/// 一覧表示で前後に残す単語数
pub const DEFAULT_WORD_LIMIT: usize = 5;

/// 省略時の区切り
const ELLIPSIS: &str = " ... ";

/// 長いログを先頭と末尾の数語だけに短縮
///
/// 単語数が `2 * word_limit` 以下ならそのまま返す。
/// `word_limit` が0の場合、末尾側は全単語を残す
pub fn truncate(text: &str, word_limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= 2 * word_limit {
        return words.join(" ");
    }

    let first = words[..word_limit].join(" ");
    let tail_start = if word_limit == 0 {
        0
    } else {
        words.len() - word_limit
    };
    let last = words[tail_start..].join(" ");
    format!("{}{}{}", first, ELLIPSIS, last)
}

/// エントリ一覧をテーブル形式の文字列にする
pub fn render_entries(title: &str, entries: &[Entry]) -> String {
    let rows: Vec<[String; 4]> = entries
        .iter()
        .map(|entry| {
            [
                entry.id.to_string(),
                truncate(&entry.log, DEFAULT_WORD_LIMIT),
                entry.date.to_string(),
                entry.tags.clone(),
            ]
        })
        .collect();

    let header = ["ID", "ログ", "日付", "タグ"].map(String::from);
    let mut widths = header.clone().map(|h| display_width(&h));
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut out = format!("=== {} ===\n", title);
    out.push_str(&render_row(&header, &widths));
    out.push_str(&render_separator(&widths));
    for row in &rows {
        out.push_str(&render_row(row, &widths));
    }
    out
}

fn render_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, width))| {
            let pad = " ".repeat(width - display_width(cell));
            // ID列のみ右寄せ
            if i == 0 {
                format!("{}{}", pad, cell)
            } else {
                format!("{}{}", cell, pad)
            }
        })
        .collect();

    format!("{}\n", padded.join(" | ").trim_end())
}

fn render_separator(widths: &[usize; 4]) -> String {
    let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("{}\n", parts.join("-+-"))
}

/// 端末上の表示幅（全角文字は2桁、結合文字は0桁）
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}
