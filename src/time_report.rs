//! プロジェクト別作業時間レポートモジュール

use crate::clockify::TimeEntry;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// プロジェクト未設定エントリの表示名
pub const NO_PROJECT_LABEL: &str = "(プロジェクトなし)";

/// プロジェクト別サマリー
#[derive(Debug, PartialEq, Eq)]
pub struct ProjectSummary {
    pub project: String,
    pub duration_seconds: i64,
    pub entry_count: u64,
}

/// プロジェクト別に作業時間を集計
///
/// 時間の降順、同じ時間ならプロジェクト名順
pub fn time_by_project(entries: &[TimeEntry], now: DateTime<Utc>) -> Vec<ProjectSummary> {
    let mut totals: HashMap<String, (i64, u64)> = HashMap::new();
    for entry in entries {
        let project = entry
            .project_id
            .clone()
            .unwrap_or_else(|| NO_PROJECT_LABEL.to_string());
        let total = totals.entry(project).or_insert((0, 0));
        total.0 += entry.duration_seconds(now);
        total.1 += 1;
    }

    let mut summaries: Vec<ProjectSummary> = totals
        .into_iter()
        .map(|(project, (duration_seconds, entry_count))| ProjectSummary {
            project,
            duration_seconds,
            entry_count,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.duration_seconds
            .cmp(&a.duration_seconds)
            .then_with(|| a.project.cmp(&b.project))
    });

    summaries
}

/// 時間エントリを1行に整形
pub fn format_entry_line(entry: &TimeEntry) -> String {
    let project = entry.project_id.as_deref().unwrap_or(NO_PROJECT_LABEL);
    let end = entry
        .time_interval
        .end
        .map(|e| e.to_rfc3339())
        .unwrap_or_else(|| "進行中".to_string());

    format!(
        "プロジェクト {}: {} - {}",
        project,
        entry.time_interval.start.to_rfc3339(),
        end
    )
}

/// 秒を「○時間○分」形式にフォーマット
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{}時間{}分", hours, minutes)
    } else {
        format!("{}分", minutes)
    }
}
