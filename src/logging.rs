//! ログインフラモジュール

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG未設定時のログレベル
const DEFAULT_LEVEL: &str = "info";

/// ログシステムを初期化
///
/// RUST_LOG環境変数でログレベルを設定可能:
/// - warn: 警告以上
/// - info: 情報以上（デフォルト）
/// - debug: 実行したSQLも出力
pub fn init() {
    tracing_subscriber::registry()
        .with(build_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// フィルタを構築（不正な指定はデフォルトにフォールバック）
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}
