//! Clockify - タイムトラッキングAPIのCLIラッパー

use anyhow::Result;
use diary_tools::{logging, tracker_cli};

fn main() -> Result<()> {
    // .envがなくても環境変数だけで動作する
    dotenvy::dotenv().ok();
    logging::init();
    tracker_cli::run()
}
