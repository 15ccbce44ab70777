//! Diary - 個人用日記ロガー

use anyhow::Result;
use diary_tools::{cli, logging};

fn main() -> Result<()> {
    logging::init();
    cli::run()
}
