use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use happyhour::core::config;
use happyhour::tui;

#[derive(Parser)]
#[command(name = "happyhour", about = "Pub-style trivia quiz in the terminal")]
struct Args {
    /// Questions per game (overrides the config file)
    #[arg(short = 'n', long)]
    questions: Option<usize>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to happyhour.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("happyhour.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {e}");
            config::HappyHourConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.questions);

    log::info!(
        "Happy Hour Trivia starting up: {} questions per game, provider at {}",
        resolved.total_questions,
        resolved.opentdb_base_url
    );

    tui::run(resolved)
}
