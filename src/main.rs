use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::WriteLogger;

use greedy_snake::config::{Args, Config};
use greedy_snake::game::SnakeGame;

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;
    init_logging(&config)?;

    let mut game = SnakeGame::new(config);
    // Runs until killed, quit from the keyboard, or --max-cycles
    game.run()
}

fn init_logging(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;

    WriteLogger::init(config.log_level, simplelog::Config::default(), file)
        .context("initializing logger")
}
