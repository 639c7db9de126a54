use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use clap::Parser;
use log::LevelFilter;

use crate::food::SaturationPolicy;
use crate::geometry::MapSize;
use crate::sim::Rules;

const MAX_MAP_SIDE: i64 = 1000;

/// Snake chasing food on a character grid, steered by a greedy heuristic.
#[derive(Debug, Parser)]
#[command(name = "greedy-snake", version, long_about = None)]
pub struct Args {
    /// Interior columns of the map.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..=MAX_MAP_SIDE))]
    pub width: u16,
    /// Interior rows of the map.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=MAX_MAP_SIDE))]
    pub height: u16,
    /// Segments in the first body.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub initial_length: u16,
    /// Segments in the body that replaces a lost one.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub respawn_length: u16,
    /// Growth granted by the first food.
    #[arg(long, default_value_t = 1)]
    pub saturation: u32,
    /// Growth granted by every food spawned after a meal.
    #[arg(long, default_value_t = 1)]
    pub refill_saturation: u32,
    /// Simulation steps per second.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub ticks_per_second: u32,
    /// Food placement seed. Defaults to the wall clock.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print frames one after another instead of redrawing a full screen.
    #[arg(long)]
    pub plain: bool,
    /// Stop after this many steps instead of running until killed.
    #[arg(long)]
    pub max_cycles: Option<u64>,
    /// Where log records go. The terminal is busy with the grid.
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,
    /// One of off, error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub map: MapSize,
    pub rules: Rules,
    pub tick_period: Duration,
    pub seed: u64,
    pub plain: bool,
    pub max_cycles: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Config> {
        let log_level = args.log_level.parse::<LevelFilter>()
            .map_err(|_| anyhow!("invalid log level `{}`", args.log_level))?;

        let seed = match args.seed {
            Some(seed) => seed,
            None => wall_clock_seed()?,
        };

        Ok(Config {
            map: MapSize::new(i32::from(args.width), i32::from(args.height)),
            rules: Rules {
                initial_length: usize::from(args.initial_length),
                respawn_length: usize::from(args.respawn_length),
                saturation: SaturationPolicy {
                    initial: args.saturation,
                    refill: args.refill_saturation,
                },
            },
            tick_period: Duration::from_secs(1) / args.ticks_per_second,
            seed,
            plain: args.plain,
            max_cycles: args.max_cycles,
            log_file: args.log_file,
            log_level,
        })
    }
}

fn wall_clock_seed() -> Result<u64> {
    let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(since_epoch.as_millis() as u64)
}
