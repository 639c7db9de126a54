use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error, info, trace};

use crate::config::Config;
use crate::render::render_frame;
use crate::sim::{Simulation, StepReport, Viability};
use crate::term::{TermManager, TermMode};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Quit,
    TogglePause,
}

pub struct SnakeGame {
    config: Config,
    term: TermManager,
    sim: Simulation,
    paused: bool,
}

impl SnakeGame {
    pub fn new(config: Config) -> Self {
        let mode = if config.plain { TermMode::Plain } else { TermMode::Fullscreen };
        let sim = Simulation::new(config.map, config.rules, config.seed);

        SnakeGame { config, term: TermManager::new(mode), sim, paused: false }
    }

    /// Runs until quit or the cycle limit; the terminal is restored either way.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "starting: map {}x{}, seed {}, tick {:?}, {:?} mode",
            self.config.map.width, self.config.map.height, self.config.seed,
            self.config.tick_period, self.term.mode()
        );

        self.term.setup().context("setting up terminal")?;
        let res = self.play();
        let restored = self.term.restore().context("restoring terminal");

        let stats = self.sim.stats();
        info!(
            "stopped after {} cycles: score {}, max score {}, loses {}, total score {}",
            self.sim.cycle(), self.sim.score(), stats.max_score, stats.loses, stats.total_score
        );

        prefer_play_error(res, restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> Result<()> {
        self.draw()?;
        let mut next_tick = Instant::now();

        loop {
            let now = Instant::now();
            if next_tick < now {
                next_tick = now;
            }
            next_tick += self.config.tick_period;

            // Handle keys until the tick is due
            loop {
                let now = Instant::now();
                if now >= next_tick {
                    break;
                }

                let events = self.term.read_key_events(next_tick - now).context("reading keys")?;
                for key_ev in events {
                    match key_action(&key_ev) {
                        Some(KeyAction::Quit) => {
                            info!("quit requested");
                            return Ok(());
                        }
                        Some(KeyAction::TogglePause) => self.toggle_pause()?,
                        None => {}
                    }
                }
            }

            if self.paused { continue; }

            let report = self.sim.step();
            self.log_step(&report);
            self.draw()?;

            if let Some(limit) = self.config.max_cycles {
                if self.sim.cycle() >= limit {
                    return Ok(());
                }
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let frame = render_frame(&self.sim);
        self.term.draw_frame(&frame).context("drawing frame")
    }

    fn toggle_pause(&mut self) -> Result<()> {
        self.paused = !self.paused;
        debug!("paused: {}", self.paused);

        if self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.draw()?;
        }

        Ok(())
    }

    fn log_step(&self, report: &StepReport) {
        let head = self.sim.snake().head().position;
        trace!("cycle {}: head ({}, {}), length {}", self.sim.cycle(), head.x, head.y, self.sim.score());

        match report.collision {
            Some((kind, Viability::Respawned)) => {
                info!("cycle {}: {:?} collision on a lone head, respawned (loses: {})",
                      self.sim.cycle(), kind, self.sim.stats().loses);
            }
            Some((kind, Viability::Shrunk)) => {
                debug!("cycle {}: {:?} collision, length now {}", self.sim.cycle(), kind, self.sim.score());
            }
            None => {}
        }

        if let Some(saturation) = report.eaten {
            let food = self.sim.food();
            debug!(
                "cycle {}: ate food worth {}, length {}, next food at ({}, {})",
                self.sim.cycle(), saturation, self.sim.score(), food.position.x, food.position.y
            );
        }
    }
}

/// The play error wins; a restore failure behind it only gets logged.
fn prefer_play_error(play: Result<()>, restored: Result<()>) -> Result<()> {
    match (play, restored) {
        (Err(err), Err(restore_err)) => {
            error!("{:#}", restore_err);
            Err(err)
        }
        (play, restored) => play.and(restored),
    }
}

fn key_action(ev: &KeyEvent) -> Option<KeyAction> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL } => Some(KeyAction::Quit),
        KeyEvent { code: KeyCode::Char('q'), .. } => Some(KeyAction::Quit),
        KeyEvent { code: KeyCode::Esc, .. } => Some(KeyAction::TogglePause),
        _ => None,
    }
}
