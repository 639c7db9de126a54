use std::fmt;

use crate::geometry::{MapSize, Point};
use crate::sim::Simulation;

pub const MAP_BOUND_CHAR: char = '#';
pub const MAP_FILL_CHAR: char = ' ';
pub const SNAKE_BODY_CHAR: char = '@';
pub const FOOD_CHAR: char = '*';

/// Character grid for one map: `height + 2` rows of `width + 2` cells, each
/// row terminated by a newline.
pub struct Grid {
    map: MapSize,
    cells: Vec<char>,
}

impl Grid {
    pub fn new(map: MapSize) -> Self {
        let (w, h) = (map.width as usize, map.height as usize);
        let mut cells = vec![MAP_FILL_CHAR; (w + 3) * (h + 2)];

        for line in 0..h + 2 {
            for column in 0..w + 3 {
                let idx = line * (w + 3) + column;
                if column == w + 2 {
                    cells[idx] = '\n';
                } else if line == 0 || column == 0 || line == h + 1 || column == w + 1 {
                    cells[idx] = MAP_BOUND_CHAR;
                }
            }
        }

        Grid { map, cells }
    }

    /// Writes `ch` at an interior cell; anything else is silently skipped.
    pub fn put(&mut self, x: i32, y: i32, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = ch;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        let stride = self.map.width + 3;
        if x < 0 || y < 0 || x > self.map.width + 1 || y > self.map.height + 1 {
            return None;
        }
        Some(self.cells[(y * stride + x) as usize])
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let stride = self.map.width as usize + 3;
        self.cells.chunks(stride).map(move |row| row[..stride - 1].iter().collect())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.map.is_interior(Point::new(x, y)) {
            Some((y * (self.map.width + 3) + x) as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.cells.iter().collect();
        f.write_str(&text)
    }
}

/// Draws the current state: body first, food last so it wins any overlap.
pub fn render_grid(sim: &Simulation) -> Grid {
    let mut grid = Grid::new(sim.map());

    for pos in sim.snake().positions() {
        grid.put(pos.x, pos.y, SNAKE_BODY_CHAR);
    }

    let food = sim.food().position;
    grid.put(food.x, food.y, FOOD_CHAR);

    grid
}

pub fn status_lines(sim: &Simulation) -> Vec<String> {
    let stats = sim.stats();
    let head = sim.snake().head().position;

    vec![
        format!("Cycles: {}", sim.cycle()),
        format!("Score: {}", sim.score()),
        format!("Loses: {}", stats.loses),
        format!("Max score: {}", stats.max_score),
        format!("Total score: {}", stats.total_score),
        format!("X: {}; Y: {}", head.x, head.y),
    ]
}

/// Counters followed by the grid, one entry per terminal row.
pub fn render_frame(sim: &Simulation) -> Vec<String> {
    let mut lines = status_lines(sim);
    lines.extend(render_grid(sim).lines());
    lines
}
