use std::cmp::max;

use rand::{rngs::StdRng, SeedableRng};

use crate::food::{Food, SaturationPolicy};
use crate::geometry::{Direction::{self, *}, MapSize, Point};
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub initial_length: usize,
    pub respawn_length: usize,
    pub saturation: SaturationPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { initial_length: 3, respawn_length: 3, saturation: SaturationPolicy::default() }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub max_score: u64,
    pub loses: u64,
    pub total_score: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Boundary,
    Body,
}

/// What a fatal collision did to the body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Viability {
    Shrunk,
    Respawned,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub collision: Option<(Collision, Viability)>,
    /// Saturation of the food eaten this tick.
    pub eaten: Option<u32>,
}

pub struct Simulation {
    map: MapSize,
    rules: Rules,
    snake: Snake,
    food: Food,
    cycle: u64,
    stats: Stats,
    rng: StdRng,
}

impl Simulation {
    pub fn new(map: MapSize, rules: Rules, seed: u64) -> Self {
        Simulation::with_rng(map, rules, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(map: MapSize, rules: Rules, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(rules.initial_length);
        let food = Food::spawn(map, rules.saturation.initial, &mut rng);
        let stats = Stats { max_score: snake.len() as u64, ..Stats::default() };

        Simulation { map, rules, snake, food, cycle: 0, stats, rng }
    }

    pub fn map(&self) -> MapSize {
        self.map
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn score(&self) -> usize {
        self.snake.len()
    }

    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub fn place_food(&mut self, food: Food) {
        self.food = food;
    }

    /// Runs one tick: collisions, feeding, steering, then the move.
    pub fn step(&mut self) -> StepReport {
        let collision = self.detect_collision().map(|kind| (kind, self.spend_life()));
        let eaten = self.feed();

        if let Some(dir) = steer(self.snake.head().position, self.food.position) {
            self.snake.set_direction(dir);
        }
        self.snake.advance();
        self.cycle += 1;

        StepReport { collision, eaten }
    }

    ///////////////////////////////////////////////////////////////////////////

    // Evaluated on the pre-step body, so a tick costs at most one life no
    // matter how many segments sit on the head.
    fn detect_collision(&self) -> Option<Collision> {
        if self.map.is_out_of_bounds(self.snake.head().position) {
            Some(Collision::Boundary)
        } else if self.snake.hits_itself() {
            Some(Collision::Body)
        } else {
            None
        }
    }

    fn spend_life(&mut self) -> Viability {
        match self.snake.shrink_tail() {
            Some(_) => Viability::Shrunk,
            None => {
                self.snake = Snake::spawn(self.rules.respawn_length);
                self.stats.loses += 1;
                Viability::Respawned
            }
        }
    }

    fn feed(&mut self) -> Option<u32> {
        let (map, food) = (self.map, self.food);
        let reached = self.snake.positions()
            .filter(|pos| map.is_interior(*pos))
            .any(|pos| pos == food.position);

        if !reached {
            return None;
        }

        self.snake.grow(food.saturation as usize);
        self.stats.total_score += u64::from(food.saturation);
        self.stats.max_score = max(self.stats.max_score, self.snake.len() as u64);
        self.food = Food::spawn(self.map, self.rules.saturation.refill, &mut self.rng);

        Some(food.saturation)
    }
}

/// Greedy heading towards `food`: close the x gap first, then the y gap.
/// `None` when the head already sits on the food.
pub fn steer(head: Point, food: Point) -> Option<Direction> {
    if food.x > head.x {
        Some(Right)
    } else if food.x < head.x {
        Some(Left)
    } else if food.y > head.y {
        Some(Down)
    } else if food.y < head.y {
        Some(Up)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: MapSize = MapSize::new(30, 30);
    const FAR_AWAY: Point = Point::new(25, 25);

    fn create_test_sim() -> Simulation {
        let mut sim = Simulation::new(MAP, Rules::default(), 12345);
        sim.place_food(Food::new(FAR_AWAY, 1));
        sim
    }

    #[test]
    fn test_steer_priority() {
        let head = Point::new(5, 5);
        assert_eq!(steer(head, Point::new(8, 5)), Some(Right));
        assert_eq!(steer(head, Point::new(5, 2)), Some(Up));
        assert_eq!(steer(head, Point::new(2, 9)), Some(Left));
        assert_eq!(steer(head, Point::new(5, 9)), Some(Down));
        assert_eq!(steer(head, Point::new(9, 1)), Some(Right));
        assert_eq!(steer(head, head), None);
    }

    #[test]
    fn test_new_simulation() {
        let sim = Simulation::new(MAP, Rules::default(), 1);

        assert_eq!(sim.score(), 3);
        assert_eq!(sim.cycle(), 0);
        assert_eq!(sim.stats().max_score, 3);
        assert_eq!(sim.stats().loses, 0);
        assert!(MAP.is_interior(sim.food().position));
        assert_eq!(sim.food().saturation, 1);
    }

    #[test]
    fn test_quiet_step_moves_towards_food() {
        let mut sim = create_test_sim();

        let report = sim.step();

        assert_eq!(report, StepReport::default());
        assert_eq!(sim.snake().head().position, Point::new(2, 1));
        assert_eq!(sim.cycle(), 1);
    }

    #[test]
    fn test_boundary_collision_shrinks_tail() {
        let mut sim = create_test_sim();
        sim.replace_snake(Snake::new(Point::new(0, 5), 3, Right));

        let report = sim.step();

        assert_eq!(report.collision, Some((Collision::Boundary, Viability::Shrunk)));
        assert_eq!(sim.score(), 2);
        assert_eq!(sim.stats().loses, 0);
        assert_eq!(sim.snake().head().position, Point::new(1, 5));
    }

    #[test]
    fn test_lone_head_collision_respawns() {
        let mut sim = create_test_sim();
        sim.replace_snake(Snake::new(Point::new(31, 5), 1, Right));

        let report = sim.step();

        assert_eq!(report.collision, Some((Collision::Boundary, Viability::Respawned)));
        assert_eq!(sim.stats().loses, 1);
        assert_eq!(sim.score(), sim.rules().respawn_length);
        assert_eq!(sim.snake().head().position, Point::new(2, 1));
    }

    #[test]
    fn test_respawn_uses_respawn_length() {
        let rules = Rules { respawn_length: 1, ..Rules::default() };
        let mut sim = Simulation::new(MAP, rules, 3);
        sim.place_food(Food::new(FAR_AWAY, 1));
        sim.replace_snake(Snake::new(Point::new(4, 0), 1, Up));

        sim.step();

        assert_eq!(sim.score(), 1);
        assert_eq!(sim.stats().loses, 1);
    }

    #[test]
    fn test_self_collision_costs_one_life_per_tick() {
        let mut sim = create_test_sim();
        let mut snake = Snake::new(Point::new(5, 5), 9, Right);
        // Two laps of a 2x2 square leave segments 4 and 8 on the head.
        for dir in [Right, Down, Left, Up, Right, Down, Left, Up].iter() {
            snake.set_direction(*dir);
            snake.advance();
        }
        assert_eq!(snake.positions().skip(1).filter(|p| *p == Point::new(5, 5)).count(), 2);
        sim.replace_snake(snake);

        let report = sim.step();

        assert_eq!(report.collision, Some((Collision::Body, Viability::Shrunk)));
        assert_eq!(sim.score(), 8);
    }

    #[test]
    fn test_boundary_wins_over_body_collision() {
        let mut sim = create_test_sim();
        let mut snake = Snake::new(Point::new(1, 0), 5, Right);
        for dir in [Down, Right, Up, Left].iter() {
            snake.set_direction(*dir);
            snake.advance();
        }
        assert_eq!(snake.head().position, Point::new(1, 0));
        assert!(snake.hits_itself());
        sim.replace_snake(snake);

        let report = sim.step();

        assert_eq!(report.collision, Some((Collision::Boundary, Viability::Shrunk)));
        assert_eq!(sim.score(), 4);
    }

    #[test]
    fn test_bottom_ring_is_a_boundary() {
        let mut sim = create_test_sim();
        sim.replace_snake(Snake::new(Point::new(5, MAP.height + 1), 3, Down));

        let report = sim.step();

        assert_eq!(report.collision, Some((Collision::Boundary, Viability::Shrunk)));
        assert_eq!(sim.score(), 2);
        assert_eq!(sim.snake().head().position, Point::new(6, MAP.height + 1));
    }

    #[test]
    fn test_right_ring_is_a_boundary() {
        let mut sim = create_test_sim();
        sim.replace_snake(Snake::new(Point::new(MAP.width + 1, 5), 2, Right));

        let report = sim.step();

        assert_eq!(report.collision, Some((Collision::Boundary, Viability::Shrunk)));
        assert_eq!(sim.score(), 1);
    }

    #[test]
    fn test_feeding_grows_by_saturation() {
        let rules = Rules {
            saturation: SaturationPolicy { initial: 1, refill: 4 },
            ..Rules::default()
        };
        let mut sim = Simulation::new(MAP, rules, 99);
        sim.replace_snake(Snake::new(Point::new(5, 5), 3, Right));
        sim.place_food(Food::new(Point::new(5, 5), 2));

        let report = sim.step();

        assert_eq!(report.eaten, Some(2));
        assert_eq!(sim.score(), 5);
        assert_eq!(sim.stats().total_score, 2);
        assert_eq!(sim.stats().max_score, 5);
        assert!(MAP.is_interior(sim.food().position));
        assert_eq!(sim.food().saturation, 4);
    }

    #[test]
    fn test_body_segment_can_eat() {
        let mut sim = create_test_sim();
        sim.replace_snake(Snake::new(Point::new(5, 5), 3, Right));
        sim.place_food(Food::new(Point::new(3, 5), 1));

        let report = sim.step();

        assert_eq!(report.eaten, Some(1));
        assert_eq!(sim.score(), 4);
    }

    #[test]
    fn test_max_score_keeps_peak() {
        let mut sim = create_test_sim();
        sim.replace_snake(Snake::new(Point::new(5, 5), 3, Right));
        sim.place_food(Food::new(Point::new(5, 5), 3));
        sim.step();
        assert_eq!(sim.stats().max_score, 6);

        sim.place_food(Food::new(FAR_AWAY, 1));
        sim.replace_snake(Snake::new(Point::new(0, 5), 6, Right));
        sim.step();

        assert_eq!(sim.score(), 5);
        assert_eq!(sim.stats().max_score, 6);
    }
}
