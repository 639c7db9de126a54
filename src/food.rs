use rand::Rng;

use crate::geometry::{MapSize, Point};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    /// Segments appended when eaten.
    pub saturation: u32,
}

impl Food {
    pub fn new(position: Point, saturation: u32) -> Self {
        Food { position, saturation }
    }

    /// Drops food on a uniformly random interior cell. The snake's body is not
    /// consulted, so food may land on it.
    pub fn spawn<R: Rng + ?Sized>(map: MapSize, saturation: u32, rng: &mut R) -> Self {
        let position = Point::new(rng.gen_range(1..=map.width), rng.gen_range(1..=map.height));
        Food { position, saturation }
    }
}

/// Saturation of the first food, and of every food spawned after a meal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SaturationPolicy {
    pub initial: u32,
    pub refill: u32,
}

impl Default for SaturationPolicy {
    fn default() -> Self {
        SaturationPolicy { initial: 1, refill: 1 }
    }
}
