use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Moves one cell along `direction`. Bounds are the caller's business.
    pub fn move_along(&mut self, direction: Direction) {
        let (dx, dy) = direction.offset();
        self.x += dx;
        self.y += dy;
    }

    /// Moves one cell against `direction`, i.e. to the cell a segment heading
    /// that way has just left.
    pub fn reverse_move(&mut self, direction: Direction) {
        self.move_along(direction.opposite());
    }

    pub fn manhattan(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Playable area. Cells `1..=width` x `1..=height` are the interior, the ring
/// at 0 and `width + 1` / `height + 1` is the boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapSize {
    pub width: i32,
    pub height: i32,
}

impl MapSize {
    pub const fn new(width: i32, height: i32) -> Self {
        MapSize { width, height }
    }

    pub fn is_interior(&self, p: Point) -> bool {
        p.x >= 1 && p.y >= 1 && p.x <= self.width && p.y <= self.height
    }

    pub fn is_out_of_bounds(&self, p: Point) -> bool {
        !self.is_interior(p)
    }
}
