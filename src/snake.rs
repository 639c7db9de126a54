use crate::geometry::{Direction::{self, *}, Point};

/// Where every fresh body puts its head.
pub const SPAWN_POINT: Point = Point::new(1, 1);
pub const SPAWN_DIRECTION: Direction = Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub position: Point,
    pub direction: Direction,
}

/// Segmented body stored head-first: index 0 is the head, the last index is
/// the tail, and a segment's neighbours are the adjacent slots.
#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Segment>,
}

impl Snake {
    pub fn new(pos: Point, length: usize, direction: Direction) -> Self {
        let mut snake = Snake { body: vec![Segment { position: pos, direction }] };
        snake.grow(length.saturating_sub(1));
        snake
    }

    pub fn spawn(length: usize) -> Self {
        Snake::new(SPAWN_POINT, length, SPAWN_DIRECTION)
    }

    pub fn body(&self) -> &[Segment] {
        &self.body
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.body.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().map(|seg| seg.position)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a body keeps at least its head.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> &Segment {
        &self.body[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.body[self.body.len() - 1]
    }

    /// Segment one step closer to the head.
    pub fn prev(&self, index: usize) -> Option<&Segment> {
        index.checked_sub(1).and_then(|i| self.body.get(i))
    }

    /// Segment one step closer to the tail.
    pub fn next(&self, index: usize) -> Option<&Segment> {
        if index < self.body.len() {
            self.body.get(index + 1)
        } else {
            None
        }
    }

    pub fn direction(&self) -> Direction {
        self.head().direction
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        self.body[0].direction = new_direction;
    }

    /// Appends `count` segments, each placed right behind the current tail
    /// and heading the same way.
    pub fn grow(&mut self, count: usize) {
        self.body.reserve(count);

        for _ in 0..count {
            let tail = *self.tail();
            let mut position = tail.position;
            position.reverse_move(tail.direction);
            self.body.push(Segment { position, direction: tail.direction });
        }
    }

    /// Drops the tail. A lone head is never removed; callers handle that case
    /// by respawning.
    pub fn shrink_tail(&mut self) -> Option<Segment> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    /// Moves the head along its direction; every other segment takes the
    /// position and direction its predecessor had before the move.
    pub fn advance(&mut self) {
        // Back to front, so each slot reads its predecessor before it is overwritten.
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let head = &mut self.body[0];
        head.position.move_along(head.direction);
    }

    pub fn hits_itself(&self) -> bool {
        let head = self.head().position;
        self.body[1..].iter().any(|seg| seg.position == head)
    }
}
