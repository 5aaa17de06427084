//! Snake body - ordered segments plus a membership set
//!
//! The body is a `VecDeque` (head at the front) for O(1) push/pop at both ends,
//! paired with a `HashSet` for O(1) collision tests. Every mutation goes through
//! this type so the two stay in sync.

use std::collections::{HashSet, VecDeque};

use crate::types::{Direction, Point, START_LENGTH};

#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Point>,
    occupied: HashSet<Point>,
    /// Direction applied on the next move.
    direction: Direction,
    /// Direction of the last completed move; reversal checks use this.
    heading: Direction,
}

impl Snake {
    /// Build a straight snake whose head is at `head`, trailing opposite to `direction`.
    pub fn new(head: Point, direction: Direction, len: usize) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(len.max(START_LENGTH) * 4);
        let mut p = head;
        for _ in 0..len {
            body.push_back(p);
            p = p.step(back);
        }
        let occupied = body.iter().copied().collect();
        Self {
            body,
            occupied,
            direction,
            heading: direction,
        }
    }

    pub fn head(&self) -> Point {
        // A snake is never empty: `new` is only called with len >= 1 and pops stop at 1.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.occupied.contains(&p)
    }

    /// Request a turn. Returns `false` (and changes nothing) for a 180° reversal of
    /// either the pending direction or the last completed move.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir.is_opposite(self.direction) || dir.is_opposite(self.heading) {
            return false;
        }
        self.direction = dir;
        true
    }

    /// The head position the next move would produce, before any wall handling.
    pub fn next_head(&self) -> Point {
        self.head().step(self.direction)
    }

    /// Push a new head and record the heading it was reached with.
    pub fn push_head(&mut self, p: Point) {
        self.body.push_front(p);
        self.occupied.insert(p);
        self.heading = self.direction;
    }

    /// Drop the last segment. Refuses to empty the snake.
    pub fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() <= 1 {
            return None;
        }
        // Segments are unique: a head may never enter any occupied cell, tail included.
        let tail = self.body.pop_back()?;
        self.occupied.remove(&tail);
        Some(tail)
    }
}
