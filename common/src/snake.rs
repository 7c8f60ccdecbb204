use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn shifted(self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The two directions perpendicular to this one's axis of motion.
    pub fn perpendicular(self) -> [Direction; 2] {
        if self.is_horizontal() {
            [Direction::Up, Direction::Down]
        } else {
            [Direction::Left, Direction::Right]
        }
    }

    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Snake body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    pub body: VecDeque<Position>,
    pub direction: Direction,
}

impl Snake {
    /// Lays out `length` segments ending at `head`, trailing away opposite
    /// to `direction`.
    pub fn spawn(head: Position, length: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        let body = (0..length.max(1) as i16)
            .map(|i| Position {
                x: head.x - dx * i,
                y: head.y - dy * i,
            })
            .collect();
        Snake { body, direction }
    }

    pub fn head(&self) -> Position {
        *self.body.front().expect("Snake body should not be empty")
    }

    pub fn tail(&self) -> Position {
        *self.body.back().expect("Snake body should not be empty")
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.body.contains(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_trails_away_from_direction() {
        let snake = Snake::spawn(Position { x: 5, y: 5 }, 3, Direction::Right);
        assert_eq!(snake.head(), Position { x: 5, y: 5 });
        assert_eq!(snake.tail(), Position { x: 3, y: 5 });
        assert_eq!(snake.length(), 3);
    }

    #[test]
    fn reverse_detection() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert_eq!(Direction::Left.perpendicular(), [Direction::Up, Direction::Down]);
        assert_eq!(Direction::Down.perpendicular(), [Direction::Left, Direction::Right]);
    }
}
