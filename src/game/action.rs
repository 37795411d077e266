use super::state::Position;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction pointing the other way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the (row, column) delta for moving in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Position adjacent to `position` in this direction
    pub fn translate(self, position: Position) -> Position {
        let (dr, dc) = self.delta();
        position.moved_by(dr, dc)
    }

    /// Direction of a single step from `from` to `to`, if they are neighbours
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.translate(from) == to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);

        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_translate() {
        let pos = Position::new(5, 5);
        assert_eq!(Direction::Up.translate(pos), Position::new(4, 5));
        assert_eq!(Direction::Down.translate(pos), Position::new(6, 5));
        assert_eq!(Direction::Left.translate(pos), Position::new(5, 4));
        assert_eq!(Direction::Right.translate(pos), Position::new(5, 6));
    }

    #[test]
    fn test_translate_off_the_edge() {
        let corner = Position::new(0, 0);
        assert_eq!(Direction::Up.translate(corner), Position::new(-1, 0));
        assert_eq!(Direction::Left.translate(corner), Position::new(0, -1));
    }

    #[test]
    fn test_between_neighbours() {
        let pos = Position::new(3, 3);
        for direction in Direction::ALL {
            assert_eq!(
                Direction::between(pos, direction.translate(pos)),
                Some(direction)
            );
        }
        assert_eq!(Direction::between(pos, Position::new(5, 5)), None);
        assert_eq!(Direction::between(pos, pos), None);
    }
}
