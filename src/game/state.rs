use super::action::Direction;

/// A cell coordinate on the board, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Move position by delta
    pub fn moved_by(&self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            column: self.column + dc,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        direction.translate(*self)
    }
}

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Snake,
    Food,
}

/// Result of checking the cell the head is about to enter.
///
/// `Outside` is never stored in the grid; it only comes out of bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Empty,
    Snake,
    Food,
    Outside,
}

impl From<CellState> for Classification {
    fn from(cell: CellState) -> Self {
        match cell {
            CellState::Empty => Classification::Empty,
            CellState::Snake => Classification::Snake,
            CellState::Food => Classification::Food,
        }
    }
}

/// Fixed-size board of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![CellState::Empty; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.column >= 0
            && (pos.row as usize) < self.rows
            && (pos.column as usize) < self.columns
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_in_bounds(pos)
            .then(|| pos.row as usize * self.columns + pos.column as usize)
    }

    /// Cell content, or `None` outside the board
    pub fn get(&self, pos: Position) -> Option<CellState> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Bounds-aware lookup used for collision checks
    pub fn classify(&self, pos: Position) -> Classification {
        self.get(pos)
            .map(Classification::from)
            .unwrap_or(Classification::Outside)
    }

    pub(crate) fn set(&mut self, pos: Position, cell: CellState) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// All cells with their positions, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells.iter().enumerate().map(|(i, &cell)| {
            let row = (i / self.columns) as i32;
            let column = (i % self.columns) as i32;
            (Position::new(row, column), cell)
        })
    }

    /// Positions currently holding `cell`
    pub fn positions_of(&self, cell: CellState) -> Vec<Position> {
        self.iter()
            .filter(|&(_, c)| c == cell)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count(&self, cell: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn contains(&self, cell: CellState) -> bool {
        self.cells.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(4, 5));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 10);

        assert!(grid.is_in_bounds(Position::new(0, 0)));
        assert!(grid.is_in_bounds(Position::new(19, 9)));
        assert!(!grid.is_in_bounds(Position::new(-1, 0)));
        assert!(!grid.is_in_bounds(Position::new(0, -1)));
        assert!(!grid.is_in_bounds(Position::new(20, 0)));
        assert!(!grid.is_in_bounds(Position::new(0, 10)));
    }

    #[test]
    fn test_classify() {
        let mut grid = Grid::new(4, 4);
        grid.set(Position::new(1, 1), CellState::Snake);
        grid.set(Position::new(2, 2), CellState::Food);

        assert_eq!(grid.classify(Position::new(0, 0)), Classification::Empty);
        assert_eq!(grid.classify(Position::new(1, 1)), Classification::Snake);
        assert_eq!(grid.classify(Position::new(2, 2)), Classification::Food);
        assert_eq!(grid.classify(Position::new(4, 0)), Classification::Outside);
        assert_eq!(grid.classify(Position::new(0, -1)), Classification::Outside);
    }

    #[test]
    fn test_set_outside_is_ignored() {
        let mut grid = Grid::new(3, 3);
        grid.set(Position::new(3, 3), CellState::Food);
        assert!(!grid.contains(CellState::Food));
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut grid = Grid::new(2, 3);
        grid.set(Position::new(1, 0), CellState::Food);

        let positions: Vec<Position> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(0, 2));
        assert_eq!(positions[3], Position::new(1, 0));

        assert_eq!(grid.positions_of(CellState::Food), vec![Position::new(1, 0)]);
        assert_eq!(grid.count(CellState::Empty), 5);
    }
}
