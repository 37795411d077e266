use std::collections::VecDeque;
use std::fmt;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use ringbuffer::{AllocRingBuffer, RingBuffer};
use tracing::{debug, trace};

use super::{
    action::Direction,
    config::GameConfig,
    error::EngineError,
    state::{CellState, Classification, Grid, Position},
};

/// Most direction changes that can wait for upcoming ticks
pub const MAX_PENDING_DIRECTIONS: usize = 2;

/// Largest board accepted, in cells
pub const MAX_BOARD_CELLS: usize = 1 << 20;

const INITIAL_SNAKE_LENGTH: i32 = 3;
const INITIAL_FOOD_COUNT: usize = 2;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// What the head ran into, `None` when the engine was already frozen
    pub classification: Option<Classification>,
    /// Whether the game has ended
    pub terminated: bool,
}

impl TickResult {
    pub fn ate_food(&self) -> bool {
        self.classification == Some(Classification::Food)
    }
}

/// Rules engine for a single board.
///
/// The grid and the ordered body describe the same snake and are only ever
/// changed together through `add_head` / `remove_tail`.
#[derive(Clone)]
pub struct BoardEngine {
    grid: Grid,
    snake: VecDeque<Position>,
    pending: AllocRingBuffer<Direction>,
    direction: Direction,
    score: u32,
    game_over: bool,
    rng: StdRng,
}

impl BoardEngine {
    /// Create a board whose food placement is seeded from OS entropy
    pub fn new(rows: usize, columns: usize) -> Result<Self, EngineError> {
        Self::with_rng(rows, columns, StdRng::from_entropy())
    }

    /// Create a board with reproducible food placement
    pub fn with_seed(rows: usize, columns: usize, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(rows, columns, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, EngineError> {
        match config.seed {
            Some(seed) => Self::with_seed(config.rows, config.columns, seed),
            None => Self::new(config.rows, config.columns),
        }
    }

    fn with_rng(rows: usize, columns: usize, rng: StdRng) -> Result<Self, EngineError> {
        let fits = |n: usize| i32::try_from(n).is_ok();
        let cells = rows.checked_mul(columns);
        if rows == 0
            || columns <= INITIAL_SNAKE_LENGTH as usize
            || !fits(rows)
            || !fits(columns)
            || cells.is_none_or(|cells| cells > MAX_BOARD_CELLS)
        {
            return Err(EngineError::InvalidSize { rows, columns });
        }

        let mut engine = Self {
            grid: Grid::new(rows, columns),
            snake: VecDeque::new(),
            pending: AllocRingBuffer::new(MAX_PENDING_DIRECTIONS),
            direction: Direction::Right,
            score: 0,
            game_over: false,
            rng,
        };

        let row = (rows / 2) as i32;
        for column in 1..=INITIAL_SNAKE_LENGTH {
            engine.add_head(Position::new(row, column));
        }
        engine.place_food(INITIAL_FOOD_COUNT);

        debug!(rows, columns, "board created");
        Ok(engine)
    }

    /// Buffer a turn for an upcoming tick.
    ///
    /// Returns whether the request was accepted. Rejected requests leave the
    /// engine untouched.
    pub fn request_direction_change(&mut self, direction: Direction) -> bool {
        if !self.can_change_direction(direction) {
            trace!(?direction, "direction change rejected");
            return false;
        }
        self.pending.enqueue(direction);
        true
    }

    fn can_change_direction(&self, direction: Direction) -> bool {
        if self.game_over || self.pending.len() >= MAX_PENDING_DIRECTIONS {
            return false;
        }
        let last = self.last_direction();
        direction != last && !direction.is_opposite(last)
    }

    /// Latest queued turn, or the current heading when nothing is queued
    fn last_direction(&self) -> Direction {
        self.pending.back().copied().unwrap_or(self.direction)
    }

    /// Advance the snake by one cell
    pub fn tick(&mut self) -> TickResult {
        if self.game_over {
            return TickResult {
                classification: None,
                terminated: true,
            };
        }

        if let Some(next) = self.pending.dequeue() {
            self.direction = next;
        }

        let new_head = self.head().moved_in_direction(self.direction);
        let classification = self.classify(new_head);

        match classification {
            Classification::Outside | Classification::Snake => {
                self.game_over = true;
                debug!(
                    ?classification,
                    row = new_head.row,
                    column = new_head.column,
                    score = self.score,
                    "snake collided"
                );
            }
            Classification::Empty => {
                self.remove_tail();
                self.add_head(new_head);
            }
            Classification::Food => {
                self.add_head(new_head);
                self.score += 1;
                debug!(score = self.score, length = self.snake.len(), "food eaten");
                if !self.grid.contains(CellState::Food) {
                    self.place_food(1);
                }
            }
        }

        TickResult {
            classification: Some(classification),
            terminated: self.game_over,
        }
    }

    /// Classify the cell the head is about to enter.
    ///
    /// The tail is compared by position before the grid is consulted: it
    /// still reads as Snake, but it moves away during this tick.
    fn classify(&self, pos: Position) -> Classification {
        if !self.grid.is_in_bounds(pos) {
            return Classification::Outside;
        }
        if pos == self.tail() {
            return Classification::Empty;
        }
        self.grid.classify(pos)
    }

    fn add_head(&mut self, pos: Position) {
        self.snake.push_front(pos);
        self.grid.set(pos, CellState::Snake);
    }

    fn remove_tail(&mut self) {
        if let Some(tail) = self.snake.pop_back() {
            self.grid.set(tail, CellState::Empty);
        }
    }

    /// Put up to `count` food items on distinct empty cells
    fn place_food(&mut self, count: usize) {
        let empty = self.grid.positions_of(CellState::Empty);
        let picks: Vec<Position> = empty
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();

        for pos in picks {
            self.grid.set(pos, CellState::Food);
            debug!(row = pos.row, column = pos.column, "food placed");
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Stored content of a cell, `Outside` beyond the board
    pub fn cell(&self, pos: Position) -> Classification {
        self.grid.classify(pos)
    }

    /// Body positions, head first
    pub fn snake(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.iter().copied()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn tail(&self) -> Position {
        self.snake[self.snake.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Buffered turns, oldest first
    pub fn pending_directions(&self) -> Vec<Direction> {
        self.pending.iter().copied().collect()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn food_positions(&self) -> Vec<Position> {
        self.grid.positions_of(CellState::Food)
    }
}

impl fmt::Debug for BoardEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardEngine")
            .field("rows", &self.rows())
            .field("columns", &self.columns())
            .field("snake", &self.snake)
            .field("direction", &self.direction)
            .field("pending", &self.pending_directions())
            .field("score", &self.score)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}
