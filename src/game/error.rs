use thiserror::Error;

/// Errors raised while building a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Zero rows, fewer than 4 columns, a dimension past `i32::MAX`, or more
    /// than `MAX_BOARD_CELLS` cells in total
    #[error("invalid board size {rows}x{columns}")]
    InvalidSize { rows: usize, columns: usize },
}
