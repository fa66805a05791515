use std::fmt;

/// Caller defects when addressing the enemy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormationError {
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    Occupied { row: usize, column: usize },
    EmptyCell { row: usize, column: usize },
}

impl fmt::Display for FormationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormationError::OutOfBounds {
                row,
                column,
                rows,
                columns,
            } => write!(
                f,
                "cell ({row}, {column}) is outside the {rows}x{columns} grid"
            ),
            FormationError::Occupied { row, column } => {
                write!(f, "cell ({row}, {column}) already holds an enemy")
            }
            FormationError::EmptyCell { row, column } => {
                write!(f, "cell ({row}, {column}) holds no enemy")
            }
        }
    }
}

impl std::error::Error for FormationError {}
