//! The enemy grid and its shared movement state.
//!
//! Enemies live in a rows×columns arena indexed by `(row, column)`. The set
//! of alive columns and the left/right extremes are updated on every removal,
//! so no per-tick scan of the grid is needed to know how wide the formation
//! is.

use std::collections::BTreeSet;

use rand::Rng;

use crate::entities::Enemy;
use crate::error::FormationError;
use crate::tuning::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What a single call to [`Formation::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationStep {
    /// Every enemy moved one step sideways.
    Shifted,
    /// The sweep ended: direction reversed and every enemy dropped.
    Descended,
}

/// Move interval for a formation with `population` survivors.
pub fn move_interval_for(population: usize) -> u64 {
    match population {
        1 => MOVE_INTERVAL_LAST,
        n if n <= FEW_ENEMIES => MOVE_INTERVAL_FEW,
        _ => MOVE_INTERVAL_DEFAULT,
    }
}

#[derive(Clone, Debug)]
pub struct Formation {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Enemy>>,
    population: usize,
    direction: Direction,
    move_number: u32,
    right_moves: u32,
    left_moves: u32,
    right_add_move: u32,
    left_add_move: u32,
    move_time: u64,
    timer: u64,
    bottom: i32,
    alive_columns: BTreeSet<usize>,
    left_alive_column: usize,
    right_alive_column: usize,
}

impl Formation {
    /// A grid with no enemies in it; fill it with [`Formation::place`].
    pub fn empty(rows: usize, columns: usize, now: u64) -> Self {
        Formation {
            rows,
            columns,
            cells: vec![None; rows * columns],
            population: 0,
            direction: Direction::Right,
            move_number: START_MOVE_NUMBER,
            right_moves: BASE_MOVES,
            left_moves: BASE_MOVES,
            right_add_move: 0,
            left_add_move: 0,
            move_time: move_interval_for(0),
            timer: now,
            bottom: 0,
            alive_columns: BTreeSet::new(),
            left_alive_column: 0,
            right_alive_column: columns.saturating_sub(1),
        }
    }

    /// A fully populated grid whose top row sits at `position`.
    pub fn new(rows: usize, columns: usize, position: i32, now: u64) -> Self {
        let mut formation = Formation::empty(rows, columns, now);
        for row in 0..rows {
            for column in 0..columns {
                formation.insert(row * columns + column, Enemy::at_slot(row, column, position));
            }
        }
        formation
    }

    fn index(&self, row: usize, column: usize) -> Result<usize, FormationError> {
        if row >= self.rows || column >= self.columns {
            return Err(FormationError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(row * self.columns + column)
    }

    /// Put `enemy` into the cell named by its own row and column.
    pub fn place(&mut self, enemy: Enemy) -> Result<(), FormationError> {
        let idx = self.index(enemy.row, enemy.column)?;
        if self.cells[idx].is_some() {
            return Err(FormationError::Occupied {
                row: enemy.row,
                column: enemy.column,
            });
        }
        self.insert(idx, enemy);
        Ok(())
    }

    fn insert(&mut self, idx: usize, enemy: Enemy) {
        let column = enemy.column;
        if self.alive_columns.is_empty() {
            self.left_alive_column = column;
            self.right_alive_column = column;
        } else {
            self.left_alive_column = self.left_alive_column.min(column);
            self.right_alive_column = self.right_alive_column.max(column);
        }
        self.alive_columns.insert(column);
        self.bottom = self.bottom.max(enemy.rect.bottom());
        self.cells[idx] = Some(enemy);
        self.population += 1;
        self.move_time = move_interval_for(self.population);
    }

    /// Take an enemy out of the grid, updating column bookkeeping and speed.
    pub fn remove(&mut self, row: usize, column: usize) -> Result<Enemy, FormationError> {
        let idx = self.index(row, column)?;
        let enemy = self.cells[idx]
            .take()
            .ok_or(FormationError::EmptyCell { row, column })?;
        self.population -= 1;

        let mut column_dead = self.is_column_dead(column);
        if column_dead {
            self.alive_columns.remove(&column);
        }

        if !self.alive_columns.is_empty() {
            if column == self.right_alive_column {
                while self.right_alive_column > 0 && column_dead {
                    self.right_alive_column -= 1;
                    self.right_add_move += SIDE_ALLOWANCE_STEP;
                    column_dead = self.is_column_dead(self.right_alive_column);
                }
            } else if column == self.left_alive_column {
                while self.left_alive_column + 1 < self.columns && column_dead {
                    self.left_alive_column += 1;
                    self.left_add_move += SIDE_ALLOWANCE_STEP;
                    column_dead = self.is_column_dead(self.left_alive_column);
                }
            }
        }

        self.move_time = move_interval_for(self.population);
        Ok(enemy)
    }

    pub fn is_column_dead(&self, column: usize) -> bool {
        (0..self.rows).all(|row| self.cells[row * self.columns + column].is_none())
    }

    /// Perform at most one formation move if the move interval has elapsed.
    pub fn advance(&mut self, now: u64) -> Option<FormationStep> {
        if now.saturating_sub(self.timer) <= self.move_time {
            return None;
        }

        let step = if self.move_number >= self.move_bound(self.direction) {
            self.left_moves = BASE_MOVES + self.right_add_move;
            self.right_moves = BASE_MOVES + self.left_add_move;
            self.direction = self.direction.reversed();
            self.move_number = 0;
            let mut bottom = 0;
            for enemy in self.cells.iter_mut().flatten() {
                enemy.rect.y += ENEMY_MOVE_DOWN;
                enemy.frame = !enemy.frame;
                bottom = bottom.max(enemy.rect.bottom());
            }
            self.bottom = bottom;
            FormationStep::Descended
        } else {
            let dx = ENEMY_STEP_X * self.direction.sign();
            for enemy in self.cells.iter_mut().flatten() {
                enemy.rect.x += dx;
                enemy.frame = !enemy.frame;
            }
            self.move_number += 1;
            FormationStep::Shifted
        };

        self.timer += self.move_time;
        Some(step)
    }

    /// The lowest survivor of a uniformly chosen alive column.
    pub fn random_bottom_alive(&self, rng: &mut impl Rng) -> Option<&Enemy> {
        if self.alive_columns.is_empty() {
            return None;
        }
        let pick = rng.gen_range(0..self.alive_columns.len());
        let column = *self.alive_columns.iter().nth(pick)?;
        (0..self.rows)
            .rev()
            .find_map(|row| self.cells[row * self.columns + column].as_ref())
    }

    pub fn is_invading(&self, threshold_y: i32) -> bool {
        self.bottom >= threshold_y
    }

    /// Moves allowed in `direction` before the next reversal.
    pub fn move_bound(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Right => self.right_moves + self.right_add_move,
            Direction::Left => self.left_moves + self.left_add_move,
        }
    }

    /// Extra moves earned on `side` by clearing its edge columns.
    pub fn side_allowance(&self, side: Direction) -> u32 {
        match side {
            Direction::Right => self.right_add_move,
            Direction::Left => self.left_add_move,
        }
    }

    /// Leftmost and rightmost alive columns, if any enemy survives.
    pub fn alive_bounds(&self) -> Option<(usize, usize)> {
        if self.alive_columns.is_empty() {
            None
        } else {
            Some((self.left_alive_column, self.right_alive_column))
        }
    }

    pub fn alive_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive_columns.iter().copied()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Enemy> {
        self.index(row, column)
            .ok()
            .and_then(|idx| self.cells[idx].as_ref())
    }

    /// Survivors in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.cells.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.population
    }

    pub fn is_empty(&self) -> bool {
        self.population == 0
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn move_interval(&self) -> u64 {
        self.move_time
    }
}
