//! Game entity types: pure data, no logic.
//!
//! Behaviour lives in `actors` (timed movement), `formation` (grid
//! bookkeeping) and `combat` (collisions).

use crate::tuning::*;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in logical pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when the two boxes share interior area; touching edges do not count.
    pub fn collides(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Identity of a dynamic actor, allocated by the `GameSession`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub id: EntityId,
    pub rect: Rect,
    /// Vertical pixels per step; negative travels up.
    pub velocity: i32,
    pub owner: BulletOwner,
    /// Time of the last step.
    pub timer: u64,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub id: EntityId,
    pub rect: Rect,
    pub timer: u64,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// A grid member. `row` and `column` never change after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub row: usize,
    pub column: usize,
    pub rect: Rect,
    pub score: u32,
    /// Which of the two animation images is showing.
    pub frame: bool,
}

impl Enemy {
    /// Place an enemy at its grid slot for a formation whose top row is at `position`.
    pub fn at_slot(row: usize, column: usize, position: i32) -> Self {
        Enemy {
            row,
            column,
            rect: Rect::new(
                ENEMY_ORIGIN_X + column as i32 * ENEMY_SPACING_X,
                position + row as i32 * ENEMY_SPACING_Y,
                ENEMY_WIDTH,
                ENEMY_HEIGHT,
            ),
            score: row_score(row),
            frame: false,
        }
    }
}

/// The bonus ship crossing the top of the field.
#[derive(Clone, Debug)]
pub struct Mystery {
    pub id: EntityId,
    pub rect: Rect,
    /// Bonus awarded when shot; fixed at spawn.
    pub score: u32,
    pub velocity: i32,
    pub timer: u64,
}

// ── Walls ─────────────────────────────────────────────────────────────────────

/// One destructible cell of a wall cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct Blocker {
    pub cluster: usize,
    /// Index among all cells built for the game; stable while cells are removed.
    pub cell: usize,
    pub rect: Rect,
}

/// The four wall clusters a new game starts with.
pub fn make_blockers() -> Vec<Blocker> {
    let mut blockers = Vec::new();
    for (cluster, offset) in BLOCKER_OFFSETS.iter().enumerate() {
        for row in 0..BLOCKER_ROWS {
            for column in 0..BLOCKER_COLUMNS {
                blockers.push(Blocker {
                    cluster,
                    cell: blockers.len(),
                    rect: Rect::new(
                        offset + column * BLOCKER_SIZE,
                        BLOCKERS_POSITION + row * BLOCKER_SIZE,
                        BLOCKER_SIZE,
                        BLOCKER_SIZE,
                    ),
                });
            }
        }
    }
    blockers
}
