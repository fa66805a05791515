//! Gameplay tuning.
//!
//! All coordinates are in logical pixels on an 800×600 field, all durations
//! in milliseconds of the injected clock.

// ── Field ─────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

/// Actors (ship, bullets, mystery) step at most once per this many ms.
pub const ACTOR_STEP_MS: u64 = 20;

// ── Formation ─────────────────────────────────────────────────────────────────

pub const ENEMY_ROWS: usize = 5;
pub const ENEMY_COLUMNS: usize = 10;
pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 35;
pub const ENEMY_ORIGIN_X: i32 = 154;
pub const ENEMY_SPACING_X: i32 = 50;
pub const ENEMY_SPACING_Y: i32 = 45;

/// Starting depth of the top row on a new game.
pub const ENEMY_DEFAULT_POSITION: i32 = 65;
/// Vertical drop on every direction reversal; also the per-round depth step.
pub const ENEMY_MOVE_DOWN: i32 = 35;
pub const ENEMY_STEP_X: i32 = 10;

pub const BASE_MOVES: u32 = 30;
/// The first sweep starts from the centre of the travel range.
pub const START_MOVE_NUMBER: u32 = 15;
pub const SIDE_ALLOWANCE_STEP: u32 = 5;

pub const MOVE_INTERVAL_DEFAULT: u64 = 600;
pub const MOVE_INTERVAL_FEW: u64 = 400;
pub const MOVE_INTERVAL_LAST: u64 = 200;
pub const FEW_ENEMIES: usize = 10;

/// Points per grid row, top row first.
pub const ROW_SCORES: [u32; ENEMY_ROWS] = [30, 20, 20, 10, 10];

// ── Invasion thresholds ───────────────────────────────────────────────────────

pub const BLOCKERS_POSITION: i32 = 450;
pub const PLAYER_CONTACT_Y: i32 = 540;
pub const INVASION_FLOOR_Y: i32 = 600;

// ── Blockers ──────────────────────────────────────────────────────────────────

pub const BLOCKER_SIZE: i32 = 10;
pub const BLOCKER_OFFSETS: [i32; 4] = [50, 250, 450, 650];
pub const BLOCKER_ROWS: i32 = 4;
pub const BLOCKER_COLUMNS: i32 = 9;

// ── Player ────────────────────────────────────────────────────────────────────

pub const SHIP_START_X: i32 = 375;
pub const SHIP_START_Y: i32 = 540;
pub const SHIP_WIDTH: i32 = 50;
pub const SHIP_HEIGHT: i32 = 48;
pub const SHIP_SPEED: i32 = 5;
pub const SHIP_MIN_X: i32 = 10;
pub const SHIP_MAX_X: i32 = 740;

pub const STARTING_LIVES: u8 = 3;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: i32 = 5;
pub const BULLET_HEIGHT: i32 = 15;
pub const PLAYER_BULLET_VELOCITY: i32 = -15;
pub const ENEMY_BULLET_VELOCITY: i32 = 5;
pub const BULLET_MIN_Y: i32 = 15;
pub const BULLET_MAX_Y: i32 = 600;

/// From this score on the ship fires two bullets at once.
pub const DOUBLE_SHOT_SCORE: u32 = 1000;

// ── Mystery ship ──────────────────────────────────────────────────────────────

pub const MYSTERY_Y: i32 = 45;
pub const MYSTERY_WIDTH: i32 = 75;
pub const MYSTERY_HEIGHT: i32 = 35;
pub const MYSTERY_DEFAULT_VELOCITY: i32 = 2;
pub const MYSTERY_LEFT_EDGE: i32 = -80;
pub const MYSTERY_RIGHT_EDGE: i32 = 800;
pub const MYSTERY_REWARDS: [u32; 4] = [50, 100, 150, 300];

// ── Timers ────────────────────────────────────────────────────────────────────

pub const ENEMY_SHOOT_INTERVAL: u64 = 700;
pub const MYSTERY_COOLDOWN: u64 = 25_000;
pub const ROUND_TRANSITION_DWELL: u64 = 3000;
pub const GAME_OVER_DWELL: u64 = 3000;

/// Number of notes in the formation's background cadence.
pub const FORMATION_NOTES: u8 = 4;

/// Score value of an enemy on `row`.
pub fn row_score(row: usize) -> u32 {
    ROW_SCORES.get(row).copied().unwrap_or(ROW_SCORES[ENEMY_ROWS - 1])
}
