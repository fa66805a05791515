//! Process-scoped game progress: score, reserves and round depth.

use crate::entities::EntityId;
use crate::tuning::*;

/// Result of the player ship being hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeLoss {
    /// A reserve was used up; the value is the HUD slot that went dark.
    SlotConsumed(u8),
    /// No reserve was left.
    Exhausted,
}

#[derive(Clone, Debug)]
pub struct GameSession {
    pub score: u32,
    /// Reserve ships, not counting the one in play.
    pub lives: u8,
    /// Rounds cleared since the new game.
    pub round: u32,
    /// Y of the formation's top row at round start.
    pub enemy_position: i32,
    /// Mystery ship velocity; its sign carries over between spawns.
    pub mystery_velocity: i32,
    next_id: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession {
            score: 0,
            lives: STARTING_LIVES,
            round: 0,
            enemy_position: ENEMY_DEFAULT_POSITION,
            mystery_velocity: MYSTERY_DEFAULT_VELOCITY,
            next_id: 1,
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to new-game defaults. Entity ids keep counting so stale ids never repeat.
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = GameSession {
            next_id,
            ..GameSession::default()
        };
    }

    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Consume the rightmost remaining reserve.
    pub fn lose_life(&mut self) -> LifeLoss {
        if self.lives == 0 {
            return LifeLoss::Exhausted;
        }
        self.lives -= 1;
        LifeLoss::SlotConsumed(self.lives)
    }

    /// Deepen the formation start for the next round.
    pub fn advance_round(&mut self) {
        self.round += 1;
        self.enemy_position += ENEMY_MOVE_DOWN;
    }

    pub fn reverse_mystery(&mut self) {
        self.mystery_velocity = -self.mystery_velocity;
    }

    pub fn reset_mystery_direction(&mut self) {
        self.mystery_velocity = MYSTERY_DEFAULT_VELOCITY;
    }

    pub fn double_shot(&self) -> bool {
        self.score >= DOUBLE_SHOT_SCORE
    }
}
