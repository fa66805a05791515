//! Timer-driven actor lifecycles.
//!
//! Moving actors (ship, bullets, mystery) step at most once per
//! `ACTOR_STEP_MS`. Transients derive their phase from the time elapsed since
//! they started, looked up in an ordered table of windows.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{Bullet, BulletOwner, Enemy, EntityId, Mystery, Rect, Ship};
use crate::events::HeldKeys;
use crate::output::{ExplosionColor, Sprite, TextColor, Visual};
use crate::tuning::*;

// ── Timed phases ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Shown,
    Hidden,
    /// Shown with the larger second image.
    Enlarged,
    Done,
}

impl Phase {
    pub fn is_visible(self) -> bool {
        matches!(self, Phase::Shown | Phase::Enlarged)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Inclusive upper bound of the window in elapsed ms.
    pub until: u64,
    pub phase: Phase,
}

/// Ordered phase windows; past the last one the phase is `Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline(pub &'static [Window]);

impl Timeline {
    pub fn phase_at(&self, elapsed: u64) -> Phase {
        self.0
            .iter()
            .find(|w| elapsed <= w.until)
            .map(|w| w.phase)
            .unwrap_or(Phase::Done)
    }

    pub fn duration(&self) -> u64 {
        self.0.last().map(|w| w.until).unwrap_or(0)
    }
}

const fn window(until: u64, phase: Phase) -> Window {
    Window { until, phase }
}

pub const ENEMY_DEATH: Timeline = Timeline(&[
    window(100, Phase::Shown),
    window(400, Phase::Enlarged),
]);

pub const MYSTERY_SCORE: Timeline = Timeline(&[
    window(200, Phase::Shown),
    window(400, Phase::Hidden),
    window(600, Phase::Shown),
]);

pub const SHIP_DEATH: Timeline = Timeline(&[
    window(300, Phase::Hidden),
    window(600, Phase::Shown),
    window(900, Phase::Hidden),
]);

pub const GAME_OVER_TITLE: Timeline = Timeline(&[
    window(750, Phase::Shown),
    window(1500, Phase::Hidden),
    window(2250, Phase::Shown),
    window(GAME_OVER_DWELL, Phase::Hidden),
]);

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    Enemy(ExplosionColor),
    /// Blinking bonus value where the mystery ship was shot.
    MysteryScore(u32),
    /// Blinking wreck; requests a new ship when it finishes.
    Ship,
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub id: EntityId,
    pub kind: ExplosionKind,
    pub rect: Rect,
    pub started_at: u64,
    pub phase: Phase,
}

impl Explosion {
    fn start(id: EntityId, kind: ExplosionKind, rect: Rect, now: u64) -> Self {
        let mut explosion = Explosion {
            id,
            kind,
            rect,
            started_at: now,
            phase: Phase::Shown,
        };
        explosion.phase = explosion.timeline().phase_at(0);
        explosion
    }

    pub fn enemy(id: EntityId, enemy: &Enemy, now: u64) -> Self {
        Self::start(
            id,
            ExplosionKind::Enemy(ExplosionColor::for_row(enemy.row)),
            enemy.rect,
            now,
        )
    }

    pub fn mystery_score(id: EntityId, mystery: &Mystery, now: u64) -> Self {
        let rect = Rect::new(mystery.rect.x + 20, mystery.rect.y + 6, 40, 20);
        Self::start(id, ExplosionKind::MysteryScore(mystery.score), rect, now)
    }

    pub fn ship(id: EntityId, ship: &Ship, now: u64) -> Self {
        Self::start(id, ExplosionKind::Ship, ship.rect, now)
    }

    pub fn timeline(&self) -> Timeline {
        match self.kind {
            ExplosionKind::Enemy(_) => ENEMY_DEATH,
            ExplosionKind::MysteryScore(_) => MYSTERY_SCORE,
            ExplosionKind::Ship => SHIP_DEATH,
        }
    }

    /// Recompute the phase for `now`; `Phase::Done` means remove it.
    pub fn advance(&mut self, now: u64) -> Phase {
        self.phase = self.timeline().phase_at(now.saturating_sub(self.started_at));
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase.is_visible()
    }

    pub fn draw_rect(&self) -> Rect {
        match self.phase {
            Phase::Enlarged => Rect::new(self.rect.x - 6, self.rect.y - 6, 50, 45),
            _ => self.rect,
        }
    }

    pub fn visual(&self) -> Visual {
        match self.kind {
            ExplosionKind::Enemy(color) => Visual::Sprite(Sprite::Explosion(color)),
            ExplosionKind::MysteryScore(score) => {
                Visual::text(score.to_string(), 20, TextColor::White)
            }
            ExplosionKind::Ship => Visual::Sprite(Sprite::Ship),
        }
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

impl Ship {
    pub fn new(id: EntityId, now: u64) -> Self {
        Ship {
            id,
            rect: Rect::new(SHIP_START_X, SHIP_START_Y, SHIP_WIDTH, SHIP_HEIGHT),
            timer: now,
        }
    }

    pub fn advance(&mut self, now: u64, held: HeldKeys) {
        if now.saturating_sub(self.timer) <= ACTOR_STEP_MS {
            return;
        }
        self.timer = now;
        if held.left && self.rect.x > SHIP_MIN_X {
            self.rect.x -= SHIP_SPEED;
        }
        if held.right && self.rect.x < SHIP_MAX_X {
            self.rect.x += SHIP_SPEED;
        }
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

impl Bullet {
    pub fn new(id: EntityId, x: i32, y: i32, owner: BulletOwner, now: u64) -> Self {
        let velocity = match owner {
            BulletOwner::Player => PLAYER_BULLET_VELOCITY,
            BulletOwner::Enemy => ENEMY_BULLET_VELOCITY,
        };
        Bullet {
            id,
            rect: Rect::new(x, y, BULLET_WIDTH, BULLET_HEIGHT),
            velocity,
            owner,
            timer: now,
        }
    }

    /// Step the bullet; returns false once it has left the play bounds.
    pub fn advance(&mut self, now: u64) -> bool {
        if now.saturating_sub(self.timer) > ACTOR_STEP_MS {
            self.timer = now;
            self.rect.y += self.velocity;
        }
        self.in_bounds()
    }

    pub fn in_bounds(&self) -> bool {
        (BULLET_MIN_Y..=BULLET_MAX_Y).contains(&self.rect.y)
    }

    pub fn sprite(&self) -> Sprite {
        match self.owner {
            BulletOwner::Player => Sprite::Laser,
            BulletOwner::Enemy => Sprite::EnemyLaser,
        }
    }
}

// ── Mystery ship ──────────────────────────────────────────────────────────────

impl Mystery {
    /// Enter from the side opposite to the direction of travel.
    pub fn spawn(id: EntityId, velocity: i32, rng: &mut impl Rng, now: u64) -> Self {
        let x = if velocity > 0 {
            MYSTERY_LEFT_EDGE
        } else {
            MYSTERY_RIGHT_EDGE
        };
        let score = *MYSTERY_REWARDS
            .choose(rng)
            .unwrap_or(&MYSTERY_REWARDS[0]);
        Mystery {
            id,
            rect: Rect::new(x, MYSTERY_Y, MYSTERY_WIDTH, MYSTERY_HEIGHT),
            score,
            velocity,
            timer: now,
        }
    }

    /// Step the mystery; returns false once it has left the screen.
    pub fn advance(&mut self, now: u64) -> bool {
        if now.saturating_sub(self.timer) > ACTOR_STEP_MS {
            self.timer = now;
            self.rect.x += self.velocity;
            if self.rect.x < MYSTERY_LEFT_EDGE || self.rect.x > MYSTERY_RIGHT_EDGE {
                return false;
            }
        }
        true
    }
}
