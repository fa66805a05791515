//! Per-tick collision resolution.
//!
//! Rules run in a fixed order and every bullet is removed on its first
//! match, so one bullet can satisfy at most one rule per tick.

use crate::actors::Explosion;
use crate::compute::Playfield;
use crate::entities::{Blocker, Bullet, Rect};
use crate::events::{EventQueue, GameEvent};
use crate::output::{Frame, Sound};
use crate::session::{GameSession, LifeLoss};
use crate::tuning::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    Continue,
    GameOver,
}

/// Mutable view of everything combat may touch in one tick.
pub struct Combat<'a> {
    pub field: &'a mut Playfield,
    pub session: &'a mut GameSession,
    pub events: &'a mut EventQueue,
    pub frame: &'a mut Frame,
    pub now: u64,
}

impl Combat<'_> {
    pub fn resolve(mut self) -> CombatOutcome {
        let mut outcome = CombatOutcome::Continue;

        self.bullets_vs_bullets();
        self.bullets_vs_enemies();
        self.bullets_vs_mystery();
        if self.enemy_fire_vs_ship() == CombatOutcome::GameOver {
            outcome = CombatOutcome::GameOver;
        }
        if self.invasion() == CombatOutcome::GameOver {
            outcome = CombatOutcome::GameOver;
        }

        bullets_vs_blockers(&mut self.field.player_bullets, &mut self.field.blockers);
        bullets_vs_blockers(&mut self.field.enemy_bullets, &mut self.field.blockers);
        if self.field.formation.is_invading(BLOCKERS_POSITION) {
            let formation = &self.field.formation;
            self.field
                .blockers
                .retain(|cell| !formation.iter().any(|e| e.rect.collides(&cell.rect)));
        }

        outcome
    }

    // ── 1. Shots cancel each other ───────────────────────────────────────────

    fn bullets_vs_bullets(&mut self) {
        let field = &mut *self.field;
        let mut player_hit = vec![false; field.player_bullets.len()];
        let mut enemy_hit = vec![false; field.enemy_bullets.len()];
        for (i, shot) in field.player_bullets.iter().enumerate() {
            for (j, other) in field.enemy_bullets.iter().enumerate() {
                if shot.rect.collides(&other.rect) {
                    player_hit[i] = true;
                    enemy_hit[j] = true;
                }
            }
        }
        drop_marked(&mut field.player_bullets, &player_hit);
        drop_marked(&mut field.enemy_bullets, &enemy_hit);
    }

    // ── 2. Player shots × formation ──────────────────────────────────────────

    fn bullets_vs_enemies(&mut self) {
        let field = &mut *self.field;
        let mut used = vec![false; field.player_bullets.len()];
        let mut killed = Vec::new();
        for enemy in field.formation.iter() {
            let mut hit = false;
            for (i, shot) in field.player_bullets.iter().enumerate() {
                if !used[i] && shot.rect.collides(&enemy.rect) {
                    used[i] = true;
                    hit = true;
                }
            }
            if hit {
                killed.push((enemy.row, enemy.column));
            }
        }
        drop_marked(&mut field.player_bullets, &used);

        for (row, column) in killed {
            match field.formation.remove(row, column) {
                Ok(enemy) => {
                    self.session.award(enemy.score);
                    self.frame.play(Sound::EnemyKilled);
                    let id = self.session.next_entity_id();
                    field.explosions.push(Explosion::enemy(id, &enemy, self.now));
                }
                Err(err) => log::warn!("kill rejected: {err}"),
            }
        }
    }

    // ── 3. Player shots × mystery ship ───────────────────────────────────────

    fn bullets_vs_mystery(&mut self) {
        let Some(mystery) = self.field.mystery.take() else {
            return;
        };
        let used = mark_hits(&self.field.player_bullets, &mystery.rect);
        if !used.contains(&true) {
            self.field.mystery = Some(mystery);
            return;
        }
        drop_marked(&mut self.field.player_bullets, &used);

        self.session.award(mystery.score);
        self.frame.stop(Sound::MysteryEntered);
        self.frame.play(Sound::MysteryKilled);
        let id = self.session.next_entity_id();
        self.field
            .explosions
            .push(Explosion::mystery_score(id, &mystery, self.now));
        self.session.reset_mystery_direction();
        self.events
            .schedule_once(GameEvent::MysterySpawn, MYSTERY_COOLDOWN, self.now);
        log::debug!("mystery ship shot for {} points", mystery.score);
    }

    // ── 4. Enemy shots × player ship ─────────────────────────────────────────

    fn enemy_fire_vs_ship(&mut self) -> CombatOutcome {
        let Some(ship) = self.field.ship.take() else {
            return CombatOutcome::Continue;
        };
        let used = mark_hits(&self.field.enemy_bullets, &ship.rect);
        if !used.contains(&true) {
            self.field.ship = Some(ship);
            return CombatOutcome::Continue;
        }
        drop_marked(&mut self.field.enemy_bullets, &used);
        self.frame.play(Sound::ShipExploded);

        match self.session.lose_life() {
            LifeLoss::SlotConsumed(slot) => {
                log::debug!("ship destroyed, life slot {slot} consumed");
                let id = self.session.next_entity_id();
                self.field
                    .explosions
                    .push(Explosion::ship(id, &ship, self.now));
                CombatOutcome::Continue
            }
            LifeLoss::Exhausted => {
                log::debug!("ship destroyed with no reserves left");
                CombatOutcome::GameOver
            }
        }
    }

    // ── 5. Formation reaches the player's row ────────────────────────────────

    fn invasion(&mut self) -> CombatOutcome {
        let field = &mut *self.field;
        if !field.formation.is_invading(PLAYER_CONTACT_Y) {
            return CombatOutcome::Continue;
        }

        if let Some(ship) = field.ship.take() {
            let touching: Vec<(usize, usize)> = field
                .formation
                .iter()
                .filter(|e| e.rect.collides(&ship.rect))
                .map(|e| (e.row, e.column))
                .collect();
            if touching.is_empty() {
                field.ship = Some(ship);
            }
            for (row, column) in touching {
                if let Err(err) = field.formation.remove(row, column) {
                    log::warn!("contact removal rejected: {err}");
                }
            }
        }

        if field.ship.is_none() || field.formation.is_invading(INVASION_FLOOR_Y) {
            log::debug!("formation invaded at y={}", field.formation.bottom());
            CombatOutcome::GameOver
        } else {
            CombatOutcome::Continue
        }
    }
}

// ── 6. Shots × walls ──────────────────────────────────────────────────────────

/// Each bullet that overlaps wall cells is removed together with every cell it overlaps.
pub fn bullets_vs_blockers(bullets: &mut Vec<Bullet>, blockers: &mut Vec<Blocker>) {
    bullets.retain(|shot| {
        let before = blockers.len();
        blockers.retain(|cell| !cell.rect.collides(&shot.rect));
        blockers.len() == before
    });
}

fn mark_hits(bullets: &[Bullet], target: &Rect) -> Vec<bool> {
    bullets.iter().map(|b| b.rect.collides(target)).collect()
}

fn drop_marked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marked[idx];
        idx += 1;
        keep
    });
}
