//! Round controller for the Playing scene.
//!
//! `GameScene::update` runs one tick in the load-bearing order: round-clear
//! check, formation move, queued events, combat, then per-actor timers.
//! Randomness comes through the injected RNG.

use rand::Rng;

use crate::actors::{Explosion, ExplosionKind, Phase};
use crate::combat::{Combat, CombatOutcome};
use crate::entities::{Blocker, Bullet, BulletOwner, Mystery, Rect, Ship};
use crate::events::{EventQueue, GameEvent, HeldKeys, Key};
use crate::formation::Formation;
use crate::output::{DrawKey, Frame, HudItem, Sound, Sprite, TextColor, Visual};
use crate::session::GameSession;
use crate::tuning::*;

// ── World state ───────────────────────────────────────────────────────────────

/// Every actor of the Playing scene.
#[derive(Clone, Debug)]
pub struct Playfield {
    pub formation: Formation,
    /// `None` while the ship is exploding or waiting to respawn.
    pub ship: Option<Ship>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub mystery: Option<Mystery>,
    pub explosions: Vec<Explosion>,
    pub blockers: Vec<Blocker>,
}

impl Playfield {
    pub fn new(now: u64) -> Self {
        Playfield {
            formation: Formation::empty(ENEMY_ROWS, ENEMY_COLUMNS, now),
            ship: None,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            mystery: None,
            explosions: Vec::new(),
            blockers: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Continue,
    RoundCleared,
    GameOver,
    Quit,
}

// ── Controller ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameScene {
    pub session: GameSession,
    pub field: Playfield,
    /// Next note of the formation cadence.
    note: u8,
}

impl GameScene {
    pub fn new(now: u64) -> Self {
        GameScene {
            session: GameSession::new(),
            field: Playfield::new(now),
            note: 0,
        }
    }

    /// Fresh session, fresh walls, first round.
    pub fn new_game(&mut self, events: &mut EventQueue, now: u64) {
        self.session.reset();
        self.field.blockers = crate::entities::make_blockers();
        self.reset(events, now);
        log::info!("new game started");
    }

    /// Next round one step deeper; walls keep their damage.
    pub fn new_round(&mut self, events: &mut EventQueue, now: u64) {
        self.session.advance_round();
        self.reset(events, now);
        log::info!(
            "round {} started at depth {}",
            self.session.round + 1,
            self.session.enemy_position
        );
    }

    fn reset(&mut self, events: &mut EventQueue, now: u64) {
        let field = &mut self.field;
        field.player_bullets.clear();
        field.enemy_bullets.clear();
        field.explosions.clear();
        field.mystery = None;
        field.ship = Some(Ship::new(self.session.next_entity_id(), now));
        field.formation = Formation::new(
            ENEMY_ROWS,
            ENEMY_COLUMNS,
            self.session.enemy_position,
            now,
        );
        self.note = 0;
        events.clear();
        events.schedule_every(GameEvent::EnemyShoot, ENEMY_SHOOT_INTERVAL, now);
        events.schedule_once(GameEvent::MysterySpawn, MYSTERY_COOLDOWN, now);
    }

    /// True when nothing is left that could still affect the round.
    pub fn is_round_clear(&self) -> bool {
        self.field.formation.is_empty()
            && self.field.enemy_bullets.is_empty()
            && self.field.mystery.is_none()
            && self.field.explosions.is_empty()
    }

    /// Advance the Playing scene by one tick.
    pub fn update(
        &mut self,
        now: u64,
        held: HeldKeys,
        events: &mut EventQueue,
        rng: &mut impl Rng,
        frame: &mut Frame,
    ) -> PlayOutcome {
        if self.is_round_clear() {
            return PlayOutcome::RoundCleared;
        }

        if self.field.formation.advance(now).is_some() {
            events.push(GameEvent::FormationStep);
        }

        if self.check_input(events, now, rng, frame) {
            return PlayOutcome::Quit;
        }

        let outcome = Combat {
            field: &mut self.field,
            session: &mut self.session,
            events: &mut *events,
            frame: &mut *frame,
            now,
        }
        .resolve();

        self.advance_actors(now, held, events);

        match outcome {
            CombatOutcome::GameOver => {
                log::info!("game over with score {}", self.session.score);
                PlayOutcome::GameOver
            }
            CombatOutcome::Continue => PlayOutcome::Continue,
        }
    }

    // ── Events ────────────────────────────────────────────────────────────────

    /// Consume the queue; returns true on a quit request.
    fn check_input(
        &mut self,
        events: &mut EventQueue,
        now: u64,
        rng: &mut impl Rng,
        frame: &mut Frame,
    ) -> bool {
        for event in events.drain() {
            if event.is_quit() {
                return true;
            }
            match event {
                GameEvent::KeyDown(Key::Fire) => self.fire(now, frame),
                GameEvent::SpawnShip => {
                    if self.field.ship.is_none() {
                        self.field.ship = Some(Ship::new(self.session.next_entity_id(), now));
                    }
                }
                GameEvent::EnemyShoot => self.enemy_shoot(now, rng),
                GameEvent::FormationStep => {
                    frame.play(Sound::FormationNote(self.note));
                    self.note = (self.note + 1) % FORMATION_NOTES;
                }
                GameEvent::MysterySpawn => {
                    if self.field.mystery.is_none() {
                        let id = self.session.next_entity_id();
                        let mystery =
                            Mystery::spawn(id, self.session.mystery_velocity, rng, now);
                        log::debug!("mystery ship entered worth {}", mystery.score);
                        self.field.mystery = Some(mystery);
                        frame.play(Sound::MysteryEntered);
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// Shoot if no player bullet is live and the ship exists; otherwise ignore.
    pub fn fire(&mut self, now: u64, frame: &mut Frame) {
        if !self.field.player_bullets.is_empty() {
            return;
        }
        let Some(ship) = &self.field.ship else {
            return;
        };
        let (x, y) = (ship.rect.x, ship.rect.y + 5);
        if self.session.double_shot() {
            for dx in [8, 38] {
                let id = self.session.next_entity_id();
                self.field
                    .player_bullets
                    .push(Bullet::new(id, x + dx, y, BulletOwner::Player, now));
            }
            frame.play(Sound::ShootDouble);
        } else {
            let id = self.session.next_entity_id();
            self.field
                .player_bullets
                .push(Bullet::new(id, x + 23, y, BulletOwner::Player, now));
            frame.play(Sound::Shoot);
        }
    }

    fn enemy_shoot(&mut self, now: u64, rng: &mut impl Rng) {
        let Some(shooter) = self.field.formation.random_bottom_alive(rng) else {
            return;
        };
        let (x, y) = (shooter.rect.x + 14, shooter.rect.y + 20);
        let id = self.session.next_entity_id();
        self.field
            .enemy_bullets
            .push(Bullet::new(id, x, y, BulletOwner::Enemy, now));
    }

    // ── Actor timers ──────────────────────────────────────────────────────────

    fn advance_actors(&mut self, now: u64, held: HeldKeys, events: &mut EventQueue) {
        let field = &mut self.field;

        if let Some(ship) = field.ship.as_mut() {
            ship.advance(now, held);
        }
        field.player_bullets.retain_mut(|b| b.advance(now));
        field.enemy_bullets.retain_mut(|b| b.advance(now));

        let mystery_left = field.mystery.as_mut().is_some_and(|m| !m.advance(now));
        if mystery_left {
            field.mystery = None;
            self.session.reverse_mystery();
            events.schedule_once(GameEvent::MysterySpawn, MYSTERY_COOLDOWN, now);
        }

        field.explosions.retain_mut(|explosion| {
            if explosion.advance(now) != Phase::Done {
                return true;
            }
            if explosion.kind == ExplosionKind::Ship {
                events.push(GameEvent::SpawnShip);
            }
            false
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let field = &self.field;

        for cell in &field.blockers {
            frame.sprite(DrawKey::Blocker(cell.cell), Sprite::Blocker, cell.rect);
        }
        for enemy in field.formation.iter() {
            frame.sprite(
                DrawKey::Enemy {
                    row: enemy.row,
                    column: enemy.column,
                },
                Sprite::Enemy {
                    row: enemy.row,
                    frame: enemy.frame,
                },
                enemy.rect,
            );
        }
        if let Some(mystery) = &field.mystery {
            frame.sprite(DrawKey::Actor(mystery.id), Sprite::Mystery, mystery.rect);
        }
        for bullet in field.player_bullets.iter().chain(&field.enemy_bullets) {
            frame.sprite(DrawKey::Actor(bullet.id), bullet.sprite(), bullet.rect);
        }
        if let Some(ship) = &field.ship {
            frame.sprite(DrawKey::Actor(ship.id), Sprite::Ship, ship.rect);
        }
        for explosion in &field.explosions {
            frame.draw(
                DrawKey::Actor(explosion.id),
                explosion.visual(),
                explosion.draw_rect(),
                explosion.is_visible(),
            );
        }

        render_hud(&self.session, frame);
    }
}

/// Score and the three life slots, shown outside the menu.
pub fn render_hud(session: &GameSession, frame: &mut Frame) {
    frame.draw(
        DrawKey::Hud(HudItem::ScoreLabel),
        Visual::text("Score", 20, TextColor::White),
        Rect::new(5, 5, 60, 20),
        true,
    );
    frame.draw(
        DrawKey::Hud(HudItem::ScoreValue),
        Visual::text(session.score.to_string(), 20, TextColor::Green),
        Rect::new(85, 5, 80, 20),
        true,
    );
    frame.draw(
        DrawKey::Hud(HudItem::LivesLabel),
        Visual::text("Lives ", 20, TextColor::White),
        Rect::new(640, 5, 70, 20),
        true,
    );
    for slot in 0..STARTING_LIVES {
        frame.draw(
            DrawKey::Hud(HudItem::LifeSlot(slot)),
            Visual::Sprite(Sprite::LifeIcon),
            Rect::new(715 + i32::from(slot) * 27, 3, 23, 23),
            slot < session.lives,
        );
    }
}
