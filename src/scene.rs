//! Top-level scene state machine.
//!
//! Exactly one scene is active. Transitions are one-way and happen inside
//! `Game::tick`; a quit request is reported as `Control::Quit` from any scene.

use rand::Rng;

use crate::actors::GAME_OVER_TITLE;
use crate::compute::{render_hud, GameScene, PlayOutcome};
use crate::entities::Rect;
use crate::events::{EventQueue, GameEvent, HeldKeys};
use crate::output::{DrawKey, Frame, Sprite, TextColor, Visual};
use crate::session::GameSession;
use crate::tuning::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Playing,
    /// Pause between rounds; `next_round` is 1-based.
    RoundTransition { next_round: u32, entered_at: u64 },
    GameOver { entered_at: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Result of one tick: whether to keep running and what to present.
#[derive(Clone, Debug)]
pub struct Tick {
    pub control: Control,
    pub frame: Frame,
}

pub struct Game {
    scene: Scene,
    play: GameScene,
    events: EventQueue,
}

impl Game {
    pub fn new(now: u64) -> Self {
        Game {
            scene: Scene::Menu,
            play: GameScene::new(now),
            events: EventQueue::new(),
        }
    }

    /// Queue an input or window event for the next tick.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn session(&self) -> &GameSession {
        &self.play.session
    }

    pub fn play(&self) -> &GameScene {
        &self.play
    }

    pub fn play_mut(&mut self) -> &mut GameScene {
        &mut self.play
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    pub fn tick(&mut self, now: u64, held: HeldKeys, rng: &mut impl Rng) -> Tick {
        self.events.poll_timers(now);
        let mut frame = Frame::default();

        let control = match self.scene {
            Scene::Menu => self.tick_menu(now),
            Scene::Playing => self.tick_playing(now, held, rng, &mut frame),
            Scene::RoundTransition { entered_at, .. } => {
                self.tick_dwell(now, entered_at, ROUND_TRANSITION_DWELL, |game, now| {
                    game.play.new_round(&mut game.events, now);
                    game.scene = Scene::Playing;
                })
            }
            Scene::GameOver { entered_at } => {
                self.tick_dwell(now, entered_at, GAME_OVER_DWELL, |game, _| {
                    game.events.clear();
                    game.scene = Scene::Menu;
                })
            }
        };

        if control == Control::Continue {
            self.render(now, &mut frame);
        }
        Tick { control, frame }
    }

    fn tick_menu(&mut self, now: u64) -> Control {
        for event in self.events.drain() {
            if event.is_quit() {
                return Control::Quit;
            }
            if let GameEvent::KeyUp(_) = event {
                self.play.new_game(&mut self.events, now);
                self.scene = Scene::Playing;
                break;
            }
        }
        Control::Continue
    }

    fn tick_playing(
        &mut self,
        now: u64,
        held: HeldKeys,
        rng: &mut impl Rng,
        frame: &mut Frame,
    ) -> Control {
        match self.play.update(now, held, &mut self.events, rng, frame) {
            PlayOutcome::Continue => {}
            PlayOutcome::Quit => return Control::Quit,
            PlayOutcome::RoundCleared => {
                let next_round = self.play.session.round + 2;
                log::info!("round cleared, next round {next_round}");
                self.scene = Scene::RoundTransition {
                    next_round,
                    entered_at: now,
                };
            }
            PlayOutcome::GameOver => {
                self.scene = Scene::GameOver { entered_at: now };
            }
        }
        Control::Continue
    }

    /// Wait out a fixed dwell, swallowing input except quit.
    fn tick_dwell(
        &mut self,
        now: u64,
        entered_at: u64,
        dwell: u64,
        on_finish: impl FnOnce(&mut Game, u64),
    ) -> Control {
        if self.events.drain().iter().any(GameEvent::is_quit) {
            return Control::Quit;
        }
        if now.saturating_sub(entered_at) > dwell {
            on_finish(self, now);
        }
        Control::Continue
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn render(&self, now: u64, frame: &mut Frame) {
        match self.scene {
            Scene::Menu => render_menu(frame),
            Scene::Playing => self.play.render(frame),
            Scene::RoundTransition { .. } => {
                render_hud(&self.play.session, frame);
                banner_text(frame, 0, "Next Round", 50, TextColor::White, 240, 270, true);
            }
            Scene::GameOver { entered_at } => {
                render_hud(&self.play.session, frame);
                let visible = GAME_OVER_TITLE
                    .phase_at(now.saturating_sub(entered_at))
                    .is_visible();
                banner_text(frame, 0, "Game Over", 50, TextColor::White, 250, 270, visible);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn banner_text(
    frame: &mut Frame,
    slot: usize,
    text: &str,
    size: u16,
    color: TextColor,
    x: i32,
    y: i32,
    visible: bool,
) {
    let w = text.chars().count() as i32 * i32::from(size) / 2;
    frame.draw(
        DrawKey::Banner(slot),
        Visual::text(text, size, color),
        Rect::new(x, y, w, i32::from(size)),
        visible,
    );
}

fn render_menu(frame: &mut Frame) {
    banner_text(frame, 0, "Space Invaders", 50, TextColor::White, 164, 155, true);
    banner_text(frame, 1, "Press any key to continue", 25, TextColor::White, 201, 225, true);

    let legend: [(Sprite, Rect, &str, TextColor); 4] = [
        (Sprite::Enemy { row: 3, frame: false }, Rect::new(318, 270, 40, 40), "   =   10 pts", TextColor::Green),
        (Sprite::Enemy { row: 1, frame: false }, Rect::new(318, 320, 40, 40), "   =  20 pts", TextColor::Blue),
        (Sprite::Enemy { row: 0, frame: false }, Rect::new(318, 370, 40, 40), "   =  30 pts", TextColor::Purple),
        (Sprite::Mystery, Rect::new(299, 420, 80, 40), "   =  ?????", TextColor::Red),
    ];
    for (i, (sprite, rect, text, color)) in legend.into_iter().enumerate() {
        let slot = 2 + i * 2;
        frame.sprite(DrawKey::Banner(slot), sprite, rect);
        banner_text(frame, slot + 1, text, 25, color, 368, rect.y, true);
    }
}
