//! Effects the core hands to its collaborators each tick.
//!
//! The renderer receives draw commands, the audio backend receives cues.
//! Neither is interpreted here.

use crate::entities::{EntityId, Rect};

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Stable identity of something on screen across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawKey {
    Actor(EntityId),
    Enemy { row: usize, column: usize },
    Blocker(usize),
    Hud(HudItem),
    /// Fixed text/images of the menu, round and game-over screens.
    Banner(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HudItem {
    ScoreLabel,
    ScoreValue,
    LivesLabel,
    LifeSlot(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionColor {
    Purple,
    Blue,
    Green,
}

impl ExplosionColor {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => ExplosionColor::Purple,
            1 | 2 => ExplosionColor::Blue,
            _ => ExplosionColor::Green,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    LifeIcon,
    Mystery,
    /// Enemy image by grid row and animation frame.
    Enemy { row: usize, frame: bool },
    Explosion(ExplosionColor),
    Laser,
    EnemyLaser,
    Blocker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextColor {
    White,
    Green,
    Blue,
    Purple,
    Red,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visual {
    Sprite(Sprite),
    Text {
        content: String,
        size: u16,
        color: TextColor,
    },
}

impl Visual {
    pub fn text(content: impl Into<String>, size: u16, color: TextColor) -> Self {
        Visual::Text {
            content: content.into(),
            size,
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    pub key: DrawKey,
    pub visual: Visual,
    pub rect: Rect,
    pub visible: bool,
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    ShootDouble,
    EnemyKilled,
    MysteryKilled,
    ShipExploded,
    /// One of the four notes of the formation cadence.
    FormationNote(u8),
    MysteryEntered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Play(Sound),
    Stop(Sound),
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Everything one tick asks the collaborators to do.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub draws: Vec<DrawCommand>,
    pub audio: Vec<AudioCue>,
}

impl Frame {
    pub fn draw(&mut self, key: DrawKey, visual: Visual, rect: Rect, visible: bool) {
        self.draws.push(DrawCommand {
            key,
            visual,
            rect,
            visible,
        });
    }

    pub fn sprite(&mut self, key: DrawKey, sprite: Sprite, rect: Rect) {
        self.draw(key, Visual::Sprite(sprite), rect, true);
    }

    pub fn play(&mut self, sound: Sound) {
        self.audio.push(AudioCue::Play(sound));
    }

    pub fn stop(&mut self, sound: Sound) {
        self.audio.push(AudioCue::Stop(sound));
    }

    pub fn played(&self, sound: Sound) -> bool {
        self.audio.contains(&AudioCue::Play(sound))
    }
}
