//! The single ordered event queue.
//!
//! Input from the driver, deferred signals from actors and scheduled timer
//! entries all end up here and are consumed once per tick.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Window close / terminal interrupt.
    Quit,
    /// A ship-death transient finished; recreate the player ship.
    SpawnShip,
    EnemyShoot,
    MysterySpawn,
    /// The formation moved; play the next background note.
    FormationStep,
}

impl GameEvent {
    pub fn is_quit(&self) -> bool {
        matches!(self, GameEvent::Quit | GameEvent::KeyUp(Key::Escape))
    }
}

/// Per-tick state of the movement keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Debug)]
struct Scheduled {
    fire_at: u64,
    event: GameEvent,
    repeat: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
    timers: Vec<Scheduled>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Fire `event` once, `delay` ms after `now`. Replaces any timer for the same event.
    pub fn schedule_once(&mut self, event: GameEvent, delay: u64, now: u64) {
        self.cancel(event);
        self.timers.push(Scheduled {
            fire_at: now + delay,
            event,
            repeat: None,
        });
    }

    /// Fire `event` every `period` ms starting `period` ms after `now`.
    pub fn schedule_every(&mut self, event: GameEvent, period: u64, now: u64) {
        self.cancel(event);
        self.timers.push(Scheduled {
            fire_at: now + period,
            event,
            repeat: Some(period),
        });
    }

    pub fn cancel(&mut self, event: GameEvent) {
        self.timers.retain(|t| t.event != event);
    }

    pub fn is_scheduled(&self, event: GameEvent) -> bool {
        self.timers.iter().any(|t| t.event == event)
    }

    /// Move every due timer into the pending queue, ordered by fire time.
    pub fn poll_timers(&mut self, now: u64) {
        let mut due: Vec<(u64, GameEvent)> = Vec::new();
        for timer in &mut self.timers {
            if timer.fire_at <= now {
                due.push((timer.fire_at, timer.event));
                if let Some(period) = timer.repeat {
                    // Missed periods collapse into a single firing.
                    while timer.fire_at <= now {
                        timer.fire_at += period;
                    }
                }
            }
        }
        self.timers.retain(|t| t.repeat.is_some() || t.fire_at > now);
        due.sort_by_key(|(at, _)| *at);
        self.pending.extend(due.into_iter().map(|(_, event)| event));
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    /// Drop pending events and every timer.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.timers.clear();
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
