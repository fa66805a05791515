mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_invaders::{config, AudioCue, Control, Game, GameEvent, HeldKeys, Key};

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Movement keys count as held for this long after their last press or
/// repeat. Must exceed the OS key-repeat period.
const HOLD_WINDOW_MS: u64 = 140;

/// Any of `keys` seen within `HOLD_WINDOW_MS`.
fn is_held(key_seen: &HashMap<KeyCode, u64>, keys: &[KeyCode], now: u64) -> bool {
    keys.iter().any(|key| {
        key_seen
            .get(key)
            .map(|&last| now.saturating_sub(last) <= HOLD_WINDOW_MS)
            .unwrap_or(false)
    })
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

fn game_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Route `log` output to a file; stderr would tear the alternate screen.
fn init_logging() -> std::io::Result<()> {
    let Some(path) = config::log_file() else {
        return Ok(());
    };
    let file = File::create(&path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("logging to {}", path.display());
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Presses and releases are queued as `GameEvent`s; `key_seen` feeds the
/// per-tick `HeldKeys`.
///
/// Terminals with keyboard enhancement report real releases. Elsewhere a
/// key-up is queued right after each press and held keys time out.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let frame_interval = config::frame_interval();
    let start = Instant::now();
    let mut rng = thread_rng();
    let mut game = Game::new(0);
    let mut key_seen: HashMap<KeyCode, u64> = HashMap::new();

    loop {
        let frame_start = Instant::now();
        let now = start.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            let quit_chord = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q'))
                || (matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL));
            match kind {
                KeyEventKind::Press if quit_chord => game.push_event(GameEvent::Quit),
                KeyEventKind::Press => {
                    key_seen.insert(code, now);
                    game.push_event(GameEvent::KeyDown(game_key(code)));
                    if !keyboard_enhanced {
                        game.push_event(GameEvent::KeyUp(game_key(code)));
                    }
                }
                KeyEventKind::Repeat => {
                    key_seen.insert(code, now);
                }
                KeyEventKind::Release => {
                    key_seen.remove(&code);
                    game.push_event(GameEvent::KeyUp(game_key(code)));
                }
            }
        }

        let held = HeldKeys {
            left: is_held(&key_seen, &LEFT_KEYS, now),
            right: is_held(&key_seen, &RIGHT_KEYS, now),
        };

        let tick = game.tick(now, held, &mut rng);
        if tick.control == Control::Quit {
            log::info!("quit requested");
            return Ok(());
        }

        for cue in &tick.frame.audio {
            match cue {
                AudioCue::Play(sound) => log::debug!("play {sound:?}"),
                AudioCue::Stop(sound) => log::debug!("stop {sound:?}"),
            }
        }

        display::render(out, &tick.frame)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Blocking reads stay off the game loop
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
