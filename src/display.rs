//! Terminal renderer. All terminal I/O lives here.
//!
//! Receives a mutable writer and the draw commands of one tick. No game logic
//! is performed; the 800×600 logical field is scaled onto the terminal grid
//! and each command becomes a coloured glyph or a line of text.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_invaders::entities::Rect;
use space_invaders::output::{DrawCommand, ExplosionColor, Frame, Sprite, TextColor, Visual};
use space_invaders::tuning::{SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_LIFE: Color = Color::Red;
const C_MYSTERY: Color = Color::Red;
const C_ENEMY_TOP: Color = Color::Magenta;
const C_ENEMY_MID: Color = Color::Cyan;
const C_ENEMY_LOW: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_BLOCKER: Color = Color::Green;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;

    for command in frame.draws.iter().filter(|c| c.visible) {
        draw(out, command, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn draw<W: Write>(out: &mut W, command: &DrawCommand, width: u16, height: u16) -> std::io::Result<()> {
    let (glyph, color, centred) = match &command.visual {
        Visual::Sprite(sprite) => {
            let (glyph, color) = sprite_glyph(*sprite);
            (glyph.to_string(), color, true)
        }
        Visual::Text { content, size, color } => {
            let text = if *size >= 50 {
                content.to_uppercase()
            } else {
                content.clone()
            };
            (text, text_color(*color), false)
        }
    };

    let Some((col, row)) = place(&command.rect, &glyph, centred, width, height) else {
        return Ok(());
    };
    let room = usize::from(width - col);
    let visible: String = glyph.chars().take(room).collect();

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(visible))?;
    Ok(())
}

/// Terminal cell for a logical rect, or `None` when it falls off screen.
fn place(rect: &Rect, glyph: &str, centred: bool, width: u16, height: u16) -> Option<(u16, u16)> {
    let len = glyph.chars().count() as i64;
    let anchor_x = if centred { rect.x + rect.w / 2 } else { rect.x };
    let mut col = i64::from(anchor_x) * i64::from(width) / i64::from(SCREEN_WIDTH);
    if centred {
        col -= len / 2;
    }
    let row = i64::from(rect.y + rect.h / 2) * i64::from(height) / i64::from(SCREEN_HEIGHT);
    if col < 0 || row < 0 || col >= i64::from(width) || row >= i64::from(height) {
        return None;
    }
    Some((col as u16, row as u16))
}

fn sprite_glyph(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::Ship => ("/▲\\", C_PLAYER),
        Sprite::LifeIcon => ("▲", C_LIFE),
        Sprite::Mystery => ("<◎>", C_MYSTERY),
        Sprite::Enemy { row, frame } => {
            let (a, b, color) = match row {
                0 => ("/o\\", "\\o/", C_ENEMY_TOP),
                1 | 2 => ("{@}", "}@{", C_ENEMY_MID),
                _ => ("<#>", ">#<", C_ENEMY_LOW),
            };
            (if frame { b } else { a }, color)
        }
        Sprite::Explosion(color) => (
            "✶",
            match color {
                ExplosionColor::Purple => C_ENEMY_TOP,
                ExplosionColor::Blue => C_ENEMY_MID,
                ExplosionColor::Green => C_ENEMY_LOW,
            },
        ),
        Sprite::Laser => ("║", C_BULLET_PLAYER),
        Sprite::EnemyLaser => ("↓", C_BULLET_ENEMY),
        Sprite::Blocker => ("█", C_BLOCKER),
    }
}

fn text_color(color: TextColor) -> Color {
    match color {
        TextColor::White => Color::White,
        TextColor::Green => Color::Green,
        TextColor::Blue => Color::Cyan,
        TextColor::Purple => Color::Magenta,
        TextColor::Red => Color::Red,
    }
}
