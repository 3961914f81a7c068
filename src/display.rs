/// Terminal rendering.  Every function takes a writer and a read-only
/// `FrameResult`; no game logic here, only the translation from arena
/// coordinates to cells and queued draw commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use skyraid::entities::{AbilityKind, FieldKind, SessionStatus, SparkKind};
use skyraid::session::{EntityView, FrameResult, ViewKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Red;
const C_HUD_CHARGE: Color = Color::Cyan;
const C_HUD_JEWEL: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_PLAYER_INVULN: Color = Color::Yellow;
const C_HOSTILE: [Color; 3] = [Color::Green, Color::Red, Color::Magenta];
const C_BOLT: Color = Color::Cyan;
const C_ORDNANCE: Color = Color::Red;
const C_ORDNANCE_INERT: Color = Color::DarkGrey;
const C_JEWEL: Color = Color::Magenta;
const C_CHARGE_ITEM: Color = Color::Cyan;
const C_OBSTACLE: Color = Color::DarkYellow;
const C_BARRIER: Color = Color::Blue;
const C_SPARK: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Terminal geometry for one frame: arena→cell scaling plus the playfield
/// inset (row 0 = HUD, row 1 / last-2 = border, last row = key hints).
struct Viewport {
    term_w: u16,
    term_h: u16,
    arena_w: f32,
    arena_h: f32,
}

impl Viewport {
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cols = self.term_w.saturating_sub(2).max(1) as f32;
        let rows = self.term_h.saturating_sub(4).max(1) as f32;
        let cx = 1.0 + (x / self.arena_w).clamp(0.0, 1.0) * (cols - 1.0);
        let cy = 2.0 + (y / self.arena_h).clamp(0.0, 1.0) * (rows - 1.0);
        (cx as u16, cy as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    frame: &FrameResult,
    arena: (f32, f32),
) -> std::io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let view = Viewport {
        term_w,
        term_h,
        arena_w: arena.0,
        arena_h: arena.1,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, &view, frame)?;

    for entity in &frame.entities {
        draw_entity(out, &view, entity)?;
    }

    draw_controls_hint(out, &view, frame)?;

    match frame.status {
        SessionStatus::Victory => draw_overlay(out, &view, "GAME CLEAR", Color::Green)?,
        SessionStatus::Defeat => draw_overlay(out, &view, "GAME OVER", Color::Red)?,
        SessionStatus::Running => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.term_w as usize;
    let h = view.term_h;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.term_w.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, frame: &FrameResult) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", frame.score)))?;

    // HP — next to score
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!("  HP:{:>3}/{}", frame.hp, frame.max_hp)))?;

    // Charge bar — centre.  Ten segments, filled proportionally.
    let filled = if frame.charge_max == 0 {
        0
    } else {
        (frame.charge * 10 / frame.charge_max) as usize
    };
    let bar = format!("chg[{}{}]", "█".repeat(filled), "·".repeat(10 - filled));
    let cx = (view.term_w / 2).saturating_sub(bar.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_CHARGE))?;
    out.queue(Print(&bar))?;

    // Jewel count — right
    let jewel_str = format!("jewel:{}/{}", frame.jewels, frame.jewels_to_clear);
    let rx = view
        .term_w
        .saturating_sub(jewel_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_JEWEL))?;
    out.queue(Print(&jewel_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, view: &Viewport, entity: &EntityView) -> std::io::Result<()> {
    let (cx, cy) = view.cell(entity.rect.center.x, entity.rect.center.y);
    match entity.kind {
        ViewKind::Player { invulnerable } => {
            let color = if invulnerable { C_PLAYER_INVULN } else { C_PLAYER };
            out.queue(style::SetForegroundColor(color))?;
            out.queue(cursor::MoveTo(cx.saturating_sub(1).max(1), cy))?;
            out.queue(Print("<@>"))?;
        }
        ViewKind::Hostile { holding } => {
            let color = C_HOSTILE[entity.variant as usize % C_HOSTILE.len()];
            out.queue(style::SetForegroundColor(color))?;
            out.queue(cursor::MoveTo(cx.saturating_sub(1).max(1), cy))?;
            out.queue(Print(if holding { "«▼»" } else { "«v»" }))?;
        }
        ViewKind::Projectile { homing } => {
            out.queue(style::SetForegroundColor(C_BOLT))?;
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(Print(if homing { "¤" } else { "•" }))?;
        }
        ViewKind::Ordnance { inert } => {
            let color = if inert { C_ORDNANCE_INERT } else { C_ORDNANCE };
            out.queue(style::SetForegroundColor(color))?;
            out.queue(cursor::MoveTo(cx, cy))?;
            // Bigger shells get a wider glyph
            out.queue(Print(if entity.rect.w >= 60.0 { "O" } else { "o" }))?;
        }
        ViewKind::Jewel => {
            out.queue(style::SetForegroundColor(C_JEWEL))?;
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(Print("◆"))?;
        }
        ViewKind::Charge(ability) => {
            out.queue(style::SetForegroundColor(C_CHARGE_ITEM))?;
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(Print(ability_glyph(ability)))?;
        }
        ViewKind::Obstacle => {
            out.queue(style::SetForegroundColor(C_OBSTACLE))?;
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(Print("█"))?;
        }
        ViewKind::Field(FieldKind::Barrier) => {
            out.queue(style::SetForegroundColor(C_BARRIER))?;
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(Print(if entity.rect.h >= entity.rect.w { "▌" } else { "▬" }))?;
        }
        // Arena-wide fields get a HUD tag rather than flooding the playfield.
        ViewKind::Field(FieldKind::Area) => {
            out.queue(style::SetForegroundColor(Color::DarkMagenta))?;
            out.queue(cursor::MoveTo(1, 1))?;
            out.queue(Print("≈GRAV≈"))?;
        }
        ViewKind::Field(FieldKind::Pulse) => {
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(cursor::MoveTo(1, 1))?;
            out.queue(Print("~EMP~"))?;
        }
        ViewKind::Spark(kind) => {
            out.queue(style::SetForegroundColor(C_SPARK))?;
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(Print(match kind {
                SparkKind::Burst => "✶",
                SparkKind::Glitter => "✧",
            }))?;
        }
    }
    Ok(())
}

fn ability_glyph(ability: AbilityKind) -> &'static str {
    match ability {
        AbilityKind::AreaField => "G",
        AbilityKind::Barrier => "S",
        AbilityKind::DisablePulse => "E",
        AbilityKind::Overcharge => "H",
        AbilityKind::HomingShot => "F",
    }
}

// ── Bottom hint row ───────────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    view: &Viewport,
    frame: &FrameResult,
) -> std::io::Result<()> {
    let inv = frame.inventory;
    let hint = format!(
        "arrows/WAD move  SPACE charge+fire  G:{} S:{} E:{} H:{} F:{}  Q quit",
        inv[AbilityKind::AreaField.index()],
        inv[AbilityKind::Barrier.index()],
        inv[AbilityKind::DisablePulse.index()],
        inv[AbilityKind::Overcharge.index()],
        inv[AbilityKind::HomingShot.index()],
    );
    out.queue(cursor::MoveTo(1, view.term_h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&hint))?;
    Ok(())
}

// ── Terminal overlays ─────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    view: &Viewport,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let cx = (view.term_w / 2).saturating_sub(title.chars().count() as u16 / 2);
    let cy = view.term_h / 2;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(title))?;

    let hint = "R restart   Q quit";
    let hx = (view.term_w / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(hx, cy + 2))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
