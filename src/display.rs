//! Rendering layer — all terminal I/O lives here.
//!
//! The core draws in canvas pixels; `TerminalRenderer` scales that canvas
//! into the terminal grid below a three-row HUD.  No game logic is
//! performed; this module only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use plane_game::effects::{Cue, EffectSink};
use plane_game::entities::Rect;
use plane_game::render::{Colour, Renderer, SpriteKind};
use plane_game::GameConfig;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_INSTRUCTIONS: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_OBSTACLE: Color = Color::Red;
const C_GAME_OVER: Color = Color::Red;

/// Rows above the play area: score line, instructions, gameplay hint.
const HUD_ROWS: u16 = 3;

// ── HUD text ─────────────────────────────────────────────────────────────────

/// Text panel fed by the core's effects.
#[derive(Debug, Default)]
pub struct Hud {
    pub score: String,
    pub high_score: String,
    pub instructions: String,
    pub hint: String,
    /// Set by an audible cue; consumed by the next `draw_hud`.
    bell: bool,
}

impl EffectSink for Hud {
    /// Hits and game over ring the terminal bell; shots stay silent so
    /// sustained fire doesn't drown out the other two.
    fn play(&mut self, cue: Cue) {
        log::trace!("cue {:?}", cue);
        if matches!(cue, Cue::Hit | Cue::GameOver) {
            self.bell = true;
        }
    }

    fn set_score_text(&mut self, text: &str) {
        self.score = text.to_string();
    }

    fn set_high_score_text(&mut self, text: &str) {
        self.high_score = text.to_string();
    }

    fn set_instructions(&mut self, text: &str) {
        self.instructions = text.to_string();
    }

    fn set_gameplay_hint(&mut self, text: &str) {
        self.hint = text.to_string();
    }
}

// ── Canvas → cell mapping ─────────────────────────────────────────────────────

/// Cell range `[col0, col1) × [row0, row1)` covered by a canvas rectangle.
struct CellBox {
    col0: u16,
    col1: u16,
    row0: u16,
    row1: u16,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas_width: f32,
    canvas_height: f32,
    /// Inner play area (inside the border), in cells.
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, config: &GameConfig, term_width: u16, term_height: u16) -> Self {
        let mut renderer = TerminalRenderer {
            out,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            left: 0,
            top: 0,
            cols: 0,
            rows: 0,
        };
        renderer.resize(term_width, term_height);
        renderer
    }

    /// Fit the canvas into the terminal, keeping its aspect ratio with
    /// cells roughly twice as tall as wide.
    pub fn resize(&mut self, term_width: u16, term_height: u16) {
        let rows = term_height.saturating_sub(HUD_ROWS + 2);
        let ideal_cols = (rows as f32 * 2.0 * self.canvas_width / self.canvas_height) as u16;
        let cols = ideal_cols.min(term_width.saturating_sub(2)).max(1);
        self.rows = rows.max(1);
        self.cols = cols;
        self.left = (term_width.saturating_sub(cols + 2)) / 2 + 1;
        self.top = HUD_ROWS + 1;
    }

    fn cells(&self, rect: &Rect) -> CellBox {
        let sx = self.cols as f32 / self.canvas_width;
        let sy = self.rows as f32 / self.canvas_height;
        let clamp_col = |v: f32| (v.max(0.0) as u16).min(self.cols);
        let clamp_row = |v: f32| (v.max(0.0) as u16).min(self.rows);

        let col0 = clamp_col((rect.x * sx).floor());
        let row0 = clamp_row((rect.y * sy).floor());
        let col1 = clamp_col(((rect.x + rect.width) * sx).ceil()).max(col0 + 1).min(self.cols);
        let row1 = clamp_row(((rect.y + rect.height) * sy).ceil()).max(row0 + 1).min(self.rows);
        CellBox {
            col0,
            col1,
            row0,
            row1,
        }
    }

    fn fill(&mut self, rect: &Rect, glyph: char, colour: Color) -> std::io::Result<()> {
        let cells = self.cells(rect);
        if cells.col0 >= cells.col1 || cells.row0 >= cells.row1 {
            return Ok(());
        }
        let run: String = std::iter::repeat(glyph)
            .take((cells.col1 - cells.col0) as usize)
            .collect();
        self.out.queue(style::SetForegroundColor(colour))?;
        for row in cells.row0..cells.row1 {
            self.out
                .queue(cursor::MoveTo(self.left + cells.col0, self.top + row))?;
            self.out.queue(Print(&run))?;
        }
        Ok(())
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.cols as usize;
        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        self.out.queue(cursor::MoveTo(self.left - 1, self.top - 1))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

        self.out
            .queue(cursor::MoveTo(self.left - 1, self.top + self.rows))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(self.left - 1, self.top + row))?;
            self.out.queue(Print("│"))?;
            self.out
                .queue(cursor::MoveTo(self.left + self.cols, self.top + row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    /// Redraw the three HUD rows and ring the bell if a cue asked for it.
    pub fn draw_hud(&mut self, hud: &mut Hud) -> std::io::Result<()> {
        for row in 0..HUD_ROWS {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out
                .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        }

        self.out.queue(cursor::MoveTo(self.left, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(&hud.score))?;
        let hx = (self.left + self.cols).saturating_sub(hud.high_score.chars().count() as u16);
        self.out.queue(cursor::MoveTo(hx, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
        self.out.queue(Print(&hud.high_score))?;

        self.out.queue(cursor::MoveTo(self.left, 1))?;
        self.out.queue(style::SetForegroundColor(C_INSTRUCTIONS))?;
        self.out.queue(Print(&hud.instructions))?;

        self.out.queue(cursor::MoveTo(self.left, 2))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(&hud.hint))?;

        if std::mem::take(&mut hud.bell) {
            self.out.queue(Print('\x07'))?;
        }
        Ok(())
    }

    /// Reset colours, park the cursor and push the frame to the terminal.
    pub fn present(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.top + self.rows + 1))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw_sprite(&mut self, kind: SpriteKind, rect: &Rect) -> std::io::Result<()> {
        match kind {
            SpriteKind::Player => self.fill(rect, '█', C_PLAYER),
            SpriteKind::Obstacle => self.fill(rect, '▓', C_OBSTACLE),
        }
    }

    fn draw_rect(&mut self, rect: &Rect, colour: Colour) -> std::io::Result<()> {
        let colour = match colour {
            Colour::Green => Color::Green,
        };
        self.fill(rect, '║', colour)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _font: &str) -> std::io::Result<()> {
        let anchor = self.cells(&Rect::new(x, y, 0.0, 0.0));
        let banner = format!("╔{}╗", "═".repeat(text.chars().count() + 2));
        let middle = format!("║ {} ║", text);
        let bottom = format!("╚{}╝", "═".repeat(text.chars().count() + 2));

        self.out.queue(style::SetForegroundColor(C_GAME_OVER))?;
        for (i, line) in [banner, middle, bottom].iter().enumerate() {
            let row = (self.top + anchor.row0 + i as u16).saturating_sub(1);
            self.out
                .queue(cursor::MoveTo(self.left + anchor.col0, row))?;
            self.out.queue(Print(line))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hit_and_game_over_ring() {
        let mut hud = Hud::default();
        hud.play(Cue::Shoot);
        assert!(!hud.bell);
        hud.play(Cue::Hit);
        assert!(hud.bell);

        let mut hud = Hud::default();
        hud.play(Cue::GameOver);
        assert!(hud.bell);
    }

    #[test]
    fn bell_is_consumed_by_draw_hud() {
        let config = GameConfig::default();
        let mut out = Vec::new();
        let mut hud = Hud::default();
        hud.play(Cue::Hit);
        {
            let mut renderer = TerminalRenderer::new(&mut out, &config, 80, 40);
            renderer.draw_hud(&mut hud).expect("writing to a Vec");
        }
        assert!(!hud.bell);
        assert!(out.contains(&0x07));
    }
}
