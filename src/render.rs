//! Drawing contract between the core and whatever paints the canvas.
//!
//! Coordinates are canvas pixels; the implementation decides how they map
//! to its surface.

use crate::config::GameConfig;
use crate::entities::{GameSession, Phase, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Obstacle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    Green,
}

pub const BULLET_COLOUR: Colour = Colour::Green;
pub const GAME_OVER_TEXT: &str = "Game Over";
pub const GAME_OVER_FONT: &str = "40px Arial";

pub trait Renderer {
    fn clear(&mut self) -> std::io::Result<()>;
    fn draw_sprite(&mut self, kind: SpriteKind, rect: &Rect) -> std::io::Result<()>;
    fn draw_rect(&mut self, rect: &Rect, colour: Colour) -> std::io::Result<()>;
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &str) -> std::io::Result<()>;
}

/// Paint one frame: background, player, obstacles, bullets.  After the run
/// ends the end-screen text is drawn over the last frame instead.
pub fn draw_frame<R: Renderer + ?Sized>(
    out: &mut R,
    state: &GameSession,
    config: &GameConfig,
) -> std::io::Result<()> {
    if state.phase == Phase::GameOver {
        return draw_game_over(out, config);
    }
    draw_scene(out, state)
}

/// Repaint everything from scratch, end screen included.  For surfaces that
/// lost their contents, e.g. after a resize.
pub fn redraw_frame<R: Renderer + ?Sized>(
    out: &mut R,
    state: &GameSession,
    config: &GameConfig,
) -> std::io::Result<()> {
    draw_scene(out, state)?;
    if state.phase == Phase::GameOver {
        draw_game_over(out, config)?;
    }
    Ok(())
}

fn draw_scene<R: Renderer + ?Sized>(out: &mut R, state: &GameSession) -> std::io::Result<()> {
    out.clear()?;
    out.draw_sprite(SpriteKind::Player, &state.player.rect)?;
    for obstacle in &state.obstacles {
        out.draw_sprite(SpriteKind::Obstacle, &obstacle.rect)?;
    }
    for bullet in &state.bullets {
        out.draw_rect(&bullet.rect, BULLET_COLOUR)?;
    }
    Ok(())
}

fn draw_game_over<R: Renderer + ?Sized>(out: &mut R, config: &GameConfig) -> std::io::Result<()> {
    out.draw_text(
        GAME_OVER_TEXT,
        config.canvas_width / 4.0,
        config.canvas_height / 2.0,
        GAME_OVER_FONT,
    )
}
