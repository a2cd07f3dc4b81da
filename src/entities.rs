//! All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start trigger.
    NotStarted,
    Running,
    /// Frame loop halted; only a restart trigger is accepted.
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in canvas pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// Half-open overlap test: rectangles that only share an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Pixels per frame while a direction is held.
    pub speed: f32,
    /// Current horizontal velocity: `-speed`, `0` or `+speed`.
    pub dx: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

// ── Ammo gate ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ammo {
    /// Shots fired since the last reload, in `0..=max_bullets`.
    pub fired: u32,
    pub can_shoot: bool,
    /// Session clock (ms) at which the pending reload completes, if any.
    pub reload_deadline_ms: Option<u64>,
}

impl Default for Ammo {
    fn default() -> Self {
        Ammo {
            fired: 0,
            can_shoot: true,
            reload_deadline_ms: None,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    /// Insertion-ordered; spawn order decides collision tie-breaks.
    pub obstacles: Vec<Obstacle>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    /// Best score of this process; survives restarts.
    pub high_score: u32,
    /// Fall speed in pixels per frame.  Only grows within a run.
    pub obstacle_speed: f32,
    pub phase: Phase,
    pub ammo: Ammo,
    /// Frames stepped in the current run.
    pub frame: u64,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Discrete commands delivered by the host's input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    StopMove,
    Fire,
    Start,
    Restart,
}
