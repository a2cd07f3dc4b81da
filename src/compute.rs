//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameSession` (plus the config and, where needed, the session clock or an
//! RNG handle) and returns a brand-new `GameSession`.  Functions that would
//! touch the screen or the speaker also return the `Effect`s to apply, in
//! order.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::{GameConfig, DEFAULT_HINT, RELOAD_HINT, RESTART_PROMPT, START_PROMPT};
use crate::effects::{high_score_text, score_text, Cue, Effect};
use crate::entities::{
    Ammo, Bullet, GameSession, InputEvent, Obstacle, Phase, Player, Rect,
};

/// A new state together with the effects produced while computing it.
pub type Outcome = (GameSession, Vec<Effect>);

fn unchanged(state: &GameSession) -> Outcome {
    (state.clone(), Vec::new())
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn spawn_player(config: &GameConfig) -> Player {
    let (x, y) = config.player_spawn();
    Player {
        rect: Rect::new(x, y, config.player_width, config.player_height),
        speed: config.player_speed,
        dx: 0.0,
    }
}

/// Build a fresh session waiting for its start trigger.
pub fn new_session(config: &GameConfig) -> GameSession {
    GameSession {
        player: spawn_player(config),
        obstacles: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        high_score: 0,
        obstacle_speed: config.obstacle_speed0,
        phase: Phase::NotStarted,
        ammo: Ammo::default(),
        frame: 0,
    }
}

/// Text the host should show before the first frame.
pub fn initial_effects(state: &GameSession) -> Vec<Effect> {
    vec![
        Effect::SetScoreText(score_text(state.score)),
        Effect::SetHighScoreText(high_score_text(state.high_score)),
        Effect::SetInstructions(START_PROMPT.to_string()),
        Effect::SetGameplayHint(DEFAULT_HINT.to_string()),
    ]
}

// ── Entity store ─────────────────────────────────────────────────────────────

/// Drop the entries at `doomed` (any order, duplicates allowed) while keeping
/// the survivors in insertion order.
fn remove_indices<T>(items: &mut Vec<T>, doomed: &[usize]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !doomed.contains(&index);
        index += 1;
        keep
    });
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Append an obstacle at the top edge, at a random whole-pixel column that
/// keeps it fully inside the canvas.
pub fn spawn_obstacle(
    state: &GameSession,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameSession {
    let span = (config.canvas_width - config.obstacle_width).floor() as u32;
    let x = if span == 0 { 0 } else { rng.gen_range(0..span) };
    let mut next = state.clone();
    next.obstacles.push(Obstacle {
        rect: Rect::new(
            x as f32,
            0.0,
            config.obstacle_width,
            config.obstacle_height,
        ),
    });
    log::debug!("obstacle spawned at x={} ({} on screen)", x, next.obstacles.len());
    next
}

/// Complete a pending reload once the session clock reaches its deadline.
pub fn poll_reload(state: &GameSession, now_ms: u64) -> Outcome {
    match state.ammo.reload_deadline_ms {
        Some(deadline) if now_ms >= deadline => {
            let mut next = state.clone();
            next.ammo = Ammo::default();
            log::debug!("reload complete at {}ms", now_ms);
            (next, vec![Effect::SetGameplayHint(DEFAULT_HINT.to_string())])
        }
        _ => unchanged(state),
    }
}

/// Fire one bullet from the centre of the player's top edge.
///
/// A silent no-op while the ammo gate is closed.  The `max_bullets`-th shot
/// closes the gate and schedules the reload `reload_time_ms` later.
pub fn fire_bullet(state: &GameSession, config: &GameConfig, now_ms: u64) -> Outcome {
    let (mut next, mut effects) = poll_reload(state, now_ms);
    if !next.ammo.can_shoot {
        return (next, effects);
    }

    let p = next.player.rect;
    next.bullets.push(Bullet {
        rect: Rect::new(
            p.x + p.width / 2.0 - config.bullet_width / 2.0,
            p.y,
            config.bullet_width,
            config.bullet_height,
        ),
    });
    effects.push(Effect::PlaySound(Cue::Shoot));
    next.ammo.fired += 1;

    if next.ammo.fired >= config.max_bullets {
        next.ammo.can_shoot = false;
        let deadline = now_ms.saturating_add(config.reload_time_ms);
        next.ammo.reload_deadline_ms = Some(deadline);
        effects.push(Effect::SetGameplayHint(RELOAD_HINT.to_string()));
        log::debug!("out of ammo, reloading until {}ms", deadline);
    }
    (next, effects)
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    next.player.dx = -next.player.speed;
    next
}

pub fn move_player_right(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    next.player.dx = next.player.speed;
    next
}

pub fn stop_player(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    next.player.dx = 0.0;
    next
}

/// Route one input event according to the current phase.  Events that make
/// no sense in the current phase are ignored.
pub fn handle_input(
    state: &GameSession,
    config: &GameConfig,
    event: InputEvent,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Outcome {
    match (state.phase, event) {
        (Phase::NotStarted, InputEvent::Start) => start(state, config, rng),
        (Phase::GameOver, InputEvent::Restart) => restart(state, config),
        (Phase::Running, InputEvent::MoveLeft) => (move_player_left(state), Vec::new()),
        (Phase::Running, InputEvent::MoveRight) => (move_player_right(state), Vec::new()),
        (Phase::Running, InputEvent::StopMove) => (stop_player(state), Vec::new()),
        (Phase::Running, InputEvent::Fire) => fire_bullet(state, config, now_ms),
        _ => unchanged(state),
    }
}

// ── Motion step ──────────────────────────────────────────────────────────────

/// Move everything one frame, keep the player on the canvas and drop
/// whatever left it.
pub fn step_motion(state: &GameSession, config: &GameConfig) -> GameSession {
    let mut next = state.clone();

    let max_x = (config.canvas_width - next.player.rect.width).max(0.0);
    next.player.rect.x = (next.player.rect.x + next.player.dx).max(0.0).min(max_x);

    for obstacle in &mut next.obstacles {
        obstacle.rect.y += next.obstacle_speed;
    }
    for bullet in &mut next.bullets {
        bullet.rect.y -= config.bullet_speed;
    }

    next.obstacles.retain(|o| o.rect.y < config.canvas_height);
    next.bullets.retain(|b| b.rect.y > 0.0);
    next
}

// ── Collision engine ─────────────────────────────────────────────────────────

/// Pair every bullet with the first overlapping obstacle that no earlier
/// bullet has claimed, then remove all paired entities at once.
pub fn resolve_bullet_hits(state: &GameSession, config: &GameConfig) -> Outcome {
    let mut hit_obstacles: Vec<usize> = Vec::new();
    let mut spent_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let target = state
            .obstacles
            .iter()
            .enumerate()
            .find(|(oi, o)| !hit_obstacles.contains(oi) && bullet.rect.overlaps(&o.rect))
            .map(|(oi, _)| oi);
        if let Some(oi) = target {
            hit_obstacles.push(oi);
            spent_bullets.push(bi);
        }
    }

    if hit_obstacles.is_empty() {
        return unchanged(state);
    }

    let mut next = state.clone();
    remove_indices(&mut next.obstacles, &hit_obstacles);
    remove_indices(&mut next.bullets, &spent_bullets);
    let hits = hit_obstacles.len() as u32;
    next.score = next.score.saturating_add(hits.saturating_mul(config.hit_score));

    let effects: Vec<Effect> = (0..hits).map(|_| Effect::PlaySound(Cue::Hit)).collect();
    (next, effects)
}

/// End the run if any obstacle touches the player.
pub fn check_player_collision(state: &GameSession) -> Outcome {
    if state.phase != Phase::Running {
        return unchanged(state);
    }
    let crashed = state
        .obstacles
        .iter()
        .any(|o| state.player.rect.overlaps(&o.rect));
    if !crashed {
        return unchanged(state);
    }
    game_over(state)
}

// ── State machine ────────────────────────────────────────────────────────────

fn game_over(state: &GameSession) -> Outcome {
    let mut next = state.clone();
    next.phase = Phase::GameOver;
    next.high_score = next.high_score.max(next.score);
    log::info!(
        "game over: score {} (high score {})",
        next.score,
        next.high_score
    );
    // a hit earlier in the same frame may have moved the score
    let effects = vec![
        Effect::SetScoreText(score_text(next.score)),
        Effect::SetHighScoreText(high_score_text(next.high_score)),
        Effect::SetInstructions(RESTART_PROMPT.to_string()),
        Effect::PlaySound(Cue::GameOver),
    ];
    (next, effects)
}

/// `NotStarted → Running`: place the first obstacle and clear the prompt.
pub fn start(state: &GameSession, config: &GameConfig, rng: &mut impl Rng) -> Outcome {
    if state.phase != Phase::NotStarted {
        return unchanged(state);
    }
    let mut next = spawn_obstacle(state, config, rng);
    next.phase = Phase::Running;
    log::info!("game started");
    let effects = vec![
        Effect::SetInstructions(String::new()),
        Effect::SetGameplayHint(DEFAULT_HINT.to_string()),
    ];
    (next, effects)
}

/// `GameOver → Running`: fresh run, same high score.
///
/// Unlike `start`, no obstacle is placed; the first one arrives with the
/// spawn cadence.  A reload still pending from the previous run is cancelled.
pub fn restart(state: &GameSession, config: &GameConfig) -> Outcome {
    if state.phase != Phase::GameOver {
        return unchanged(state);
    }
    let next = GameSession {
        phase: Phase::Running,
        high_score: state.high_score,
        ..new_session(config)
    };
    log::info!("game restarted (high score {})", next.high_score);
    let effects = vec![
        Effect::SetScoreText(score_text(0)),
        Effect::SetInstructions(String::new()),
        Effect::SetGameplayHint(DEFAULT_HINT.to_string()),
    ];
    (next, effects)
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance a running session by one frame.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
///
/// Order: reload poll, motion, bullet hits, player crash, then scoring.  A
/// bullet can therefore clear an obstacle before it reaches the player.  The
/// frame that ends the run awards no point.
pub fn tick(
    state: &GameSession,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Outcome {
    if state.phase != Phase::Running {
        return unchanged(state);
    }

    let (next, mut effects) = poll_reload(state, now_ms);
    let mut next = step_motion(&next, config);
    next.frame += 1;

    let (next, hit_effects) = resolve_bullet_hits(&next, config);
    effects.extend(hit_effects);

    let (mut next, crash_effects) = check_player_collision(&next);
    effects.extend(crash_effects);
    if next.phase == Phase::GameOver {
        return (next, effects);
    }

    next.score = next.score.saturating_add(1);
    effects.push(Effect::SetScoreText(score_text(next.score)));

    if next.score % config.difficulty_increase_interval == 0 {
        next.obstacle_speed += config.difficulty_step;
        log::debug!("difficulty up: obstacle speed {}", next.obstacle_speed);
    }
    if next.score % config.spawn_interval == 0 {
        next = spawn_obstacle(&next, config, rng);
    }

    (next, effects)
}
