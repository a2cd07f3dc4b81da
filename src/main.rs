mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use plane_game::compute::{handle_input, initial_effects, new_session, tick};
use plane_game::effects::dispatch;
use plane_game::entities::{GameSession, InputEvent, Phase};
use plane_game::render::{draw_frame, redraw_frame};
use plane_game::GameConfig;

use display::{Hud, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "plane_game", about = "Dodge and shoot falling obstacles")]
struct Args {
    /// JSON file overriding any subset of the game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for obstacle placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// How long a key stays "held" after its last press or repeat event, for
/// terminals that never report key release.  The first press has to bridge
/// the OS initial repeat delay (commonly 250-500 ms); once auto-repeat kicks
/// in, events arrive at 15 Hz or faster.
const INITIAL_HOLD: Duration = Duration::from_millis(500);
const REPEAT_HOLD: Duration = Duration::from_millis(150);

/// Whole frames covering `hold`, rounded up, never zero.
fn hold_frames(hold: Duration, frame_time: Duration) -> u64 {
    let frame_ns = frame_time.as_nanos().max(1);
    (hold.as_nanos().div_ceil(frame_ns) as u64).max(1)
}

#[derive(Clone, Copy, Debug)]
struct HeldKey {
    last_frame: u64,
    /// Seen more than once in a row: auto-repeat is running.
    repeating: bool,
}

/// Hold windows converted to frames at the current frame rate.
struct HoldWindow {
    initial: u64,
    repeat: u64,
}

impl HoldWindow {
    fn new(frame_time: Duration) -> Self {
        HoldWindow {
            initial: hold_frames(INITIAL_HOLD, frame_time),
            repeat: hold_frames(REPEAT_HOLD, frame_time),
        }
    }

    fn is_held(&self, key: &HeldKey, frame: u64) -> bool {
        let window = if key.repeating { self.repeat } else { self.initial };
        frame.saturating_sub(key.last_frame) <= window
    }

    /// Record a press or repeat.  A press arriving while the key is still
    /// held is an OS repeat on terminals without repeat reporting.
    fn record(&self, keys: &mut HashMap<KeyCode, HeldKey>, code: KeyCode, frame: u64, repeat: bool) {
        let repeating = repeat
            || keys
                .get(&code)
                .map(|k| self.is_held(k, frame))
                .unwrap_or(false);
        keys.insert(
            code,
            HeldKey {
                last_frame: frame,
                repeating,
            },
        );
    }

    fn any_held(&self, keys: &HashMap<KeyCode, HeldKey>, codes: &[KeyCode], frame: u64) -> bool {
        codes
            .iter()
            .any(|c| keys.get(c).map(|k| self.is_held(k, frame)).unwrap_or(false))
    }
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

/// One-shot actions for a key press in the given phase.
fn press_to_event(code: KeyCode, phase: Phase) -> Option<InputEvent> {
    let trigger = matches!(
        code,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W')
    );
    match phase {
        Phase::NotStarted if trigger => Some(InputEvent::Start),
        Phase::GameOver if trigger || matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) => {
            Some(InputEvent::Restart)
        }
        Phase::Running if matches!(code, KeyCode::Char('w') | KeyCode::Char('W')) => {
            Some(InputEvent::Fire)
        }
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `held` map records the frame of the last press/repeat
/// event for every key.  Each frame the freshest direction is
/// turned into `MoveLeft` / `MoveRight` / `StopMove`, so holding W and a
/// direction at the same time works on terminals with and without
/// key-release reporting.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_time: Duration,
) -> Result<GameSession> {
    let clock = Instant::now();
    let mut hud = Hud::default();
    let mut session = new_session(config);
    dispatch(&initial_effects(&session), &mut hud);

    let hold = HoldWindow::new(frame_time);
    let mut held: HashMap<KeyCode, HeldKey> = HashMap::new();
    let mut frame: u64 = 0;
    let mut needs_redraw = false;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now_ms = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut pressed: Vec<InputEvent> = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(code, modifiers) {
                            return Ok(session);
                        }
                        hold.record(&mut held, code, frame, false);
                        // Phase may change mid-drain (start, then fire)
                        let phase = pressed
                            .iter()
                            .fold(session.phase, |phase, e| match (phase, e) {
                                (Phase::NotStarted, InputEvent::Start)
                                | (Phase::GameOver, InputEvent::Restart) => Phase::Running,
                                _ => phase,
                            });
                        pressed.extend(press_to_event(code, phase));
                    }
                    KeyEventKind::Repeat => {
                        hold.record(&mut held, code, frame, true);
                    }
                    KeyEventKind::Release => {
                        held.remove(&code);
                    }
                },
                Event::Resize(width, height) => {
                    renderer.resize(width, height);
                    needs_redraw = true;
                }
                _ => {}
            }
        }

        for event in pressed {
            let (next, effects) = handle_input(&session, config, event, now_ms, rng);
            session = next;
            dispatch(&effects, &mut hud);
        }

        // ── Steering from held keys ───────────────────────────────────────────
        let left = hold.any_held(&held, &LEFT_KEYS, frame);
        let right = hold.any_held(&held, &RIGHT_KEYS, frame);
        let steer = match (left, right) {
            (true, false) => InputEvent::MoveLeft,
            (false, true) => InputEvent::MoveRight,
            _ => InputEvent::StopMove,
        };
        let (next, _) = handle_input(&session, config, steer, now_ms, rng);
        session = next;

        let (next, effects) = tick(&session, config, now_ms, rng);
        session = next;
        dispatch(&effects, &mut hud);

        // The end screen is drawn over the last frame, so a new layout
        // needs the whole scene again.
        if std::mem::take(&mut needs_redraw) {
            redraw_frame(renderer, &session, config)?;
        } else {
            draw_frame(renderer, &session, config)?;
        }
        renderer.draw_hud(&mut hud)?;
        renderer.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default().validated()?,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time = Duration::from_secs(1) / args.fps;
    log::info!("starting with {:?}, {} fps", config, args.fps);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = terminal::size()
        .context("querying terminal size")
        .and_then(|(width, height)| {
            let mut renderer = TerminalRenderer::new(&mut out, &config, width, height);
            game_loop(&mut renderer, &config, &rx, &mut rng, frame_time)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let session = result?;
    println!(
        "Final score: {}  High score: {}",
        session.score, session.high_score
    );
    Ok(())
}
