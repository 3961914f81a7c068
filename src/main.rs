mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use skyraid::config::SessionConfig;
use skyraid::entities::{AbilityKind, Intents, SessionStatus};
use skyraid::session::Session;

const FRAME: Duration = Duration::from_millis(20); // ≈50 ticks/sec

/// A key counts as held while its last press/repeat event is at most this
/// many frames old.  Terminals without key-release reporting still repeat at
/// ≥ 15 Hz, so a six-frame window (≈120 ms) never expires mid-hold.
const HOLD_WINDOW: u64 = 6;

// ── Input tracking ────────────────────────────────────────────────────────────

/// What the event drain tells the frame loop to do besides play.
enum LoopAction {
    Continue,
    Quit,
    Restart,
}

/// Held-key state for one game.  Rather than acting on raw events, the loop
/// records the frame each key was last seen and treats "fresh enough" as
/// held, so SPACE and the movement keys combine naturally.
struct InputTracker {
    last_seen: HashMap<KeyCode, u64>,
    /// One-shot ability keypress, delivered on the next frame's intents.
    pending_ability: Option<AbilityKind>,
}

impl InputTracker {
    fn new() -> InputTracker {
        InputTracker {
            last_seen: HashMap::new(),
            pending_ability: None,
        }
    }

    /// Drain every queued event.  Returns the first quit/restart request seen.
    fn drain(
        &mut self,
        rx: &mpsc::Receiver<Event>,
        frame: u64,
        session_over: bool,
    ) -> LoopAction {
        let mut action = LoopAction::Continue;
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    self.last_seen.insert(code, frame);
                    if let Some(requested) = one_shot(code, modifiers, session_over) {
                        if matches!(action, LoopAction::Continue) {
                            action = requested;
                        }
                    }
                    self.note_ability_key(code);
                }
                KeyEventKind::Repeat => {
                    self.last_seen.insert(code, frame);
                }
                KeyEventKind::Release => {
                    self.last_seen.remove(&code);
                }
            }
        }
        action
    }

    fn note_ability_key(&mut self, code: KeyCode) {
        let kind = match code {
            KeyCode::Char('g') | KeyCode::Char('G') => AbilityKind::AreaField,
            KeyCode::Char('s') | KeyCode::Char('S') => AbilityKind::Barrier,
            KeyCode::Char('e') | KeyCode::Char('E') => AbilityKind::DisablePulse,
            KeyCode::Char('h') | KeyCode::Char('H') => AbilityKind::Overcharge,
            KeyCode::Char('f') | KeyCode::Char('F') => AbilityKind::HomingShot,
            _ => return,
        };
        self.pending_ability = Some(kind);
    }

    fn held(&self, key: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
    }

    fn axis(&self, neg: &[KeyCode], pos: &[KeyCode], frame: u64) -> i32 {
        let n = neg.iter().any(|&k| self.held(k, frame));
        let p = pos.iter().any(|&k| self.held(k, frame));
        p as i32 - n as i32
    }

    /// Everything the simulation needs from this frame's input.
    /// W/A/D double the arrows; down is arrow-only because S spends a shield.
    fn intents(&mut self, frame: u64) -> Intents {
        Intents {
            move_x: self.axis(
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            move_y: self.axis(
                &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                &[KeyCode::Down],
                frame,
            ),
            fire_held: self.held(KeyCode::Char(' '), frame),
            activate: self.pending_ability.take(),
        }
    }
}

/// Quit/restart keys, handled outside the simulation.
fn one_shot(code: KeyCode, modifiers: KeyModifiers, session_over: bool) -> Option<LoopAction> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(LoopAction::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(LoopAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') if session_over => Some(LoopAction::Restart),
        _ => None,
    }
}

// ── Start screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let mid_x = width / 2;
    let mid_y = height / 2;

    let centered = |out: &mut W, row: u16, text: &str, color: Color| -> std::io::Result<()> {
        let col = mid_x.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text.to_string()))?;
        Ok(())
    };

    centered(out, mid_y.saturating_sub(7), "★  S K Y R A I D  ★", Color::Cyan)?;
    centered(
        out,
        mid_y.saturating_sub(4),
        "Hold SPACE to charge, release to fire — full charge fires a burst",
        Color::White,
    )?;
    centered(
        out,
        mid_y.saturating_sub(3),
        "Collect 4 jewels ◆ to clear the stage; dodge shells and walls",
        Color::White,
    )?;
    centered(
        out,
        mid_y.saturating_sub(1),
        "Ability charges drop as letters; press the key to spend one:",
        Color::DarkGrey,
    )?;
    centered(
        out,
        mid_y,
        "G gravity field   S shield   E EMP   H overdrive   F homing bolt",
        Color::DarkGrey,
    )?;
    centered(out, mid_y + 2, "ENTER : start    Q : quit", Color::DarkGrey)?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until a choice arrives; releases from the previous screen are
    // ignored so a lingering key-up can't start a game.
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit)
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs one session to completion.  Returns `true` when the user asked to
/// quit the program, `false` to go back to the menu for a fresh game.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let arena = (session.config.arena_w, session.config.arena_h);
    let mut input = InputTracker::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let session_over = session.status != SessionStatus::Running;
        match input.drain(rx, frame, session_over) {
            LoopAction::Quit => return Ok(true),
            LoopAction::Restart => return Ok(false),
            LoopAction::Continue => {}
        }

        let intents = input.intents(frame);
        let result = session.advance(&intents, &mut rng);
        display::render(out, &result, arena)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Resolve config while stderr is still visible; the alternate screen
    // swallows anything printed later.
    let config = match SessionConfig::load(Path::new("skyraid.toml")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("skyraid.toml: {err}; using defaults");
            SessionConfig::default()
        }
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask the terminal for key-release and key-repeat events.  Kitty-protocol
    // terminals honor this; everywhere else the hold window covers for it.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits
    // on the terminal.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped, program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Teardown runs even when `run` failed; the terminal must come back.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: SessionConfig,
) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => return Ok(()),
            MenuResult::Start => {
                let mut session = Session::new(config.clone());
                if game_loop(out, &mut session, rx)? {
                    return Ok(());
                }
            }
        }
    }
}
