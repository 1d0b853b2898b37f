use std::collections::VecDeque;
use std::io;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use life_term::events::Control;
use life_term::game::Outcome;
use life_term::game::Session;
use life_term::game::State;
use life_term::game::Termination;
use life_term::grid::Grid;
use life_term::input::InputError;
use life_term::input::ABSORBED_SIGNALS;
use life_term::input::KeySource;
use life_term::input::RawMode;
use life_term::input::TerminalKeys;
use life_term::render;
use life_term::speed::DEFAULT_DELAY_US;
use life_term::speed::MIN_DELAY_US;

/// Yields the scripted controls one per poll, then nothing
struct ScriptedKeys(VecDeque<Control>);

impl KeySource for ScriptedKeys {
    fn poll_control(&mut self) -> Result<Option<Control>, InputError> {
        Ok(self.0.pop_front())
    }
}

struct BrokenKeys;

impl KeySource for BrokenKeys {
    fn poll_control(&mut self) -> Result<Option<Control>, InputError> {
        Err(InputError::Read(io::Error::other("device went away")))
    }
}

fn session<K: KeySource>(seed: Grid, keys: K) -> Session<K, Vec<u8>> {
    Session::new(seed, keys, Vec::new())
        .final_pause(Duration::ZERO)
        .sleep_with(|_| {})
}

fn scripted(controls: &[Control]) -> ScriptedKeys {
    ScriptedKeys(controls.iter().copied().collect())
}

fn pattern(rows: &[&str], top: usize, left: usize) -> Grid {
    let mut grid = Grid::new();
    grid.stamp(rows, top, left);
    grid
}

fn glider() -> Grid {
    pattern(&[".@.", "..@", "@@@"], 5, 5)
}

#[test]
fn test_dies_in_one_step() -> anyhow::Result<()> {
    let mut session = session(pattern(&["@"], 12, 40), scripted(&[]));

    let outcome = session.run();

    assert_eq!(
        outcome,
        Outcome {
            reason: Termination::Empty,
            generations: 1
        }
    );
    assert!(session.grid().is_empty());

    let (_, out) = session.into_parts();
    let out = String::from_utf8(out)?;
    assert!(out.contains("Generation steps: 0"));
    assert!(out.contains("The population died out"));
    assert!(out.contains("Total number of generation steps: 1"));

    Ok(())
}

#[test]
fn test_empty_seed() {
    let outcome = session(Grid::new(), scripted(&[])).run();

    assert_eq!(outcome.reason, Termination::Empty);
    assert_eq!(outcome.generations, 1);
}

#[test]
fn test_still_life_is_stable_after_ten() {
    let block = pattern(&["@@", "@@"], 3, 3);

    let outcome = session(block, scripted(&[])).run();

    assert_eq!(outcome.reason, Termination::Stable);
    assert_eq!(outcome.generations, 10);
}

#[test]
fn test_blinker_is_stable_after_ten() {
    let blinker = pattern(&["@@@"], 12, 40);

    let outcome = session(blinker, scripted(&[])).run();

    assert_eq!(outcome.reason, Termination::Stable);
    assert_eq!(outcome.generations, 10);
}

#[test]
fn test_pulsar_is_stable_on_its_period() {
    let pulsar = pattern(
        &[
            "..@@@...@@@..",
            ".............",
            "@....@.@....@",
            "@....@.@....@",
            "@....@.@....@",
            "..@@@...@@@..",
            ".............",
            "..@@@...@@@..",
            "@....@.@....@",
            "@....@.@....@",
            "@....@.@....@",
            ".............",
            "..@@@...@@@..",
        ],
        6,
        30,
    );

    let outcome = session(pulsar, scripted(&[])).run();

    assert_eq!(outcome.reason, Termination::Stable);
    assert_eq!(outcome.generations, 12);
}

#[test]
fn test_glider_is_never_stable() {
    let mut session = session(glider(), scripted(&[]));

    for _ in 0..200 {
        assert_eq!(session.tick(), None);
    }

    assert_eq!(session.state(), State::Running);
    assert_eq!(session.generation(), 200);
}

#[test]
fn test_quit_after_step() {
    let mut session = session(glider(), scripted(&[Control::Quit]));

    let outcome = session.run();

    assert_eq!(outcome.reason, Termination::UserQuit);
    assert_eq!(outcome.generations, 1);
    assert_ne!(session.grid(), &glider());
}

#[test]
fn test_quit_key_late() {
    let keys = scripted(&[
        Control::SlowDown,
        Control::SpeedUp,
        Control::ResetSpeed,
        Control::Quit,
    ]);

    let outcome = session(glider(), keys).run();

    assert_eq!(outcome.reason, Termination::UserQuit);
    assert_eq!(outcome.generations, 4);
}

#[test]
fn test_speed_controls() {
    let mut keys = vec![Control::SpeedUp; 50];
    keys.push(Control::Interrupt);

    let mut session = session(glider(), scripted(&keys));

    for _ in 0..50 {
        session.tick();
    }
    assert_eq!(session.speed().delay_us(), MIN_DELAY_US);

    session.tick();
    assert_eq!(session.speed().delay_us(), MIN_DELAY_US);
    assert_eq!(session.state(), State::Running);

    let mut session = session_with_reset();
    session.tick();
    session.tick();
    session.tick();
    assert_eq!(session.speed().delay_us(), DEFAULT_DELAY_US);
}

fn session_with_reset() -> Session<ScriptedKeys, Vec<u8>> {
    session(
        glider(),
        scripted(&[Control::SlowDown, Control::SlowDown, Control::ResetSpeed]),
    )
}

#[test]
fn test_degraded_input_still_runs() {
    let block = pattern(&["@@", "@@"], 20, 70);

    let outcome = session(block, TerminalKeys::degraded()).run();

    assert_eq!(outcome.reason, Termination::Stable);
    assert_eq!(outcome.generations, 10);
}

#[test]
fn test_input_errors_are_ignored() {
    let block = pattern(&["@@", "@@"], 0, 0);

    let mut session = session(block, BrokenKeys);
    let outcome = session.run();

    assert_eq!(outcome.reason, Termination::Stable);
    assert_eq!(outcome.generations, 10);
    assert_eq!(session.poll_failures(), 10);
}

#[test]
fn test_stable_wins_over_quit() {
    // Quit arrives on tick 10, the same tick the block becomes stable
    let mut controls = vec![Control::ResetSpeed; 9];
    controls.push(Control::Quit);

    let block = pattern(&["@@", "@@"], 8, 8);
    let outcome = session(block, scripted(&controls)).run();

    assert_eq!(
        outcome,
        Outcome {
            reason: Termination::Stable,
            generations: 10
        }
    );
}

#[cfg(unix)]
#[test]
fn test_signals_do_not_end_session() {
    fn raise_signals(_: Duration) {
        for signal in ABSORBED_SIGNALS {
            signal_hook::low_level::raise(signal).unwrap();
        }
    }

    let block = pattern(&["@@", "@@"], 15, 60);

    let outcome = Session::new(block, TerminalKeys::degraded(), Vec::new())
        .final_pause(Duration::ZERO)
        .sleep_with(raise_signals)
        .run();

    assert_eq!(
        outcome,
        Outcome {
            reason: Termination::Stable,
            generations: 10
        }
    );
}

/// Holds raw mode like the terminal key source does, and can be told to fail
struct GuardedKeys {
    _raw: RawMode,
    polls: u32,
    panic_on: Option<u32>,
}

impl KeySource for GuardedKeys {
    fn poll_control(&mut self) -> Result<Option<Control>, InputError> {
        self.polls += 1;

        if self.panic_on == Some(self.polls) {
            panic!("key source blew up on poll {}", self.polls);
        }

        Ok(None)
    }
}

fn enable_ok() -> io::Result<()> {
    Ok(())
}

static RELEASED_AFTER_RUN: AtomicUsize = AtomicUsize::new(0);
static RELEASED_AFTER_PANIC: AtomicUsize = AtomicUsize::new(0);

fn release_after_run() -> io::Result<()> {
    RELEASED_AFTER_RUN.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

fn release_after_panic() -> io::Result<()> {
    RELEASED_AFTER_PANIC.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

#[test]
fn test_raw_mode_released_after_run() -> anyhow::Result<()> {
    let keys = GuardedKeys {
        _raw: RawMode::acquire_with(enable_ok, release_after_run)?,
        polls: 0,
        panic_on: None,
    };

    let mut session = session(pattern(&["@"], 1, 1), keys);
    assert_eq!(session.run().reason, Termination::Empty);
    assert_eq!(RELEASED_AFTER_RUN.load(Ordering::SeqCst), 0);

    drop(session);
    assert_eq!(RELEASED_AFTER_RUN.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn test_raw_mode_released_on_panic() -> anyhow::Result<()> {
    let keys = GuardedKeys {
        _raw: RawMode::acquire_with(enable_ok, release_after_panic)?,
        polls: 0,
        panic_on: Some(3),
    };

    let res = panic::catch_unwind(AssertUnwindSafe(move || session(glider(), keys).run()));

    assert!(res.is_err());
    assert_eq!(RELEASED_AFTER_PANIC.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn test_summary_text() {
    insta::assert_snapshot!(render::summary(Termination::Empty, 1).join("\n"), @r"
    Game of Life is over! The population died out.
    Total number of generation steps: 1
    ");

    insta::assert_snapshot!(render::summary(Termination::UserQuit, 42).join("\n"), @r"
    Game of Life is over! Stopped by the user.
    Total number of generation steps: 42
    ");

    insta::assert_snapshot!(render::status_line(7), @"Generation steps: 7");
}
