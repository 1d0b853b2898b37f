use std::fmt;
use std::io::Write;
use std::thread;
use std::time::Duration;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::events::Control;
use crate::evolve;
use crate::grid::Grid;
use crate::input::KeySource;
use crate::render;
use crate::render::Renderer;
use crate::render::Screen;
use crate::speed::Speed;
use crate::stability::StabilityDetector;

/// How long the final frame and summary stay up before the session returns
pub const DEFAULT_FINAL_PAUSE: Duration = Duration::from_secs(1);

/// Why a session ended
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    /// No live cells are left
    Empty,

    /// The grid came back to the stability baseline
    Stable,

    /// The user pressed `q`
    UserQuit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Empty => write!(f, "The population died out"),
            Termination::Stable => write!(f, "The population stabilized"),
            Termination::UserQuit => write!(f, "Stopped by the user"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Running,
    Terminated(Termination),
}

/// Result of a finished session
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub reason: Termination,

    /// Completed evolution steps, including the last one
    pub generations: u64,
}

/// The interactive loop.
///
/// Owns the grid and drives evolution, stability detection, keyboard control and rendering, one
/// tick at a time. Everything runs on the calling thread and the only suspension point is the
/// sleep between frames.
pub struct Session<K: KeySource, W: Write> {
    grid: Grid,
    generation: u64,
    speed: Speed,
    quit: bool,
    state: State,
    poll_failures: u64,

    detector: StabilityDetector,
    renderer: Renderer,
    keys: K,
    screen: Screen<W>,

    final_pause: Duration,
    sleep: fn(Duration),
}

impl<K: KeySource, W: Write> Session<K, W> {
    pub fn new(seed: Grid, keys: K, out: W) -> Self {
        Self {
            detector: StabilityDetector::new(&seed),
            grid: seed,
            generation: 0,
            speed: Speed::default(),
            quit: false,
            state: State::Running,
            poll_failures: 0,
            renderer: Renderer::new(),
            keys,
            screen: Screen::new(out),
            final_pause: DEFAULT_FINAL_PAUSE,
            sleep: thread::sleep,
        }
    }

    /// Set how long the summary stays up
    pub fn final_pause(mut self, pause: Duration) -> Self {
        self.final_pause = pause;
        self
    }

    /// Replace the function used to wait between frames
    pub fn sleep_with(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of ticks on which the key source failed
    pub fn poll_failures(&self) -> u64 {
        self.poll_failures
    }

    /// Give back the key source and the output, e.g. to inspect what was drawn.
    pub fn into_parts(self) -> (K, W) {
        (self.keys, self.screen.into_inner())
    }

    /// Draw the seed, then tick until the session terminates.
    pub fn run(&mut self) -> Outcome {
        self.draw(&[render::status_line(self.generation)]);

        loop {
            if let Some(reason) = self.tick() {
                let outcome = Outcome {
                    reason,
                    generations: self.generation,
                };

                info!(?outcome, "session over");

                return outcome;
            }
        }
    }

    /// Run a single tick. Returns the termination reason once the session is over.
    ///
    /// The counter is bumped as soon as the step completes, so the frame drawn by a tick and the
    /// final summary both show the number of completed steps, the first evolved frame reading
    /// `Generation steps: 1`.
    ///
    /// Calling this on a terminated session does nothing.
    pub fn tick(&mut self) -> Option<Termination> {
        if let State::Terminated(reason) = self.state {
            return Some(reason);
        }

        match self.keys.poll_control() {
            Ok(Some(control)) => self.apply(control),
            Ok(None) => {}
            Err(e) => {
                self.poll_failures += 1;

                // Logs go to the same terminal, only the first one is loud
                if self.poll_failures == 1 {
                    warn!("{e}");
                } else {
                    debug!("{e}");
                }
            }
        }

        self.detector.observe(&self.grid);

        self.grid = evolve::step(&self.grid);
        self.generation += 1;

        if let Some(reason) = self.termination() {
            self.state = State::Terminated(reason);

            let [over, total] = render::summary(reason, self.generation);
            self.draw(&[String::new(), over, total]);
            (self.sleep)(self.final_pause);

            return Some(reason);
        }

        self.draw(&[render::status_line(self.generation)]);
        (self.sleep)(self.speed.delay());

        None
    }

    /// Evaluated against the freshly evolved grid. The first matching reason wins.
    fn termination(&self) -> Option<Termination> {
        if self.grid.is_empty() {
            Some(Termination::Empty)
        } else if self.detector.is_stable(&self.grid) {
            Some(Termination::Stable)
        } else if self.quit {
            Some(Termination::UserQuit)
        } else {
            None
        }
    }

    fn apply(&mut self, control: Control) {
        match control {
            Control::Quit => self.quit = true,
            Control::SlowDown => self.speed.slow_down(),
            Control::SpeedUp => self.speed.speed_up(),
            Control::ResetSpeed => self.speed.reset(),
            Control::Interrupt => {
                debug!("interrupt absorbed");

                if let Err(e) = self.screen.flush() {
                    warn!("Failed to flush output: {e}");
                }
            }
        }

        debug!(?control, delay_us = self.speed.delay_us(), "control applied");
    }

    fn draw<S: AsRef<str>>(&mut self, footer: &[S]) {
        let frame = self.renderer.render(&self.grid);

        if let Err(e) = self.screen.draw(frame, footer) {
            warn!("Failed to draw frame: {e}");
        }
    }
}
