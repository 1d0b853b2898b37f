use std::ffi::c_int;
use std::io;
use std::panic;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crossterm::event;
use crossterm::terminal;
use signal_hook::SigId;
use signal_hook::consts::SIGINT;
use signal_hook::consts::SIGQUIT;
use signal_hook::consts::SIGTSTP;
use thiserror::Error;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::events;
use crate::events::Control;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to enter raw terminal mode: {0}")]
    RawMode(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to poll for terminal events: {0}")]
    Poll(#[source] io::Error),

    #[error("Failed to read terminal event: {0}")]
    Read(#[source] io::Error),
}

/// A non-blocking source of control keys.
pub trait KeySource {
    /// Return the next buffered control, or `None` if nothing is pending. Must never block.
    fn poll_control(&mut self) -> Result<Option<Control>, InputError>;
}

/// Switches the terminal line discipline on or off
pub type ModeSwitch = fn() -> io::Result<()>;

/// Raw (non-canonical, no echo) terminal mode, held for as long as this value lives.
///
/// The previous mode is restored when it is dropped, including while unwinding.
#[derive(Debug)]
pub struct RawMode {
    disable: ModeSwitch,
}

impl RawMode {
    pub fn acquire() -> Result<Self, SetupError> {
        Self::acquire_with(terminal::enable_raw_mode, terminal::disable_raw_mode)
    }

    /// Like `acquire`, with the functions entering and leaving raw mode supplied by the caller.
    pub fn acquire_with(enable: ModeSwitch, disable: ModeSwitch) -> Result<Self, SetupError> {
        enable().map_err(SetupError::RawMode)?;

        Ok(Self { disable })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = (self.disable)() {
            error!("Failed to restore terminal mode: {e}");
        }
    }
}

/// Signals that are absorbed instead of stopping the process while a session runs
pub const ABSORBED_SIGNALS: [c_int; 3] = [SIGINT, SIGTSTP, SIGQUIT];

/// Records deliveries of [`ABSORBED_SIGNALS`] in a flag that is polled once per tick.
///
/// The default actions are replaced for as long as this value lives.
pub struct SignalFlag {
    raised: Arc<AtomicBool>,
    ids: Vec<SigId>,
}

impl SignalFlag {
    pub fn register() -> Self {
        let raised = Arc::new(AtomicBool::new(false));
        let mut ids = Vec::with_capacity(ABSORBED_SIGNALS.len());

        for signal in ABSORBED_SIGNALS {
            match signal_hook::flag::register(signal, Arc::clone(&raised)) {
                Ok(id) => ids.push(id),
                Err(e) => warn!("Failed to trap signal {signal}: {e}"),
            }
        }

        Self { raised, ids }
    }

    /// Whether a signal arrived since the last call
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::Relaxed)
    }
}

impl Drop for SignalFlag {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Restore the terminal before the default panic message is printed.
///
/// Panics are unwound through [`RawMode`] anyway, this only makes sure the message itself is
/// readable (and covers `panic = "abort"` builds).
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        original_hook(panic_info);
    }));
}

/// Keys read from the controlling terminal, plus absorbed interrupt signals.
///
/// If raw mode could not be entered the session is uncontrollable: polls only ever report
/// interrupts.
pub struct TerminalKeys {
    raw: Option<RawMode>,
    setup_error: Option<SetupError>,
    signals: SignalFlag,
}

impl TerminalKeys {
    /// Enter raw mode, falling back to degraded mode on failure.
    pub fn acquire() -> Self {
        Self::from_raw(RawMode::acquire())
    }

    pub fn from_raw(raw: Result<RawMode, SetupError>) -> Self {
        match raw {
            Ok(raw) => Self {
                raw: Some(raw),
                setup_error: None,
                signals: SignalFlag::register(),
            },
            Err(e) => {
                warn!("{e}. Keyboard controls are disabled for this session");

                Self {
                    setup_error: Some(e),
                    ..Self::degraded()
                }
            }
        }
    }

    /// A key source that yields nothing but interrupts
    pub fn degraded() -> Self {
        Self {
            raw: None,
            setup_error: None,
            signals: SignalFlag::register(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.raw.is_none()
    }

    /// Why raw mode could not be entered, if that is what made this source degraded
    pub fn setup_error(&self) -> Option<&SetupError> {
        self.setup_error.as_ref()
    }
}

impl KeySource for TerminalKeys {
    fn poll_control(&mut self) -> Result<Option<Control>, InputError> {
        if self.signals.take() {
            debug!("absorbed a signal");
            return Ok(Some(Control::Interrupt));
        }

        if self.raw.is_none() {
            return Ok(None);
        }

        if !event::poll(Duration::ZERO).map_err(InputError::Poll)? {
            return Ok(None);
        }

        let event = event::read().map_err(InputError::Read)?;

        Ok(events::convert_event(event))
    }
}
