use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

/// Everything the keyboard can ask of a running session
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    /// End the session after the current step
    Quit,

    /// Lengthen the frame delay
    SlowDown,

    /// Shorten the frame delay
    SpeedUp,

    /// Go back to the default frame delay
    ResetSpeed,

    /// Ctrl-C, Ctrl-Z or Ctrl-\. With the terminal in raw mode these arrive as keys instead of
    /// signals. They flush the output and are otherwise ignored.
    Interrupt,
}

/// Converts a crossterm event into a session control, if it maps to one
pub fn convert_event(event: CtEvent) -> Option<Control> {
    match event {
        CtEvent::Key(key_event) => convert_key(key_event),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Control> {
    // Some platforms report releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match key_event {
        KeyEvent {
            // Ctrl-\ is reported as Ctrl-4 by some terminals
            code: KeyCode::Char('c' | 'z' | '\\' | '4'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Control::Interrupt),
        KeyEvent {
            code: KeyCode::Char('q' | 'Q'),
            ..
        } => Some(Control::Quit),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Some(Control::SlowDown),
        KeyEvent {
            code: KeyCode::Char('+'),
            ..
        } => Some(Control::SpeedUp),
        KeyEvent {
            code: KeyCode::Char('='),
            ..
        } => Some(Control::ResetSpeed),
        _ => None,
    }
}
