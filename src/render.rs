use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;

use crate::HEIGHT;
use crate::WIDTH;
use crate::game::Termination;
use crate::grid::Grid;

/// Fills the outer frame
pub const BORDER: char = '-';

pub const ALIVE: char = '@';
pub const DEAD: char = ' ';

/// Lines in a rendered frame, border included
pub const FRAME_HEIGHT: usize = HEIGHT + 2;

/// Characters per line of a rendered frame, border included
pub const FRAME_WIDTH: usize = WIDTH + 2;

/// Turns a grid into a bordered text frame.
///
/// The frame buffer is kept between calls so drawing does not allocate.
pub struct Renderer {
    fb: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        // Every character is ascii, plus one newline per line
        Self {
            fb: String::with_capacity(FRAME_HEIGHT * (FRAME_WIDTH + 1)),
        }
    }

    /// Draw `grid` and return the frame, one line per row, each terminated by `\n`.
    pub fn render(&mut self, grid: &Grid) -> &str {
        self.fb.clear();

        self.push_border_line();

        for row in grid.rows() {
            self.fb.push(BORDER);
            for &alive in row {
                self.fb.push(if alive { ALIVE } else { DEAD });
            }
            self.fb.push(BORDER);
            self.fb.push('\n');
        }

        self.push_border_line();

        &self.fb
    }

    fn push_border_line(&mut self) {
        for _ in 0..FRAME_WIDTH {
            self.fb.push(BORDER);
        }
        self.fb.push('\n');
    }
}

/// Line shown under every running frame
pub fn status_line(generation: u64) -> String {
    format!("Generation steps: {generation}")
}

/// The two lines shown once the session is over
pub fn summary(reason: Termination, generations: u64) -> [String; 2] {
    [
        format!("Game of Life is over! {reason}."),
        format!("Total number of generation steps: {generations}"),
    ]
}

/// Writes frames to a terminal.
///
/// Lines are separated with cursor movements rather than newlines, which keep working once the
/// terminal is in raw mode.
pub struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clear the display and draw `frame` followed by `footer`.
    pub fn draw<S: AsRef<str>>(&mut self, frame: &str, footer: &[S]) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in frame.lines() {
            queue!(self.out, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        for line in footer {
            queue!(
                self.out,
                style::Print(line.as_ref()),
                cursor::MoveToNextLine(1)
            )?;
        }

        self.out.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
