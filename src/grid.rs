use crate::HEIGHT;
use crate::WIDTH;

/// A `HEIGHT` x `WIDTH` field of cells on a torus.
///
/// Row `0` is the top of the screen. Neighbor lookups wrap around both axes independently, so the
/// last column touches the first one and the bottom row touches the top one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: [[bool; WIDTH]; HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an all-dead grid
    pub const fn new() -> Self {
        Self {
            cells: [[false; WIDTH]; HEIGHT],
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(row < HEIGHT, "row is out of bounds");
        assert!(col < WIDTH, "col is out of bounds");

        self.cells[row][col] = alive;
    }

    /// Like `is_alive`, but `row` and `col` are taken modulo the grid size.
    pub fn is_alive_wrapping(&self, row: isize, col: isize) -> bool {
        let row = row.rem_euclid(HEIGHT as isize) as usize;
        let col = col.rem_euclid(WIDTH as isize) as usize;

        self.cells[row][col]
    }

    /// Draw a text pattern onto the grid with its top left corner at (`top`, `left`).
    ///
    /// `@`, `#` and `O` are alive, anything else leaves the cell untouched. Patterns that run past
    /// an edge wrap around to the opposite one.
    pub fn stamp(&mut self, pattern: &[&str], top: usize, left: usize) {
        for (dy, line) in pattern.iter().enumerate() {
            for (dx, c) in line.chars().enumerate() {
                if matches!(c, '@' | '#' | 'O') {
                    let row = (top + dy) % HEIGHT;
                    let col = (left + dx) % WIDTH;

                    self.cells[row][col] = true;
                }
            }
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c).count())
            .sum()
    }

    /// True iff no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|&c| !c))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; WIDTH]> {
        self.cells.iter()
    }

    /// Shift every cell by (`dy`, `dx`), wrapping at the edges.
    pub fn translated(&self, dy: isize, dx: isize) -> Self {
        let mut out = Self::new();

        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                out.cells[row][col] = self.is_alive_wrapping(row as isize - dy, col as isize - dx);
            }
        }

        out
    }
}
