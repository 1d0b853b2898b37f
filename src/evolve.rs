use crate::HEIGHT;
use crate::WIDTH;
use crate::grid::Grid;

/// Birth and survival sets of Conway's Game of Life, `b3/s23`.
///
/// Bit `i` being set means a cell with `i` live neighbors is born (resp. survives).
///
/// See: https://conwaylife.com/wiki/Rulestring
const BIRTHS: u16 = 0b0000_1000;
const SURVIVALS: u16 = 0b0000_1100;

/// Offsets of the 8 neighbors, expressed as additions modulo the grid size so that no signed
/// arithmetic is needed.
const ROW_OFFSETS: [usize; 3] = [HEIGHT - 1, 0, 1];
const COL_OFFSETS: [usize; 3] = [WIDTH - 1, 0, 1];

/// Count the live neighbors of (`row`, `col`), wrapping around both axes.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut n = 0;

    for dr in ROW_OFFSETS {
        for dc in COL_OFFSETS {
            if dr == 0 && dc == 0 {
                continue;
            }

            if grid.is_alive((row + dr) % HEIGHT, (col + dc) % WIDTH) {
                n += 1;
            }
        }
    }

    n
}

/// State of a cell in the next generation.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    let n: u16 = 1 << neighbors;

    if alive {
        SURVIVALS & n == n
    } else {
        BIRTHS & n == n
    }
}

/// Compute the next generation.
///
/// Every cell is read from `grid` and written to a fresh buffer, so all neighbor counts come from
/// the prior generation.
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::new();

    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let alive = grid.is_alive(row, col);
            let neighbors = live_neighbors(grid, row, col);

            if next_state(alive, neighbors) {
                next.set(row, col, true);
            }
        }
    }

    next
}
