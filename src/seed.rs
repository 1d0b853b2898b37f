use std::io::BufRead;
use std::io::Write;

use anyhow::Context;
use anyhow::bail;
use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::HEIGHT;
use crate::WIDTH;
use crate::grid::Grid;
use crate::render::Renderer;

/// Fill every cell independently, alive with probability 1/2.
pub fn random_grid<R: Rng>(rng: &mut R) -> Grid {
    let mut grid = Grid::new();

    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            grid.set(row, col, rng.gen_bool(0.5));
        }
    }

    grid
}

/// Read a grid one row per line, one cell per character.
///
/// A character's value is `c - '0'` and only `1` is alive. Characters with any other value are
/// dead, and rows or columns past the grid are ignored, both with a warning.
pub fn read_rows<R: BufRead>(input: R) -> anyhow::Result<Grid> {
    let mut grid = Grid::new();
    let mut odd_chars = false;
    let mut overflow = false;

    for (row, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", row + 1))?;

        if row >= HEIGHT {
            overflow |= !line.is_empty();
            continue;
        }

        for (col, c) in line.trim_end_matches('\r').chars().enumerate() {
            if col >= WIDTH {
                overflow = true;
                break;
            }

            let value = c as i64 - '0' as i64;
            odd_chars |= value != 0 && value != 1;

            grid.set(row, col, value == 1);
        }
    }

    if odd_chars {
        warn!("Input contains characters other than '0' and '1', treating them as dead cells");
    }

    if overflow {
        warn!("Input is larger than {WIDTH}x{HEIGHT}, extra cells were dropped");
    }

    Ok(grid)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid number of cells, try again!")]
    CellCount,

    #[error("Invalid coordinates, try again!")]
    Coordinates,
}

/// Parse the answer to "how many cells", in `1..=WIDTH * HEIGHT`.
pub fn parse_cell_count(answer: &str) -> Result<usize, ValidationError> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=WIDTH * HEIGHT).contains(&n) => Ok(n),
        _ => Err(ValidationError::CellCount),
    }
}

/// Parse `x, y` with the origin in the bottom left corner and return the (`row`, `col`) it names.
pub fn parse_coordinates(answer: &str) -> Result<(usize, usize), ValidationError> {
    let Some((x, y)) = answer.split_once(',') else {
        return Err(ValidationError::Coordinates);
    };

    let (Ok(x), Ok(y)) = (x.trim().parse::<usize>(), y.trim().parse::<usize>()) else {
        return Err(ValidationError::Coordinates);
    };

    if x >= WIDTH || y >= HEIGHT {
        return Err(ValidationError::Coordinates);
    }

    Ok((HEIGHT - 1 - y, x))
}

/// Read one line, failing on end of input
pub(crate) fn read_answer<R: BufRead>(input: &mut R) -> anyhow::Result<String> {
    let mut answer = String::new();

    if input.read_line(&mut answer).context("Failed to read answer")? == 0 {
        bail!("Input closed")
    }

    Ok(answer)
}

/// Ask for a number of cells, then for each cell's coordinates, redrawing the field after every
/// accepted cell. Invalid answers are reported and asked again.
pub fn prompt_cells<R: BufRead, W: Write>(mut input: R, mut out: W) -> anyhow::Result<Grid> {
    let mut grid = Grid::new();
    let mut renderer = Renderer::new();

    let mut remaining = loop {
        write!(out, "Type in the number of cells in a pattern: ")?;
        out.flush()?;

        match parse_cell_count(&read_answer(&mut input)?) {
            Ok(n) => break n,
            Err(e) => writeln!(out, "{e}")?,
        }
    };

    write!(out, "{}", renderer.render(&grid))?;

    while remaining > 0 {
        write!(out, "Type in the coordinates in a format x, y: ")?;
        out.flush()?;

        match parse_coordinates(&read_answer(&mut input)?) {
            Ok((row, col)) => {
                grid.set(row, col, true);
                remaining -= 1;

                write!(out, "{}", renderer.render(&grid))?;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_read_rows() -> anyhow::Result<()> {
        let grid = read_rows(Cursor::new("010\n001\n111\n"))?;

        assert!(grid.is_alive(0, 1));
        assert!(grid.is_alive(1, 2));
        assert!(grid.is_alive(2, 0));
        assert!(grid.is_alive(2, 1));
        assert!(grid.is_alive(2, 2));
        assert_eq!(grid.population(), 5);

        Ok(())
    }

    #[test]
    fn test_read_rows_short_and_odd_lines() -> anyhow::Result<()> {
        let grid = read_rows(Cursor::new("1\r\n\nx21\n"))?;

        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(2, 2));
        assert_eq!(grid.population(), 2);

        Ok(())
    }

    #[test]
    fn test_read_rows_drops_overflow() -> anyhow::Result<()> {
        let wide = "1".repeat(WIDTH + 5);
        let input = format!("{wide}\n").repeat(HEIGHT + 3);

        let grid = read_rows(Cursor::new(input))?;

        assert_eq!(grid.population(), WIDTH * HEIGHT);

        Ok(())
    }

    #[test]
    fn test_random_grid_is_seeded() {
        let a = random_grid(&mut StdRng::seed_from_u64(7));
        let b = random_grid(&mut StdRng::seed_from_u64(7));

        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert!(a.population() < WIDTH * HEIGHT);
    }

    #[test]
    fn test_parse_cell_count() {
        assert_eq!(parse_cell_count(" 3 \n"), Ok(3));
        assert_eq!(parse_cell_count("2000"), Ok(2000));
        assert_eq!(parse_cell_count("0"), Err(ValidationError::CellCount));
        assert_eq!(parse_cell_count("2001"), Err(ValidationError::CellCount));
        assert_eq!(parse_cell_count("-1"), Err(ValidationError::CellCount));
        assert_eq!(parse_cell_count("3 4"), Err(ValidationError::CellCount));
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("0, 0"), Ok((HEIGHT - 1, 0)));
        assert_eq!(parse_coordinates("79,24\n"), Ok((0, WIDTH - 1)));
        assert_eq!(parse_coordinates("5, 3"), Ok((HEIGHT - 4, 5)));
        assert_eq!(parse_coordinates("80, 0"), Err(ValidationError::Coordinates));
        assert_eq!(parse_coordinates("0, 25"), Err(ValidationError::Coordinates));
        assert_eq!(parse_coordinates("1 2"), Err(ValidationError::Coordinates));
        assert_eq!(parse_coordinates("a, 2"), Err(ValidationError::Coordinates));
        assert_eq!(parse_coordinates("1, 2 x"), Err(ValidationError::Coordinates));
    }

    #[test]
    fn test_prompt_cells_reprompts() -> anyhow::Result<()> {
        let answers = "zero\n2\n99, 0\n0, 0\n79, 24\n";
        let mut out = Vec::new();

        let grid = prompt_cells(Cursor::new(answers), &mut out)?;

        assert!(grid.is_alive(HEIGHT - 1, 0));
        assert!(grid.is_alive(0, WIDTH - 1));
        assert_eq!(grid.population(), 2);

        let out = String::from_utf8(out)?;
        assert_eq!(out.matches("Invalid number of cells, try again!").count(), 1);
        assert_eq!(out.matches("Invalid coordinates, try again!").count(), 1);

        Ok(())
    }

    #[test]
    fn test_prompt_cells_input_closed() {
        let res = prompt_cells(Cursor::new("3\n1, 1\n"), Vec::new());

        assert!(res.is_err());
    }
}
