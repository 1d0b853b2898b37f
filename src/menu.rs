use std::io::BufRead;
use std::io::Write;

use crate::seed;

pub const MENU: &str = "\tChoose an option:
1. List of initial configurations;
2. Generate random pattern;
3. Set pattern manually;
4. Exit;
";

/// A few well known patterns, drawn in two phases each
pub const CATALOG: &str = "\tBlock pattern
\t  @@   @@
\t  @@   @@

\tToad pattern
\t @@@    @@@
\t@@@    @@@

\tPulsar pattern
\t  @@@    @@@

\t@    @  @    @
\t@    @  @    @
\t@    @  @    @
\t  @@@    @@@

\t  @@@    @@@
\t@    @  @    @
\t@    @  @    @
\t@    @  @    @

\t  @@@    @@@

\tGlider pattern
\t  @       @
\t   @       @
\t   @       @
\t @@@     @@@

\tSpaceship pattern
\t  @  @     @  @
\t      @        @
\t  @   @    @   @
\t   @@@@     @@@@
";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Choice {
    Catalog,
    Random,
    Manual,
    Exit,
}

/// Parse a menu answer. Only a single digit in `1..=4`, optionally surrounded by whitespace, is
/// accepted.
pub fn parse_choice(answer: &str) -> Option<Choice> {
    match answer.trim() {
        "1" => Some(Choice::Catalog),
        "2" => Some(Choice::Random),
        "3" => Some(Choice::Manual),
        "4" => Some(Choice::Exit),
        _ => None,
    }
}

/// Print the menu and ask until a valid option is picked.
pub fn prompt_choice<R: BufRead, W: Write>(mut input: R, mut out: W) -> anyhow::Result<Choice> {
    write!(out, "{MENU}")?;

    loop {
        write!(out, ">>> ")?;
        out.flush()?;

        match parse_choice(&seed::read_answer(&mut input)?) {
            Some(choice) => return Ok(choice),
            None => writeln!(out, "Invalid option, try again!")?,
        }
    }
}
