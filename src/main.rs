use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::IsTerminal;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::execute;
use crossterm::terminal;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use life_term::config::Args;
use life_term::game::Session;
use life_term::grid::Grid;
use life_term::input;
use life_term::input::TerminalKeys;
use life_term::menu;
use life_term::menu::Choice;
use life_term::seed;

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;

            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

fn clear_screen() -> io::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
    )
}

/// Pick the seed. `None` means there is nothing to simulate.
fn load_seed(args: &Args) -> anyhow::Result<Option<Grid>> {
    if let Some(path) = &args.input {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

        return seed::read_rows(BufReader::new(file)).map(Some);
    }

    if args.random {
        return Ok(Some(seed::random_grid(&mut rand::thread_rng())));
    }

    let stdin = io::stdin();

    // Keys are still read from the controlling terminal afterwards
    if !stdin.is_terminal() {
        return seed::read_rows(stdin.lock()).map(Some);
    }

    clear_screen()?;

    let choice = menu::prompt_choice(stdin.lock(), io::stdout())?;
    info!(?choice, "menu");

    match choice {
        Choice::Catalog => {
            print!("{}", menu::CATALOG);
            Ok(None)
        }
        Choice::Exit => Ok(None),
        Choice::Random => {
            clear_screen()?;
            Ok(Some(seed::random_grid(&mut rand::thread_rng())))
        }
        Choice::Manual => {
            clear_screen()?;
            seed::prompt_cells(stdin.lock(), io::stdout()).map(Some)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let Some(seed) = load_seed(&args)? else {
        return Ok(());
    };

    input::install_panic_hook();

    // Raw mode lasts as long as the session
    let keys = TerminalKeys::acquire();
    let mut session = Session::new(seed, keys, io::stdout()).final_pause(args.final_pause());

    session.run();

    // The first frame clears the screen, so say it again once the session is over
    let (keys, _) = session.into_parts();
    if let Some(e) = keys.setup_error() {
        warn!("{e}. Keyboard controls were disabled for this session");
    }

    Ok(())
}
