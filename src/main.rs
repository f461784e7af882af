//! Interactive user database manager, reads commands from stdin.
//!
//! Logging goes to stderr, set `RUST_LOG` to see more than warnings.

use udms::repl::Repl;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .without_timestamps()
        .init()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut repl = Repl::new(stdin.lock(), stdout.lock());
    repl.run()?;
    Ok(())
}
