//! `rsvp`: read a text file one word at a time.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rsvp::terminal::{install_panic_hook, Terminal, TerminalDisplay};
use rsvp::{logging, App, Cli, ReaderConfig, SystemClock, TerminalInput, Tokens};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_file_logger(&cli.log_file, cli.log_level)
        .with_context(|| format!("cannot log to {}", cli.log_file.display()))?;

    let config = ReaderConfig::try_from(cli).context("invalid configuration")?;
    info!(
        "Start reading speed {} words per minute",
        config.words_per_minute
    );

    let tokens = Tokens::load(&config.text_path)
        .with_context(|| format!("cannot open {}", config.text_path.display()))?;
    info!("{} words in {}", tokens.len(), config.text_path.display());

    install_panic_hook();
    let terminal =
        Terminal::enter(config.alternate_screen).context("cannot set up the terminal")?;
    let display = TerminalDisplay::stdout().context("cannot query the terminal size")?;
    let input = TerminalInput::spawn(terminal.reports_key_release())
        .context("cannot start the input thread")?;

    let mut app = App::new(config, tokens, SystemClock, display, input)
        .context("cannot load the font")?;
    app.run();

    // Fonts go first, then the terminal comes back.
    drop(app);
    drop(terminal);
    info!("Stop reading");
    Ok(())
}
