use std::io;

use clap::{Parser, Subcommand};
use contexto::{
    cli::{PlayArgs, StoreArgs},
    io_utils::{contexto_cli_error, simple_cli_error},
    logging, new_game, open_store, repl,
};

/// Guess the secret word; every guess is ranked by meaning.
#[derive(Parser)]
#[command(name = "contexto", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Cmd>,

    #[command(flatten)]
    store: StoreArgs,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play one game (the default)
    Play,
    /// Build the encoded dictionary cache without playing
    Build {
        /// Rebuild even when a valid cache exists
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.store.verbose);
    let config = cli.play.apply(cli.store.to_config());

    match cli.command.unwrap_or(Cmd::Play) {
        Cmd::Build { force } => {
            let store = open_store(&config, force)
                .map_err(|e| contexto_cli_error("building dictionary", e))?;
            println!(
                "{} words x {} dimensions cached in '{}'",
                store.len(),
                store.dim(),
                config.cache_path.display()
            );
        }
        Cmd::Play => {
            let store = open_store(&config, false)
                .map_err(|e| contexto_cli_error("loading dictionary", e))?;
            let mut game =
                new_game(&config, &store).map_err(|e| contexto_cli_error("starting game", e))?;
            let stdin = io::stdin();
            repl::run(&mut game, stdin.lock(), io::stdout().lock())
                .map_err(|e| simple_cli_error(&format!("terminal error: {e}")))?;
        }
    }
    Ok(())
}
