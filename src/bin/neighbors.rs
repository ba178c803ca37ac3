use clap::Parser;
use contexto::{
    cli::StoreArgs,
    io_utils::{contexto_cli_error, io_cli_error, simple_cli_error},
    logging, neighbors, open_cached_store,
};

/// Print the words closest in meaning to WORD.
#[derive(Parser)]
struct Args {
    /// Word to inspect
    word: String,

    /// Number of neighbours to show
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    store: StoreArgs,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.store.verbose);
    let config = args.store.to_config();
    let word = args.word.trim().to_lowercase();

    std::fs::metadata(&config.cache_path).map_err(|e| {
        io_cli_error(
            "opening cache file (run `contexto build` first)",
            &config.cache_path,
            e,
        )
    })?;
    let store =
        open_cached_store(&config).map_err(|e| contexto_cli_error("loading dictionary", e))?;
    let list = neighbors(&store, &word, args.top)
        .map_err(|e| contexto_cli_error("finding neighbours", e))?;

    if args.json {
        let out = serde_json::json!({
            "word": word,
            "model": config.model.id(),
            "neighbors": list,
        });
        let text = serde_json::to_string_pretty(&out)
            .map_err(|e| simple_cli_error(&format!("encoding JSON: {e}")))?;
        println!("{text}");
    } else {
        println!("\n--- Neighbours of '{}' ---", word.to_uppercase());
        for n in &list {
            println!("#{} {:<15} (similarity: {:.4})", n.rank, n.word, n.score);
        }
    }
    Ok(())
}
