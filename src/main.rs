//! lacuna self-play driver.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lacuna::{BoardState, Search, SearchParams};

#[derive(Parser, Debug)]
#[command(author, version, about = "Self-play on the 7x7 hole board", long_about = None)]
struct Args {
    /// Search depth in plies (overrides the config file)
    #[arg(short, long)]
    depth: Option<u8>,

    /// TOML file with search parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Moves played before the engine takes over, e.g. "Nd4 Ne3"
    #[arg(short, long, default_value = "")]
    opening: String,

    /// Stop after this many plies
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);
    lacuna::init();

    let mut params = match &args.config {
        Some(path) => SearchParams::load(path)
            .with_context(|| format!("loading search parameters from {}", path.display()))?,
        None => SearchParams::default(),
    };
    if let Some(depth) = args.depth {
        params = params.max_depth(depth);
    }
    params.validate().context("invalid search parameters")?;
    log::info!(
        "depth {}, extension budget {}, {} table slots",
        params.max_depth,
        params.extension_budget,
        params.tt_entries
    );

    let mut state = BoardState::initial();
    let mut ply = 0u32;
    for notation in args.opening.split_whitespace() {
        let mv = state
            .parse_move(notation)
            .with_context(|| format!("opening move {} (ply {})", notation, ply + 1))?;
        println!("{mv}");
        state = state.perform(mv);
        ply += 1;
    }

    let depth = params.max_depth;
    let mut search = Search::new(params);
    print!("{state}");

    while ply < args.max_plies {
        let Some(mv) = search.best_move_with(&state, depth, |info| {
            print!(
                "  Depth: {}  Value: {}  Best: {}",
                info.depth,
                info.value,
                info.best_move.map(|m| m.to_string()).unwrap_or_else(|| "--".into())
            );
            if let Some(n) = info.mate_in {
                print!("  Mate in {n}");
            }
            println!("  Nodes: {}", info.nodes);
        }) else {
            break;
        };
        println!("{mv}");
        state = state.perform(mv);
        ply += 1;
        print!("{state}");
    }

    // the side to move is the one that ran out of moves
    let mover = if ply % 2 == 0 { "first player" } else { "second player" };
    if !state.is_game_over() {
        println!("Stopped after {ply} plies");
    } else if state.royal_attacked() {
        println!("{mover} loses after {ply} plies");
    } else {
        println!("Draw after {ply} plies, {mover} has no move");
    }
    Ok(())
}
