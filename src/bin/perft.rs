use anyhow::{Context, Result};
use clap::Parser;
use lacuna::movegen::{perft, perft_divide};
use lacuna::BoardState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Count leaf nodes of the legal move tree", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Moves applied to the initial position first, e.g. "Nd4 Ne3"
    #[arg(short, long, default_value = "")]
    opening: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    lacuna::init();

    let mut state = BoardState::initial();
    for notation in args.opening.split_whitespace() {
        let mv = state
            .parse_move(notation)
            .with_context(|| format!("opening move {notation}"))?;
        state = state.perform(mv);
    }

    println!("Running perft at depth {}", args.depth);
    print!("{state}");

    let start = std::time::Instant::now();
    let divide = perft_divide(&state, args.depth);
    for (mv, nodes) in &divide {
        println!("{mv}: {nodes}");
    }
    let nodes: u64 = if args.depth == 0 {
        perft(&state, 0)
    } else {
        divide.iter().map(|(_, n)| n).sum()
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
    Ok(())
}
