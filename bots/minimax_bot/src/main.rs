use anyhow::Context;
use clap::Parser;
use quarto::{Board, Piece, PiecesSet, Placement, PlayerId, QuartoAi, DEFAULT_MAX_DEPTH};
use quarto_bot_utils::Bot;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many plies to search for each placement
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: u32,

    /// RNG seed, used for piece selection and for the pieces imagined during search
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

struct MinimaxBot {
    ai: QuartoAi<StdRng>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, depth = args.depth, "Starting");
    let ai = QuartoAi::new(args.depth, StdRng::seed_from_u64(seed));
    MinimaxBot { ai }.run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout is reserved for talking to the judge
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

impl Bot for MinimaxBot {
    fn new_game(&mut self, player: PlayerId) {
        debug!(%player, "New game");
    }

    fn select_piece(&mut self, board: &Board, available: PiecesSet) -> anyhow::Result<Piece> {
        trace!("Selecting from {} for\n{}", available, board);
        let piece = self
            .ai
            .choose_piece(available)
            .context("No piece left to hand out")?;
        debug!(%piece, "Selected piece");
        Ok(piece)
    }

    fn place_piece(
        &mut self,
        board: &Board,
        piece: Piece,
        _available: PiecesSet,
    ) -> anyhow::Result<Placement> {
        trace!("Placing {} on\n{}", piece, board);
        let (row, col) = self
            .ai
            .best_placement(board, piece)
            .context("No empty cell left")?;
        Ok(Placement { row, col })
    }
}
