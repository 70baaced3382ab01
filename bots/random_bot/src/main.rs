use anyhow::Context;
use clap::Parser;
use quarto::{choose_random_piece, Board, Piece, PiecesSet, Placement, PlayerId};
use quarto_bot_utils::Bot;
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _player: PlayerId) {}

    fn select_piece(&mut self, _board: &Board, available: PiecesSet) -> anyhow::Result<Piece> {
        choose_random_piece(available, &mut self.rng).context("No piece left to hand out")
    }

    fn place_piece(
        &mut self,
        board: &Board,
        _piece: Piece,
        _available: PiecesSet,
    ) -> anyhow::Result<Placement> {
        let (row, col) = board
            .empty_cells()
            .choose(&mut self.rng)
            .context("No empty cell left")?;
        Ok(Placement { row, col })
    }
}
