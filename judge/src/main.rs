use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{play_game, GameResult, MatchStandings, Player, PlayerConfig, Tournament};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Let Quarto bots play against each other.
#[derive(Parser)]
struct Args {
    /// Player config JSON files, each with a "nick" and a "cmd" to start the bot
    #[arg(num_args = 2.., required = true)]
    player_configs: Vec<PathBuf>,

    /// Games per pair of players. Seats are drawn at random for each game.
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed for the seat draws
    #[arg(long)]
    seed: Option<u64>,

    /// End a pairing after the first game lost through an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn play_pairing(
    players: [&mut Player; 2],
    args: &Args,
    rng: &mut StdRng,
) -> anyhow::Result<MatchStandings> {
    let [player_1, player_2] = players;
    let mut standings = MatchStandings::default();

    for game_idx in 0..args.num_games {
        let summary = play_game(rng, player_1, player_2)?;
        let names = [&player_1.name, &player_2.name];
        match &summary.result {
            GameResult::WonByPlayer { player_idx } => {
                let seat = summary.player_ids[*player_idx];
                debug!(game_idx, winner = %names[*player_idx], %seat, "Win");
            }
            GameResult::Tie => debug!(game_idx, "Draw"),
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                let causes: Vec<String> =
                    std::iter::successors(Some(err as &dyn Error), |&err| err.source())
                        .map(|err| err.to_string())
                        .collect();
                warn!(game_idx, player = %names[*player_idx], "Illegal move: {}", causes.join(": "));
            }
        }
        standings.add(&summary);

        let forfeited = matches!(summary.result, GameResult::IllegalMoveByPlayer { .. });
        if forfeited && args.stop_on_illegal_move {
            break;
        }
    }

    Ok(standings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<anyhow::Result<Vec<PlayerConfig>>>()?;

    let mut tournament = Tournament::new(
        player_configs
            .iter()
            .map(|config| config.nick.clone())
            .collect(),
    );
    for (i, j) in (0..player_configs.len()).tuple_combinations() {
        let mut player_1 = Player::from_config(&player_configs[i])?;
        let mut player_2 = Player::from_config(&player_configs[j])?;

        let standings = play_pairing([&mut player_1, &mut player_2], &args, &mut rng)?;
        println!("{}\n", standings.report([player_1.name.as_str(), player_2.name.as_str()]));

        player_1.say_bye()?;
        player_2.say_bye()?;
        tournament.insert((i, j), standings);
    }

    if player_configs.len() > 2 {
        println!("Win rates of each row player:\n\n{}", tournament.table());
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Results go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
