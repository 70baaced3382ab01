use std::collections::HashMap;

use quarto::PlayerId;

use crate::{GameResult, GameSummary};

/// Tally of the games between two players, indexed like the players of
/// [`play_game`](crate::play_game).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchStandings {
    pub num_games: usize,
    /// `wins[player_idx][seat]`, where `seat` is the [`PlayerId::index()`] the winner played as.
    ///
    /// Games lost through an illegal move count as wins for the opponent.
    pub wins: [[usize; 2]; 2],
    /// Games lost through an illegal move.
    pub forfeits: [usize; 2],
    pub draws: usize,
    /// Games played as [`PlayerId::One`], i.e. handing out the first piece.
    pub games_as_one: [usize; 2],
}

impl MatchStandings {
    pub fn add(&mut self, summary: &GameSummary) {
        self.num_games += 1;
        for (player_idx, id) in summary.player_ids.into_iter().enumerate() {
            if id == PlayerId::One {
                self.games_as_one[player_idx] += 1;
            }
        }
        match summary.result {
            GameResult::WonByPlayer { player_idx } => self.add_win(summary, player_idx),
            GameResult::Tie => self.draws += 1,
            GameResult::IllegalMoveByPlayer { player_idx, .. } => {
                self.forfeits[player_idx] += 1;
                self.add_win(summary, 1 - player_idx);
            }
        }
    }

    fn add_win(&mut self, summary: &GameSummary, winner_idx: usize) {
        let seat = summary.player_ids[winner_idx].index();
        self.wins[winner_idx][seat] += 1;
    }

    pub fn total_wins(&self, player_idx: usize) -> usize {
        self.wins[player_idx].iter().sum()
    }

    /// A few lines of text with the wins of each player split by seat.
    pub fn report(&self, names: [&str; 2]) -> String {
        let width = names
            .iter()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            .max("draws".len());
        let mut result = format!(
            "{} vs {} after {} games:",
            names[0], names[1], self.num_games
        );
        for player_idx in 0..2 {
            result += &format!(
                "\n  {:<width$} {:>5} wins ({} as player one, {} as player two)",
                names[player_idx],
                self.total_wins(player_idx),
                self.wins[player_idx][PlayerId::One.index()],
                self.wins[player_idx][PlayerId::Two.index()],
            );
            let opponent_forfeits = self.forfeits[1 - player_idx];
            if opponent_forfeits > 0 {
                result += &format!(
                    ", {} through illegal moves by {}",
                    opponent_forfeits,
                    names[1 - player_idx]
                );
            }
        }
        result += &format!("\n  {:<width$} {:>5}", "draws", self.draws);
        result
    }
}

/// The standings of every pair of players in a tournament.
#[derive(Clone, Debug)]
pub struct Tournament {
    nicks: Vec<String>,
    matches: HashMap<(usize, usize), MatchStandings>,
}

impl Tournament {
    pub fn new(nicks: Vec<String>) -> Self {
        Self {
            nicks,
            matches: HashMap::new(),
        }
    }

    /// Store the standings of the match between players `i` and `j`, with `i < j`.
    pub fn insert(&mut self, (i, j): (usize, usize), standings: MatchStandings) {
        debug_assert!(i < j);
        self.matches.insert((i, j), standings);
    }

    /// Wins of `row` against `col`, and the number of games they played.
    fn head_to_head(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        let (pair, player_idx) = if row < col {
            ((row, col), 0)
        } else {
            ((col, row), 1)
        };
        let standings = self.matches.get(&pair)?;
        Some((standings.total_wins(player_idx), standings.num_games))
    }

    /// Wins and games of `player` over all matches, optionally restricted to one seat.
    fn overall(&self, player: usize, seat: Option<PlayerId>) -> (usize, usize) {
        let mut wins = 0;
        let mut games = 0;
        for (&(i, j), standings) in &self.matches {
            let player_idx = if i == player {
                0
            } else if j == player {
                1
            } else {
                continue;
            };
            match seat {
                None => {
                    wins += standings.total_wins(player_idx);
                    games += standings.num_games;
                }
                Some(PlayerId::One) => {
                    wins += standings.wins[player_idx][PlayerId::One.index()];
                    games += standings.games_as_one[player_idx];
                }
                Some(PlayerId::Two) => {
                    wins += standings.wins[player_idx][PlayerId::Two.index()];
                    games += standings.num_games - standings.games_as_one[player_idx];
                }
            }
        }
        (wins, games)
    }

    /// Win rates of each row player against each column player, followed by
    /// the overall win rate and the win rates as player one and as player two.
    pub fn table(&self) -> String {
        let label_width = self
            .nicks
            .iter()
            .map(|nick| nick.chars().count())
            .max()
            .unwrap_or(0);
        let headers: Vec<&str> = self
            .nicks
            .iter()
            .map(String::as_str)
            .chain(["overall", "as one", "as two"])
            .collect();
        let cell_width = headers
            .iter()
            .map(|header| header.chars().count())
            .max()
            .unwrap_or(0)
            .max("100.0%".len());

        let mut lines = vec![table_line(label_width, cell_width, "", &headers[..])];
        for (row, nick) in self.nicks.iter().enumerate() {
            let mut cells: Vec<String> = (0..self.nicks.len())
                .map(|col| match self.head_to_head(row, col) {
                    _ if row == col => String::from("-"),
                    Some((wins, games)) => percentage(wins, games),
                    None => String::from("n/a"),
                })
                .collect();
            for seat in [None, Some(PlayerId::One), Some(PlayerId::Two)] {
                let (wins, games) = self.overall(row, seat);
                cells.push(percentage(wins, games));
            }
            lines.push(table_line(label_width, cell_width, nick, &cells[..]));
        }

        let separator = "-".repeat(lines[0].chars().count());
        lines.insert(1, separator);
        lines.join("\n")
    }
}

fn table_line<S: AsRef<str>>(
    label_width: usize,
    cell_width: usize,
    label: &str,
    cells: &[S],
) -> String {
    let mut line = format!("{:<label_width$} |", label);
    for cell in cells {
        line += &format!(" {:>cell_width$} |", cell.as_ref());
    }
    line
}

fn percentage(wins: usize, games: usize) -> String {
    if games == 0 {
        String::from("n/a")
    } else {
        format!("{:.1}%", wins as f32 / games as f32 * 100.0)
    }
}
