//! Guess evaluation and the history table.

use crate::config::Thresholds;
use crate::rank::RankMap;

/// Rank revealed by a hint before any guess has been made.
pub const FIRST_HINT_RANK: usize = 300;

/// Player input after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    GiveUp,
    History,
    Hint,
    Guess(String),
}

impl Command {
    /// Trim and lowercase `input`, then recognize the control words.
    pub fn parse(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "sair" | "quit" => Command::Quit,
            "desisto" | "give up" | "giveup" => Command::GiveUp,
            "historico" | "histórico" | "history" => Command::History,
            "dica" | "hint" => Command::Hint,
            _ => Command::Guess(normalized),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingGuess,
    Won,
    Quit,
}

/// Coarse distance shown next to a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Exact,
    Close,
    Warm,
    Cold,
}

impl Proximity {
    pub fn of(rank: usize, thresholds: Thresholds) -> Self {
        if rank == 1 {
            Proximity::Exact
        } else if rank <= thresholds.close {
            Proximity::Close
        } else if rank <= thresholds.warm {
            Proximity::Warm
        } else {
            Proximity::Cold
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Proximity::Exact => "🏆",
            Proximity::Close => "🟢",
            Proximity::Warm => "🟡",
            Proximity::Cold => "🔴",
        }
    }

    pub fn bar(self) -> &'static str {
        match self {
            Proximity::Exact => "🟩🟩🟩🟩🟩 (you got it!)",
            Proximity::Close => "🟩🟩🟩🟩⬜",
            Proximity::Warm => "🟨🟨⬜⬜⬜",
            Proximity::Cold => "🟥⬜⬜⬜⬜",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub word: String,
    pub rank: usize,
}

/// Result of feeding one line of input to a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    GaveUp { secret: String },
    /// History table requested.
    History,
    Hint { word: String, rank: usize },
    /// The dictionary is too small to give a hint.
    NoHint,
    /// Input was empty.
    Empty,
    UnknownWord(String),
    Repeated(Guess),
    Ranked(Guess),
    Won { secret: String, attempts: usize },
}

/// One game against a fixed secret.
pub struct Game {
    ranks: RankMap,
    thresholds: Thresholds,
    attempts: usize,
    hints: usize,
    /// Kept sorted by rank.
    history: Vec<Guess>,
    state: GameState,
}

impl Game {
    pub fn new(ranks: RankMap, thresholds: Thresholds) -> Self {
        Self {
            ranks,
            thresholds,
            attempts: 0,
            hints: 0,
            history: Vec::new(),
            state: GameState::AwaitingGuess,
        }
    }

    pub fn secret(&self) -> &str {
        self.ranks.secret()
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn hints(&self) -> usize {
        self.hints
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != GameState::AwaitingGuess
    }

    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    pub fn best_rank(&self) -> Option<usize> {
        self.history.first().map(|g| g.rank)
    }

    /// Parse and apply one line of player input.
    pub fn play(&mut self, input: &str) -> Outcome {
        self.apply(Command::parse(input))
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Quit => {
                self.state = GameState::Quit;
                Outcome::Quit
            }
            Command::GiveUp => {
                self.state = GameState::Quit;
                Outcome::GaveUp {
                    secret: self.secret().to_string(),
                }
            }
            Command::History => Outcome::History,
            Command::Hint => self.hint(),
            Command::Guess(word) => self.guess(word),
        }
    }

    fn hint(&mut self) -> Outcome {
        let target = match self.best_rank() {
            Some(best) => (best / 2).max(2),
            None => FIRST_HINT_RANK,
        };
        let rank = target.min(self.ranks.len());
        match self.ranks.word_at(rank) {
            Some(word) if rank > 1 => {
                self.hints += 1;
                Outcome::Hint {
                    word: word.to_string(),
                    rank,
                }
            }
            _ => Outcome::NoHint,
        }
    }

    fn guess(&mut self, word: String) -> Outcome {
        if word.is_empty() {
            return Outcome::Empty;
        }
        let Some(rank) = self.ranks.rank_of(&word) else {
            return Outcome::UnknownWord(word);
        };
        if let Some(prev) = self.history.iter().find(|g| g.word == word) {
            return Outcome::Repeated(prev.clone());
        }

        self.attempts += 1;
        let guess = Guess { word, rank };
        let pos = self.history.partition_point(|g| g.rank < rank);
        self.history.insert(pos, guess.clone());

        if rank == 1 {
            self.state = GameState::Won;
            return Outcome::Won {
                secret: self.secret().to_string(),
                attempts: self.attempts,
            };
        }
        Outcome::Ranked(guess)
    }

    /// Render the history, best guess first.
    pub fn render_history(&self) -> String {
        let mut out = format!("\n--- History ({}) ---\n", self.attempts);
        out.push_str(&format!("{:<10} {:<20} {}\n", "RANK", "WORD", "STATUS"));
        for g in &self.history {
            out.push_str(&self.render_row(g));
            out.push('\n');
        }
        out
    }

    fn render_row(&self, g: &Guess) -> String {
        let p = Proximity::of(g.rank, self.thresholds);
        format!("{} #{:<8} {:<20} {}", p.marker(), g.rank, g.word, p.bar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_normalized() {
        assert_eq!(Command::parse("  SAIR "), Command::Quit);
        assert_eq!(Command::parse("Desisto"), Command::GiveUp);
        assert_eq!(Command::parse("dica"), Command::Hint);
        assert_eq!(Command::parse("history"), Command::History);
        assert_eq!(Command::parse(" Casa\n"), Command::Guess("casa".into()));
    }

    #[test]
    fn proximity_buckets() {
        let t = Thresholds::default();
        assert_eq!(Proximity::of(1, t), Proximity::Exact);
        assert_eq!(Proximity::of(2, t), Proximity::Close);
        assert_eq!(Proximity::of(300, t), Proximity::Close);
        assert_eq!(Proximity::of(301, t), Proximity::Warm);
        assert_eq!(Proximity::of(1500, t), Proximity::Warm);
        assert_eq!(Proximity::of(1501, t), Proximity::Cold);
    }
}
