use serde::{Deserialize, Serialize};

use super::game::{Move, Outcome};

/// Phase of the current round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "type")]
pub enum RoundState {
    #[default]
    Chant,
    Suspense {
        player_move: Move,
    },
    Revealed {
        player_move: Move,
        opponent_move: Move,
        outcome: Outcome,
    },
    Evaluated {
        player_move: Move,
        opponent_move: Move,
        outcome: Outcome,
    },
}

impl RoundState {
    pub fn player_move(&self) -> Option<Move> {
        match self {
            RoundState::Chant => None,
            RoundState::Suspense { player_move }
            | RoundState::Revealed { player_move, .. }
            | RoundState::Evaluated { player_move, .. } => Some(*player_move),
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            RoundState::Revealed { outcome, .. } | RoundState::Evaluated { outcome, .. } => {
                Some(*outcome)
            }
            _ => None,
        }
    }
}

/// Cumulative wins as `(player, opponent)`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    /// Credit at most one side. Ties leave the score untouched.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.player += 1,
            Outcome::Lose => self.opponent += 1,
            Outcome::Tie => {}
        }
    }
}

/// What the presentation layer reads after each mutation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub state: RoundState,
    pub score: Score,
    /// Rounds started since construction.
    pub round: u64,
}
