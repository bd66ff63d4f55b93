use common::model::game::Move;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub trait Opponent: Send {
    fn make_move(&mut self) -> Move;
}

/// Uniform over the three moves.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        RandomOpponent {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomOpponent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn make_move(&mut self) -> Move {
        Move::ALL[self.rng.gen_range(0..Move::ALL.len())]
    }
}

/// Cycles through a fixed list of moves. Used to pin outcomes in tests.
pub struct ScriptedOpponent {
    moves: Vec<Move>,
    next: usize,
}

impl ScriptedOpponent {
    pub fn new(moves: Vec<Move>) -> Self {
        ScriptedOpponent { moves, next: 0 }
    }

    pub fn always(value: Move) -> Self {
        Self::new(vec![value])
    }
}

impl Opponent for ScriptedOpponent {
    fn make_move(&mut self) -> Move {
        let Some(value) = self.moves.get(self.next % self.moves.len().max(1)) else {
            return Move::Rock;
        };
        self.next += 1;
        *value
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn random_is_roughly_uniform() {
        let mut opponent = RandomOpponent::seeded(7);
        let draws = 30_000;
        let mut counts: HashMap<Move, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(opponent.make_move()).or_default() += 1;
        }
        assert_eq!(counts.len(), 3);
        for value in Move::ALL {
            let share = counts[&value] as f64 / draws as f64;
            assert!(
                (share - 1.0 / 3.0).abs() < 0.02,
                "{:?} drawn {}",
                value,
                share
            );
        }
    }

    #[test]
    fn seeded_draws_repeat() {
        let mut a = RandomOpponent::seeded(42);
        let mut b = RandomOpponent::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.make_move(), b.make_move());
        }
    }

    #[test]
    fn scripted_cycles() {
        let mut opponent = ScriptedOpponent::new(vec![Move::Paper, Move::Scissors]);
        let drawn: Vec<Move> = (0..5).map(|_| opponent.make_move()).collect();
        assert_eq!(
            drawn,
            vec![
                Move::Paper,
                Move::Scissors,
                Move::Paper,
                Move::Scissors,
                Move::Paper
            ]
        );
        assert_eq!(ScriptedOpponent::new(vec![]).make_move(), Move::Rock);
    }
}
