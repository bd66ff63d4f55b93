use std::{sync::Arc, time::Duration};

use audio::{AudioBank, ClipName};
use common::model::{
    game::{outcome, Move},
    round::{RoundState, Score, Snapshot},
};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use super::opponent::Opponent;

/// Time between committing a move and the opponent's reveal.
pub const SUSPENSE_DELAY: Duration = Duration::from_millis(800);
/// Time between the reveal and the outcome sound.
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);

/// Deferred transitions scheduled by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Reveal,
    Evaluate,
}

struct MachineState {
    round: RoundState,
    score: Score,
    /// Bumped on every accepted move and every reset. A scheduled phase only
    /// applies if this still matches the value it was scheduled with.
    generation: u64,
    rounds_started: u64,
    opponent: Box<dyn Opponent>,
}

impl MachineState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.round,
            score: self.score,
            round: self.rounds_started,
        }
    }
}

#[derive(Clone)]
pub struct RoundStateMachine {
    state: Arc<Mutex<MachineState>>,
    audio: Arc<AudioBank>,
    updates: Arc<watch::Sender<Snapshot>>,
    move_sounds: bool,
}

impl RoundStateMachine {
    pub fn new(audio: Arc<AudioBank>, opponent: Box<dyn Opponent>) -> Self {
        let (updates, _) = watch::channel(Snapshot::default());
        RoundStateMachine {
            state: Arc::new(Mutex::new(MachineState {
                round: RoundState::Chant,
                score: Score::default(),
                generation: 0,
                rounds_started: 0,
                opponent,
            })),
            audio,
            updates: Arc::new(updates),
            move_sounds: false,
        }
    }

    /// Also play the opponent's move clip when it is revealed.
    pub fn with_move_sounds(mut self, enabled: bool) -> Self {
        self.move_sounds = enabled;
        self
    }

    /// Commit the player's move. Ignored unless the machine is in `Chant`.
    /// Returns whether the move was accepted.
    pub async fn play_move(&self, value: Move) -> bool {
        let mut state = self.state.lock().await;
        if state.round != RoundState::Chant {
            debug!("Ignoring {:?}, round already in {:?}", value, state.round);
            return false;
        }
        state.generation += 1;
        state.rounds_started += 1;
        state.round = RoundState::Suspense { player_move: value };
        info!("Round {} started with {:?}", state.rounds_started, value);
        self.schedule(SUSPENSE_DELAY, state.generation, Phase::Reveal);
        self.publish(&state);
        true
    }

    /// Back to `Chant` from any state. Pending phases are left to expire.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.round = RoundState::Chant;
        debug!("Reset to Chant (generation {})", state.generation);
        self.publish(&state);
    }

    /// Zero the score without touching the round.
    pub async fn reset_score(&self) {
        let mut state = self.state.lock().await;
        state.score = Score::default();
        info!("Score reset");
        self.publish(&state);
    }

    pub async fn state(&self) -> RoundState {
        self.state.lock().await.round
    }

    pub async fn score(&self) -> Score {
        self.state.lock().await.score
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.snapshot()
    }

    /// Receiver that is marked changed after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    fn publish(&self, state: &MachineState) {
        self.updates.send_replace(state.snapshot());
    }

    fn schedule(&self, delay: Duration, generation: u64, phase: Phase) {
        let machine = self.clone();
        let sleep = tokio::time::sleep(delay);
        tokio::spawn(async move {
            sleep.await;
            machine.fire(generation, phase).await;
        });
    }

    /// Apply a scheduled phase. Returns false, leaving everything untouched,
    /// if the round it was scheduled for is gone.
    pub(crate) async fn fire(&self, generation: u64, phase: Phase) -> bool {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(
                "Dropping stale {:?} (scheduled for {}, now {})",
                phase, generation, state.generation
            );
            return false;
        }
        match (phase, state.round) {
            (Phase::Reveal, RoundState::Suspense { player_move }) => {
                let opponent_move = state.opponent.make_move();
                let outcome = outcome(player_move, opponent_move);
                state.score.record(outcome);
                state.round = RoundState::Revealed {
                    player_move,
                    opponent_move,
                    outcome,
                };
                debug!(
                    "{:?} vs {:?}: {:?}, score {:?}",
                    player_move, opponent_move, outcome, state.score
                );
                if self.move_sounds {
                    self.audio.play(ClipName::from(opponent_move), 1.0);
                }
                self.schedule(REVEAL_DELAY, generation, Phase::Evaluate);
            }
            (
                Phase::Evaluate,
                RoundState::Revealed {
                    player_move,
                    opponent_move,
                    outcome,
                },
            ) => {
                self.audio.play(ClipName::from(outcome), 1.0);
                state.round = RoundState::Evaluated {
                    player_move,
                    opponent_move,
                    outcome,
                };
            }
            (phase, round) => {
                debug!("Dropping {:?}, round is in {:?}", phase, round);
                return false;
            }
        }
        self.publish(&state);
        true
    }

    #[cfg(test)]
    pub(crate) async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }
}
