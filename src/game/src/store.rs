use std::sync::Arc;

use audio::{AudioBank, ClipSources, LogSink, PlaybackSink};
use common::model::{
    game::Move,
    round::{RoundState, Score, Snapshot},
};
use tokio::sync::watch;
use tracing::info;

use crate::{
    config::GameConfig,
    service::{
        opponent::{Opponent, RandomOpponent},
        round_machine::RoundStateMachine,
    },
};

/// Owns the session: one audio bank and one round machine driving it.
/// Presentation calls in through `play_move`/`reset` and reads back through
/// `snapshot` or `subscribe`.
pub struct GameStore {
    machine: RoundStateMachine,
    audio: Arc<AudioBank>,
}

impl GameStore {
    /// Start loading the configured clips and set up a random opponent. Must be
    /// called from inside a tokio runtime.
    pub fn new(config: &GameConfig, sink: Arc<dyn PlaybackSink>) -> Self {
        Self::from_parts(
            config.clip_sources(),
            config,
            sink,
            Box::new(RandomOpponent::new()),
        )
    }

    /// Same as [`GameStore::new`] with playback going to the log.
    pub fn headless(config: &GameConfig) -> Self {
        Self::new(config, Arc::new(LogSink))
    }

    pub fn from_parts(
        sources: ClipSources,
        config: &GameConfig,
        sink: Arc<dyn PlaybackSink>,
        opponent: Box<dyn Opponent>,
    ) -> Self {
        info!(
            "Loading {} clips (master volume {:.2})",
            sources.configured().count(),
            config.master_volume
        );
        let audio = Arc::new(AudioBank::load(sources, sink, config.master_volume));
        let machine =
            RoundStateMachine::new(audio.clone(), opponent).with_move_sounds(config.move_sounds);
        GameStore { machine, audio }
    }

    pub async fn play_move(&self, value: Move) -> bool {
        self.machine.play_move(value).await
    }

    pub async fn reset(&self) {
        self.machine.reset().await
    }

    pub async fn reset_score(&self) {
        self.machine.reset_score().await
    }

    pub async fn state(&self) -> RoundState {
        self.machine.state().await
    }

    pub async fn score(&self) -> Score {
        self.machine.score().await
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.machine.snapshot().await
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.machine.subscribe()
    }

    pub fn audio(&self) -> &AudioBank {
        &self.audio
    }
}

#[cfg(test)]
mod tests {
    use audio::{ClipName, RecordingSink};
    use common::model::game::Outcome;

    use super::*;
    use crate::{
        service::{
            opponent::ScriptedOpponent,
            round_machine::{REVEAL_DELAY, SUSPENSE_DELAY},
        },
        test::{elapse, sources, TestCase},
    };

    fn data(name: &str) -> String {
        env!("CARGO_MANIFEST_DIR").to_string() + "/test/data/" + name
    }

    #[tokio::test(start_paused = true)]
    async fn full_round() {
        for (opponent, result) in [("Rock", "Win"), ("Scissors", "Lose"), ("Paper", "Tie")] {
            let clip = result.to_lowercase();
            let (player, opponent_score) = match result {
                "Win" => (1, 0),
                "Lose" => (0, 1),
                _ => (0, 0),
            };
            let replacements = vec![
                ("opponent_move", opponent.to_string()),
                ("outcome", result.to_string()),
                ("clip", clip),
                ("player_score", player.to_string()),
                ("opponent_score", opponent_score.to_string()),
            ];
            TestCase::load(data("full_round.json"), replacements)
                .run()
                .await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn double_commit() {
        TestCase::load(data("double_commit.json"), Vec::<(String, String)>::new())
            .run()
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn reset_during_suspense() {
        TestCase::load(
            data("reset_during_suspense.json"),
            Vec::<(String, String)>::new(),
        )
        .run()
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn several_rounds() {
        TestCase::load(data("several_rounds.json"), Vec::<(String, String)>::new())
            .run()
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn random_opponent_round_is_consistent() {
        let sink = Arc::new(RecordingSink::new());
        let store = GameStore::from_parts(
            sources(),
            &GameConfig::default(),
            sink.clone(),
            Box::new(RandomOpponent::seeded(11)),
        );
        store.audio().wait_loaded().await;

        store.play_move(Move::Paper).await;
        assert_eq!(
            store.state().await,
            RoundState::Suspense {
                player_move: Move::Paper
            }
        );
        elapse(SUSPENSE_DELAY).await;
        let RoundState::Revealed {
            player_move,
            opponent_move,
            outcome,
        } = store.state().await
        else {
            panic!("Expected Revealed");
        };
        assert_eq!(player_move, Move::Paper);
        assert_eq!(
            outcome,
            common::model::game::outcome(Move::Paper, opponent_move)
        );
        let mut expected = Score::default();
        expected.record(outcome);
        assert_eq!(store.score().await, expected);

        elapse(REVEAL_DELAY).await;
        assert_eq!(
            store.state().await,
            RoundState::Evaluated {
                player_move,
                opponent_move,
                outcome
            }
        );
        assert_eq!(sink.names(), vec![ClipName::from(outcome)]);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_clips_keep_game_running() {
        let sink = Arc::new(RecordingSink::new());
        let store = GameStore::from_parts(
            ClipSources::new(),
            &GameConfig::default(),
            sink.clone(),
            Box::new(ScriptedOpponent::always(Move::Rock)),
        );
        store.play_move(Move::Paper).await;
        elapse(SUSPENSE_DELAY + REVEAL_DELAY).await;
        assert_eq!(store.state().await.outcome(), Some(Outcome::Win));
        assert!(sink.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn headless_store_plays_a_round() {
        let config = GameConfig::from_json(r#"{"clips": {}}"#).unwrap();
        let store = GameStore::headless(&config);
        store.audio().wait_loaded().await;
        assert!(store.play_move(Move::Rock).await);
        elapse(SUSPENSE_DELAY + REVEAL_DELAY).await;
        assert!(matches!(
            store.state().await,
            RoundState::Evaluated { .. }
        ));
        assert_eq!(store.snapshot().await.round, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn new_with_default_config_loads_nothing_playable() {
        // Default paths point at files that aren't there in tests
        let sink = Arc::new(RecordingSink::new());
        let store = GameStore::new(&GameConfig::default(), sink.clone());
        store.audio().wait_loaded().await;
        assert_eq!(store.audio().ready_count(), 0);
        assert_eq!(store.snapshot().await, Snapshot::default());
    }
}
