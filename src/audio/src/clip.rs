use std::{
    io::Cursor,
    ops::{Index, IndexMut},
    sync::Arc,
    time::Duration,
};

use common::model::game::{Move, Outcome};
use hound::{SampleFormat, WavReader};
use serde::{Deserialize, Serialize};

use crate::error::{AudioError, Result};

/// Every sound the game can ask for. The set is closed, so each name owns a
/// fixed slot in a [`ClipTable`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClipName {
    Win,
    Lose,
    Tie,
    Rock,
    Paper,
    Scissors,
}

impl ClipName {
    pub const COUNT: usize = 6;
    pub const ALL: [ClipName; ClipName::COUNT] = [
        ClipName::Win,
        ClipName::Lose,
        ClipName::Tie,
        ClipName::Rock,
        ClipName::Paper,
        ClipName::Scissors,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClipName::Win => "win",
            ClipName::Lose => "lose",
            ClipName::Tie => "tie",
            ClipName::Rock => "rock",
            ClipName::Paper => "paper",
            ClipName::Scissors => "scissors",
        }
    }
}

impl From<Outcome> for ClipName {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => ClipName::Win,
            Outcome::Lose => ClipName::Lose,
            Outcome::Tie => ClipName::Tie,
        }
    }
}

impl From<Move> for ClipName {
    fn from(value: Move) -> Self {
        match value {
            Move::Rock => ClipName::Rock,
            Move::Paper => ClipName::Paper,
            Move::Scissors => ClipName::Scissors,
        }
    }
}

/// One value per [`ClipName`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClipTable<T>([T; ClipName::COUNT]);

impl<T> ClipTable<T> {
    pub fn from_fn(mut f: impl FnMut(ClipName) -> T) -> Self {
        ClipTable(std::array::from_fn(|i| f(ClipName::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClipName, &T)> {
        ClipName::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Default> Default for ClipTable<T> {
    fn default() -> Self {
        ClipTable::from_fn(|_| T::default())
    }
}

impl<T> Index<ClipName> for ClipTable<T> {
    type Output = T;
    fn index(&self, name: ClipName) -> &T {
        &self.0[name.index()]
    }
}

impl<T> IndexMut<ClipName> for ClipTable<T> {
    fn index_mut(&mut self, name: ClipName) -> &mut T {
        &mut self.0[name.index()]
    }
}

/// A decoded clip. The sample buffer is shared between every playback and is
/// never written after decode.
#[derive(Debug, Clone)]
pub struct Clip {
    pub name: ClipName,
    pub sample_rate: u32,
    pub channels: u16,
    /// Interleaved, normalized to `[-1.0, 1.0]`.
    pub samples: Arc<[f32]>,
}

impl Clip {
    pub fn decode(name: ClipName, bytes: &[u8]) -> Result<Clip> {
        let reader = WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();
        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
            SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };
        if samples.is_empty() {
            return Err(AudioError::Empty(name));
        }
        Ok(Clip {
            name,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples: samples.into(),
        })
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate.max(1) as f64)
    }
}
