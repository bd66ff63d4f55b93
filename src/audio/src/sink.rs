use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{error::TrySendError, Sender};
use tracing::{debug, info, warn};

use crate::clip::{Clip, ClipName};

/// Hand-off point to whatever actually produces sound. Implementations must
/// return immediately; each call is one independent playback.
pub trait PlaybackSink: Send + Sync {
    fn play(&self, clip: Arc<Clip>, volume: f32);
}

/// Headless output: logs the playback and nothing else.
#[derive(Debug, Default)]
pub struct LogSink;

impl PlaybackSink for LogSink {
    fn play(&self, clip: Arc<Clip>, volume: f32) {
        info!(
            "Playing {} ({:?}, volume {:.2})",
            clip.name.as_str(),
            clip.duration(),
            volume
        );
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackRequest {
    pub clip: Arc<Clip>,
    pub volume: f32,
}

/// Forwards playbacks to a host audio task over an mpsc channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<PlaybackRequest>,
}

impl ChannelSink {
    pub fn new(sender: Sender<PlaybackRequest>) -> Self {
        ChannelSink { sender }
    }
}

impl PlaybackSink for ChannelSink {
    fn play(&self, clip: Arc<Clip>, volume: f32) {
        let name = clip.name;
        match self.sender.try_send(PlaybackRequest { clip, volume }) {
            Ok(()) => debug!("Queued {} for playback", name.as_str()),
            Err(TrySendError::Full(_)) => {
                warn!("Playback channel full, dropping {}", name.as_str())
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Playback channel closed, dropping {}", name.as_str())
            }
        }
    }
}

/// Keeps a log of every playback it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<(ClipName, f32)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(ClipName, f32)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<ClipName> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    pub fn count(&self, name: ClipName) -> usize {
        self.calls().iter().filter(|(n, _)| *n == name).count()
    }

    pub fn len(&self) -> usize {
        self.calls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlaybackSink for RecordingSink {
    fn play(&self, clip: Arc<Clip>, volume: f32) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((clip.name, volume));
        }
    }
}
