use std::sync::{Arc, OnceLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    clip::{Clip, ClipName, ClipTable},
    error::Result,
    sink::PlaybackSink,
    source::{ClipSource, ClipSources},
};

/// Each slot is written at most once, by the load task for that clip, and
/// only read afterwards.
type Slots = ClipTable<OnceLock<Arc<Clip>>>;

/// Counts one load down when dropped, including when the load panics.
struct Settled(Arc<watch::Sender<usize>>);

impl Drop for Settled {
    fn drop(&mut self) {
        self.0
            .send_modify(|pending| *pending = pending.saturating_sub(1));
    }
}

pub struct AudioBank {
    slots: Arc<Slots>,
    sink: Arc<dyn PlaybackSink>,
    master_volume: f32,
    /// Loads that haven't finished yet.
    pending: Arc<watch::Sender<usize>>,
}

impl AudioBank {
    /// Start loading every configured clip concurrently. Must be called from
    /// inside a tokio runtime. Returns immediately; clips become playable as
    /// their loads finish, in no particular order.
    pub fn load(sources: ClipSources, sink: Arc<dyn PlaybackSink>, master_volume: f32) -> Self {
        let slots: Arc<Slots> = Arc::new(ClipTable::default());
        let configured: Vec<(ClipName, ClipSource)> = sources
            .configured()
            .map(|(name, source)| (name, source.clone()))
            .collect();
        let (pending, _) = watch::channel(configured.len());
        let pending = Arc::new(pending);

        for (name, source) in configured {
            let slots = slots.clone();
            let settled = Settled(pending.clone());
            tokio::spawn(async move {
                let _settled = settled;
                match Self::load_clip(name, source).await {
                    Ok(clip) => {
                        info!("Loaded clip {} ({:?})", name.as_str(), clip.duration());
                        let _ = slots[name].set(Arc::new(clip));
                    }
                    Err(e) => {
                        warn!("Failed to load clip {}: {}", name.as_str(), e);
                    }
                }
            });
        }

        AudioBank {
            slots,
            sink,
            master_volume,
            pending,
        }
    }

    async fn load_clip(name: ClipName, source: ClipSource) -> Result<Clip> {
        let bytes = source.fetch().await?;
        Clip::decode(name, &bytes)
    }

    /// Fire-and-forget playback. Clips that are still loading, failed to load,
    /// or were never configured are skipped.
    pub fn play(&self, name: ClipName, volume: f32) {
        let Some(clip) = self.slots[name].get() else {
            debug!("Clip {} not ready, skipping playback", name.as_str());
            return;
        };
        self.sink
            .play(clip.clone(), (volume * self.master_volume).max(0.0));
    }

    pub fn is_ready(&self, name: ClipName) -> bool {
        self.slots[name].get().is_some()
    }

    pub fn ready_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .count()
    }

    /// Wait for every load started by [`AudioBank::load`] to settle, whether it
    /// succeeded or not. Any number of callers may wait at once.
    pub async fn wait_loaded(&self) {
        let mut pending = self.pending.subscribe();
        let _ = pending.wait_for(|pending| *pending == 0).await;
    }
}
