pub mod bank;
pub mod clip;
pub mod error;
pub mod sink;
pub mod source;

pub use bank::AudioBank;
pub use clip::{Clip, ClipName, ClipTable};
pub use error::AudioError;
pub use sink::{ChannelSink, LogSink, PlaybackRequest, PlaybackSink, RecordingSink};
pub use source::{ClipSource, ClipSources};
