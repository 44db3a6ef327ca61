//! Audio and viseme rendering for avatar replies
//!
//! Speech comes from a [`SpeechSynthesizer`](avatar_tts::SpeechSynthesizer),
//! transcoding and timing extraction are delegated to external tools
//! configured as argv templates. Pre-rendered fixtures stand in whenever a
//! step fails.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod fixtures;
mod pipeline;
mod scratch;
mod tool;

pub use error::{FixtureError, MediaError};
pub use fixtures::{Fixture, FixtureStore};
pub use pipeline::MediaPipeline;
pub use scratch::ScratchDir;
pub use tool::{CommandTool, TimingExtractor, Transcoder};
