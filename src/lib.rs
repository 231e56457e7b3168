//! # Storyscape
//!
//! Emotion-driven procedural soundscape engine for interactive
//! storytelling. Given a fragment of narrative text, the engine infers an
//! emotional tone and synthesizes a matching, continuously evolving
//! ambient soundscape in real time, with no pre-recorded audio assets.
//!
//! ## Quick start
//!
//! ```no_run
//! use storyscape::AmbientEngine;
//!
//! let mut engine = AmbientEngine::new();
//! engine.play_for_text("Het prinsesje lachte vrolijk en maakte een feestje");
//! assert!(engine.is_playing());
//! engine.stop();
//! ```
//!
//! Audio failures never surface to the caller: if the platform has no
//! output device, or refuses to unlock audio, playback is silently skipped
//! and the engine settles in `Idle`. The storytelling flow is never
//! blocked by a missing soundscape.

pub mod dsp;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod graph;
pub mod output;
pub mod profile;
#[cfg(feature = "render")]
pub mod render;

pub use emotion::{EmotionTag, classify};
pub use engine::{AmbientEngine, EngineHandle, EngineState};
pub use error::EngineError;
pub use profile::{ProfileSet, SoundProfile, base_frequency, profile_for};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
