//! Engine lifecycle — owns the output device and the active soundscape.
//!
//! The controller guarantees at most one soundscape (1–2 voices) is active
//! at any time: a new play request always fully tears down the previous
//! voice set before building the next. The output device is created lazily
//! on the first play request, since creating it eagerly can violate
//! platform autoplay policies, and resumed on every play in case the
//! platform suspended it in between.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::dsp::mixbus::MixBus;
use crate::emotion::{EmotionTag, classify};
use crate::error::EngineError;
use crate::graph::build_voices;
use crate::output::{CpalBackend, OutputBackend, OutputError, OutputSink};
use crate::profile::{ProfileSet, SoundProfile};

/// Engine lifecycle states.
///
/// `Uninitialized → Idle → Playing → Idle → … → Disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No output device exists yet.
    Uninitialized,
    /// Device exists (or its creation failed), no active voices.
    Idle,
    /// 1–2 active voices, drift modulation running.
    Playing,
    /// Device released; no further play requests are honored.
    Disposed,
}

/// The emotion-driven soundscape engine.
///
/// Single logical owner of the output device and the active-voice list.
/// All mutations go through `play_for_*`/`stop`; a [`EngineHandle`] can
/// additionally cancel playback from another thread.
pub struct AmbientEngine<B: OutputBackend = CpalBackend> {
    backend: B,
    sink: Option<B::Sink>,
    mix: Arc<Mutex<MixBus>>,
    profiles: ProfileSet,
    /// Bumped on every play and stop request. A play whose token has been
    /// overtaken between device resume and voice installation installs
    /// nothing; the later request wins.
    generation: Arc<AtomicU64>,
    playing: Arc<AtomicBool>,
    state: EngineState,
}

impl AmbientEngine<CpalBackend> {
    /// Engine on the system's default output device.
    pub fn new() -> Self {
        Self::with_backend(CpalBackend)
    }
}

impl Default for AmbientEngine<CpalBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: OutputBackend> AmbientEngine<B> {
    pub fn with_backend(backend: B) -> Self {
        AmbientEngine {
            backend,
            sink: None,
            mix: Arc::new(Mutex::new(MixBus::new())),
            profiles: ProfileSet::builtin(),
            generation: Arc::new(AtomicU64::new(0)),
            playing: Arc::new(AtomicBool::new(false)),
            state: EngineState::Uninitialized,
        }
    }

    /// Replace the built-in profile table.
    pub fn with_profiles(mut self, profiles: ProfileSet) -> Self {
        self.profiles = profiles;
        self
    }

    /// Start the ambient soundscape matching `text`.
    ///
    /// Fire-and-forget: the caller never awaits completion, and failures
    /// degrade to silence (logged, never surfaced).
    pub fn play_for_text(&mut self, text: &str) {
        self.play_for_emotion(classify(text));
    }

    /// Start the soundscape for an explicitly chosen emotion.
    pub fn play_for_emotion(&mut self, tag: EmotionTag) {
        let profile = self.profiles.get(tag).clone();
        log::debug!(
            "soundscape request: {tag:?} ({} {}, {} layer(s))",
            profile.tempo_bpm,
            profile.musical_key,
            profile.timbres.len()
        );
        if let Err(err) = self.start(&profile) {
            log::warn!("ambient audio unavailable, continuing without soundscape: {err}");
            self.halt_voices();
            if self.state != EngineState::Disposed {
                self.state = EngineState::Idle;
            }
        }
    }

    fn start(&mut self, profile: &SoundProfile) -> Result<(), EngineError> {
        if self.state == EngineState::Disposed {
            return Err(EngineError::Disposed);
        }

        // A new soundscape always fully replaces the previous one.
        self.halt_voices();
        let token = self.claim_generation();

        if self.sink.is_none() {
            self.sink = Some(self.backend.open(Arc::clone(&self.mix))?);
            self.state = EngineState::Idle;
        }
        let Some(sink) = self.sink.as_mut() else {
            // Unreachable: the branch above either filled the sink or
            // returned the open error.
            return Err(OutputError::NoDevice.into());
        };

        // May wait for the platform to unlock audio.
        sink.resume()?;

        // A stop (or newer play) that arrived while we waited wins; its
        // teardown is authoritative and this voice set must not appear.
        if self.generation.load(Ordering::SeqCst) != token {
            log::debug!("soundscape cancelled during device resume");
            return Ok(());
        }

        let voices = build_voices(profile, sink.spec().sample_rate);
        let count = voices.len();
        self.mix.lock().unwrap().install(voices);
        self.playing.store(count > 0, Ordering::SeqCst);
        self.state = if count > 0 {
            EngineState::Playing
        } else {
            EngineState::Idle
        };
        Ok(())
    }

    /// Stop the active soundscape.
    ///
    /// Idempotent: calling it while nothing plays is a no-op and leaves the
    /// state unchanged.
    pub fn stop(&mut self) {
        self.claim_generation();
        self.halt_voices();
        if self.state == EngineState::Playing {
            self.state = EngineState::Idle;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state() == EngineState::Playing
    }

    pub fn state(&self) -> EngineState {
        // A handle may have stopped the soundscape from another thread.
        if self.state == EngineState::Playing && !self.playing.load(Ordering::SeqCst) {
            return EngineState::Idle;
        }
        self.state
    }

    /// Number of currently active voices (0, 1, or 2).
    pub fn active_voices(&self) -> usize {
        self.mix.lock().unwrap().voice_count()
    }

    /// A cloneable remote control for stopping playback from another
    /// thread, including while a play call is still waiting on the device.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            mix: Arc::clone(&self.mix),
            generation: Arc::clone(&self.generation),
            playing: Arc::clone(&self.playing),
        }
    }

    /// Release the output device. Terminal: the engine honors no further
    /// play requests.
    pub fn dispose(&mut self) {
        self.claim_generation();
        self.halt_voices();
        self.sink = None;
        self.state = EngineState::Disposed;
    }

    fn halt_voices(&self) {
        self.mix.lock().unwrap().clear();
        self.playing.store(false, Ordering::SeqCst);
    }

    fn claim_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl<B: OutputBackend> Drop for AmbientEngine<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Remote control for an [`AmbientEngine`].
///
/// Unlike the engine itself (which owns a platform stream and stays on its
/// thread), handles are `Send` and cheap to clone.
#[derive(Clone)]
pub struct EngineHandle {
    mix: Arc<Mutex<MixBus>>,
    generation: Arc<AtomicU64>,
    playing: Arc<AtomicBool>,
}

impl EngineHandle {
    /// Request that playback stop. Safe from any thread; a play call
    /// currently waiting on the device observes the request before it
    /// installs new voices.
    pub fn request_stop(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.mix.lock().unwrap().clear();
        self.playing.store(false, Ordering::SeqCst);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}
