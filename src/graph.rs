//! Soundscape construction — builds the voice layers for a sound profile.

use crate::dsp::oscillator::Waveform;
use crate::dsp::voice::AmbientVoice;
use crate::profile::{SoundProfile, base_frequency};

/// Gain of the main voice. Background atmosphere sits well below a
/// foreground narration voice.
pub const AMBIENT_GAIN: f64 = 0.08;
/// Frequency ratio of the harmony voice above the main voice.
pub const PERFECT_FIFTH: f64 = 1.5;
/// The harmony layer is subordinate to the main voice.
pub const HARMONY_GAIN_RATIO: f64 = 0.5;

/// Build the 1–2 voices of a profile's soundscape.
///
/// The voices are inert until installed into a mix bus: the bus drives
/// their sample clock, so drift modulation only runs while a voice is
/// registered as active.
pub fn build_voices(profile: &SoundProfile, sample_rate: u32) -> Vec<AmbientVoice> {
    let base = base_frequency(&profile.musical_key);
    let sample_rate = sample_rate as f64;
    let mut voices = Vec::with_capacity(2);

    if let Some(main) = profile.timbres.first() {
        voices.push(AmbientVoice::new(
            Waveform::from_name(main),
            base,
            AMBIENT_GAIN,
            0,
            sample_rate,
        ));
    }
    if let Some(harmony) = profile.timbres.get(1) {
        voices.push(AmbientVoice::new(
            Waveform::from_name(harmony),
            base * PERFECT_FIFTH,
            AMBIENT_GAIN * HARMONY_GAIN_RATIO,
            1,
            sample_rate,
        ));
    }

    voices
}
