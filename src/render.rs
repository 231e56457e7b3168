//! Offline renderer — bounces a soundscape to samples or a WAV file.
//!
//! Shares the exact graph and mix code the live engine uses, so a bounce
//! is a faithful picture of what the engine would play. Intended for
//! tooling and inspection, not for shipping audio assets.

use std::path::Path;

use crate::dsp::mixbus::MixBus;
use crate::graph::build_voices;
use crate::profile::SoundProfile;

/// Render `seconds` of a profile's soundscape to mono f32 samples.
pub fn render_samples(profile: &SoundProfile, seconds: f64, sample_rate: u32) -> Vec<f32> {
    let mut bus = MixBus::new();
    bus.install(build_voices(profile, sample_rate));

    let total = (seconds * sample_rate as f64) as usize;
    (0..total).map(|_| bus.next_sample() as f32).collect()
}

/// Render a profile's soundscape to a 32-bit float mono WAV file.
pub fn write_wav(
    profile: &SoundProfile,
    seconds: f64,
    sample_rate: u32,
    path: &Path,
) -> Result<(), hound::Error> {
    let samples = render_samples(profile, seconds, sample_rate);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionTag;
    use crate::profile::profile_for;

    #[test]
    fn bounce_has_expected_length() {
        let samples = render_samples(&profile_for(EmotionTag::Calm), 0.5, 44100);
        assert_eq!(samples.len(), 22050);
    }

    #[test]
    fn bounce_is_not_silent() {
        let samples = render_samples(&profile_for(EmotionTag::Happy), 0.25, 44100);
        let max = samples.iter().fold(0.0_f32, |m, &s| m.max(s.abs()));
        assert!(max > 0.01, "Bounce should be audible, max={max}");
    }

    #[test]
    fn bounce_is_bounded() {
        let samples = render_samples(&profile_for(EmotionTag::Excited), 0.25, 44100);
        for (i, &s) in samples.iter().enumerate() {
            assert!(s.abs() <= 1.0, "Sample {i} out of range: {s}");
        }
    }

    #[test]
    fn empty_profile_bounces_silence() {
        let profile = SoundProfile {
            tempo_bpm: 100,
            musical_key: "C major".to_string(),
            timbres: Vec::new(),
        };
        let samples = render_samples(&profile, 0.1, 44100);
        assert!(samples.iter().all(|&s| s == 0.0));
    }
}
