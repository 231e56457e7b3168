//! Mix bus — sums the active voices with master gain and soft clipping.

use super::voice::AmbientVoice;

/// Master gain applied to the summed voices.
pub const MASTER_GAIN: f64 = 0.8;

/// Owner of the active-voice list. At most one soundscape's voices live
/// here at a time; installing a new set always releases the previous one
/// first, so no stale layer survives a swap.
#[derive(Debug, Default)]
pub struct MixBus {
    voices: Vec<AmbientVoice>,
}

impl MixBus {
    pub fn new() -> Self {
        MixBus { voices: Vec::new() }
    }

    /// Replace the active soundscape.
    pub fn install(&mut self, voices: Vec<AmbientVoice>) {
        self.clear();
        self.voices = voices;
    }

    /// Release and drop every active voice. Idempotent.
    pub fn clear(&mut self) {
        for voice in &mut self.voices {
            voice.release();
        }
        self.voices.clear();
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn voices(&self) -> &[AmbientVoice] {
        &self.voices
    }

    /// Next mono sample of the full mix. Silence when no voices are active.
    pub fn next_sample(&mut self) -> f64 {
        let mut sum = 0.0;
        for voice in &mut self.voices {
            sum += voice.next_sample();
        }
        soft_clip(sum * MASTER_GAIN)
    }
}

/// Soft clipper using tanh to prevent harsh digital clipping.
fn soft_clip(x: f64) -> f64 {
    x.tanh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Waveform;

    fn voice(freq: f64, gain: f64, index: usize) -> AmbientVoice {
        AmbientVoice::new(Waveform::Sine, freq, gain, index, 44100.0)
    }

    #[test]
    fn empty_bus_is_silent() {
        let mut bus = MixBus::new();
        for _ in 0..128 {
            assert_eq!(bus.next_sample(), 0.0);
        }
    }

    #[test]
    fn sums_installed_voices() {
        let mut bus = MixBus::new();
        bus.install(vec![voice(261.63, 0.08, 0), voice(392.445, 0.04, 1)]);
        assert_eq!(bus.voice_count(), 2);

        let mut has_nonzero = false;
        for _ in 0..4410 {
            if bus.next_sample().abs() > 0.001 {
                has_nonzero = true;
            }
        }
        assert!(has_nonzero, "Mix of two voices should be audible");
    }

    #[test]
    fn install_replaces_previous_set() {
        let mut bus = MixBus::new();
        bus.install(vec![voice(261.63, 0.08, 0), voice(392.445, 0.04, 1)]);
        bus.install(vec![voice(392.0, 0.08, 0)]);

        assert_eq!(bus.voice_count(), 1);
        assert_eq!(bus.voices()[0].base_frequency(), 392.0);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut bus = MixBus::new();
        bus.install(vec![voice(440.0, 0.08, 0)]);
        bus.clear();
        assert_eq!(bus.voice_count(), 0);
        bus.clear();
        assert_eq!(bus.voice_count(), 0);
        assert_eq!(bus.next_sample(), 0.0);
    }

    #[test]
    fn output_bounded_by_soft_clip() {
        let mut bus = MixBus::new();
        // Deliberately hot gains; tanh keeps the sum inside [-1, 1].
        bus.install(vec![voice(220.0, 1.0, 0), voice(330.0, 1.0, 1)]);
        for _ in 0..44100 {
            let s = bus.next_sample();
            assert!(s.abs() <= 1.0, "Mix should be bounded, got {s}");
        }
    }
}
