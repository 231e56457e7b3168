//! Voice — one oscillator+gain layer of a soundscape, with slow drift.

use std::f64::consts::PI;

use super::oscillator::{Oscillator, Waveform};

/// Drift LFO rate in Hz. Slow enough to read as gentle movement, not vibrato.
pub const DRIFT_RATE_HZ: f64 = 0.2;
/// Peak drift excursion in Hz around the base frequency.
pub const DRIFT_DEPTH_HZ: f64 = 2.0;

/// A single ambient layer: an oscillator scaled by a fixed gain, its
/// frequency nudged by a slow sinusoidal drift for chorus-like movement.
///
/// The drift phase is offset by the voice's layer index so stacked layers
/// move independently. Once released, a voice only ever produces silence;
/// no further modulation is applied.
#[derive(Debug, Clone)]
pub struct AmbientVoice {
    oscillator: Oscillator,
    base_frequency: f64,
    gain: f64,
    index: usize,
    sample_rate: f64,
    /// Samples elapsed since the voice started.
    clock: u64,
    released: bool,
}

impl AmbientVoice {
    pub fn new(
        waveform: Waveform,
        base_frequency: f64,
        gain: f64,
        index: usize,
        sample_rate: f64,
    ) -> Self {
        AmbientVoice {
            oscillator: Oscillator::new(waveform, base_frequency, sample_rate),
            base_frequency,
            gain,
            index,
            sample_rate,
            clock: 0,
            released: false,
        }
    }

    /// Generate the next sample, advancing the drift.
    pub fn next_sample(&mut self) -> f64 {
        if self.released {
            return 0.0;
        }

        let t = self.clock as f64 / self.sample_rate;
        let drift = DRIFT_DEPTH_HZ * (2.0 * PI * DRIFT_RATE_HZ * t + self.index as f64).sin();
        self.oscillator.set_frequency(self.base_frequency + drift);
        self.clock += 1;

        self.oscillator.next_sample() * self.gain
    }

    /// Halt the voice. Idempotent; teardown is authoritative, so a released
    /// voice never applies another modulation update.
    pub fn release(&mut self) {
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn base_frequency(&self) -> f64 {
        self.base_frequency
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn waveform(&self) -> Waveform {
        self.oscillator.waveform
    }

    /// Current (drifted) oscillator frequency.
    pub fn current_frequency(&self) -> f64 {
        self.oscillator.frequency()
    }
}
