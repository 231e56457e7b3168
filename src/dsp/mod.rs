//! DSP building blocks: oscillators, voices, and the mix bus.

pub mod mixbus;
pub mod oscillator;
pub mod voice;
