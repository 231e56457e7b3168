//! Audio output — the shared platform device handle feeding the mix bus.
//!
//! The engine talks to the device through the [`OutputBackend`]/[`OutputSink`]
//! seam so tests can run against a stub. The real implementation,
//! [`CpalBackend`], opens the default cpal output device and pulls mono
//! frames from the shared [`MixBus`] inside the stream callback.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use crate::dsp::mixbus::MixBus;

/// Negotiated output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("no default output device")]
    NoDevice,

    #[error("failed to query default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// A live audio output. Owns the platform stream; dropping the sink
/// releases the device.
pub trait OutputSink {
    fn spec(&self) -> OutputSpec;

    /// Bring a suspended output back to life. May block until the platform
    /// actually unlocks audio; callers re-check for a stop request once it
    /// returns, before installing new voices.
    fn resume(&mut self) -> Result<(), OutputError>;
}

/// Opens a platform output for a mix bus. The engine creates its sink
/// lazily, on the first play request, through one of these.
pub trait OutputBackend {
    type Sink: OutputSink;

    fn open(&self, mix: Arc<Mutex<MixBus>>) -> Result<Self::Sink, OutputError>;
}

/// Default backend: the system's default cpal output device.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalBackend;

/// Handle to a running cpal output stream.
pub struct CpalOutput {
    _stream: cpal::Stream,
    spec: OutputSpec,
}

impl OutputBackend for CpalBackend {
    type Sink = CpalOutput;

    fn open(&self, mix: Arc<Mutex<MixBus>>) -> Result<CpalOutput, OutputError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(OutputError::NoDevice)?;
        let config = device.default_output_config()?;
        let spec = OutputSpec {
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
        };
        log::debug!(
            "opening output: {} ch @ {} Hz ({})",
            spec.channels,
            spec.sample_rate,
            config.sample_format()
        );

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config.into(), spec.channels, mix)?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config.into(), spec.channels, mix)?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config.into(), spec.channels, mix)?
            }
            other => return Err(OutputError::UnsupportedFormat(other)),
        };
        stream.play()?;

        Ok(CpalOutput {
            _stream: stream,
            spec,
        })
    }
}

impl OutputSink for CpalOutput {
    fn spec(&self) -> OutputSpec {
        self.spec
    }

    fn resume(&mut self) -> Result<(), OutputError> {
        self._stream.play()?;
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: u16,
    mix: Arc<Mutex<MixBus>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = channels as usize;
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            // Never block the audio thread: hand back silence if the engine
            // holds the bus right now.
            let Ok(mut bus) = mix.try_lock() else {
                for sample in data.iter_mut() {
                    *sample = T::from_sample(0.0f32);
                }
                return;
            };
            for frame in data.chunks_mut(channels) {
                let value = T::from_sample(bus.next_sample() as f32);
                for sample in frame.iter_mut() {
                    *sample = value;
                }
            }
        },
        |err| log::error!("output stream error: {err}"),
        None,
    )
}
