// src/audio.rs

//! Keyboard click and buzz playback.
//!
//! The typewriter effect plays a short click per typed unit and a lower buzz
//! for long words. Sounds are synthesized once at startup as small sample
//! banks; a character code picks the variant, so the same letter always
//! clicks the same way. Samples are pushed into a lock-free ring buffer and
//! drained by the cpal output stream callback, which plays silence when the
//! buffer runs dry.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, warn};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapProd, HeapRb};


const CLICK_VARIANTS: usize = 8;
const BUZZ_VARIANTS: usize = 4;
const CLICK_SECS: f32 = 0.025;
const BUZZ_SECS: f32 = 0.09;
const AMPLITUDE: f32 = 0.25;

/// Where the pacer sends its keystroke sounds.
pub trait AudioSink {
    /// Plays the click variant selected by `code`.
    fn click(&mut self, code: u8);
    /// Plays the buzz variant selected by `code`.
    fn buzz(&mut self, code: u8);
}

/// Sink used when no audio device is available.
pub struct NullSink;

impl AudioSink for NullSink {
    fn click(&mut self, _code: u8) {}
    fn buzz(&mut self, _code: u8) {}
}

/// Real playback through the default cpal output device.
pub struct CpalSink {
    producer: HeapProd<f32>,
    clicks: Vec<Vec<f32>>,
    buzzes: Vec<Vec<f32>>,
    // Dropping the stream stops playback; held for lifetime only.
    _stream: cpal::Stream,
}

impl CpalSink {
    /// Opens the default output device. Returns `None` when no device is
    /// usable; callers fall back to `NullSink` and the simulator runs mute.
    pub fn new() -> Option<Self> {
        match Self::open() {
            Ok(sink) => Some(sink),
            Err(e) => {
                warn!("audio unavailable, running mute: {e:#}");
                None
            }
        }
    }

    fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("no default audio output device")?;
        let config = device
            .default_output_config()
            .context("querying default output config")?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        debug!("audio output at {sample_rate} Hz, {channels} channel(s)");

        // Half a second of mono samples is far more than one key sound.
        let ring = HeapRb::<f32>::new(sample_rate as usize / 2);
        let (producer, mut consumer) = ring.split();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    for frame in data.chunks_mut(channels) {
                        let sample = consumer.try_pop().unwrap_or(0.0);
                        frame.fill(sample);
                    }
                },
                |e| warn!("audio stream error: {e}"),
                None,
            )
            .context("building audio output stream")?;
        stream.play().context("starting audio output stream")?;

        Ok(Self {
            producer,
            clicks: (0..CLICK_VARIANTS)
                .map(|i| synth(800.0 + 150.0 * i as f32, CLICK_SECS, sample_rate))
                .collect(),
            buzzes: (0..BUZZ_VARIANTS)
                .map(|i| synth(120.0 + 40.0 * i as f32, BUZZ_SECS, sample_rate))
                .collect(),
            _stream: stream,
        })
    }

    fn play(&mut self, samples: &[f32]) {
        for &sample in samples {
            // Ring full means sounds are already queued; dropping the tail of
            // this one is inaudible at click lengths.
            if self.producer.try_push(sample).is_err() {
                break;
            }
        }
    }
}

impl AudioSink for CpalSink {
    fn click(&mut self, code: u8) {
        let idx = usize::from(code) % self.clicks.len();
        let samples = std::mem::take(&mut self.clicks[idx]);
        self.play(&samples);
        self.clicks[idx] = samples;
    }

    fn buzz(&mut self, code: u8) {
        let idx = usize::from(code) % self.buzzes.len();
        let samples = std::mem::take(&mut self.buzzes[idx]);
        self.play(&samples);
        self.buzzes[idx] = samples;
    }
}

/// A decaying square wave, the timbre of a plastic keyboard through a small
/// speaker.
fn synth(freq: f32, secs: f32, sample_rate: f32) -> Vec<f32> {
    let len = (sample_rate * secs) as usize;
    (0..len)
        .map(|n| {
            let t = n as f32 / sample_rate;
            let square = if (t * freq).fract() < 0.5 { 1.0 } else { -1.0 };
            let envelope = 1.0 - n as f32 / len as f32;
            square * envelope * AMPLITUDE
        })
        .collect()
}
