//! Derived representations of a decoded buffer
//!
//! Two independent read-only stages: the waveform extractor and the spectral
//! transformer (windowed STFT, magnitudes, decibels relative to the peak).

mod config;
mod spectrogram;
mod stft;
mod waveform;
mod window;

pub use config::{
    SpectrogramConfig, WaveformOptions, DEFAULT_FRAME_SIZE, DEFAULT_HOP_SIZE,
    DEFAULT_MAX_WAVEFORM_POINTS, DEFAULT_TOP_DB,
};
pub use spectrogram::{amplitude_to_db, transform, AMIN};
pub use stft::{frame_count, magnitudes, MagnitudeSpectrogram};
pub use waveform::{extract_waveform, extract_waveform_with};
pub use window::WindowKind;
