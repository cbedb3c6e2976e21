//! Audioscope - waveform and spectrogram analysis for audio files
//!
//! This library decodes compressed audio into a mono sample buffer and
//! derives the two arrays a plotting layer needs: a time-domain waveform and
//! a decibel spectrogram relative to the loudest cell.

pub mod analysis;
pub mod decode;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;

pub use analysis::{SpectrogramConfig, WaveformOptions, WindowKind};
pub use decode::{AudioSource, DecodeOptions, Downmix};
pub use error::{AnalysisError, DecodeError, Error, ErrorKind, Stage};
pub use model::{AnalysisResult, AudioBuffer, SpectrogramMatrix, WaveformSeries};
pub use pipeline::{analyze, AnalysisConfig, AnalysisPipeline};
