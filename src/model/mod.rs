//! Data model shared by every pipeline stage
//!
//! These types carry no decoding or DSP logic, only the shapes and
//! invariants the stages agree on.

mod buffer;
mod result;
mod spectrogram;
mod waveform;

pub use buffer::AudioBuffer;
pub use result::AnalysisResult;
pub use spectrogram::SpectrogramMatrix;
pub use waveform::WaveformSeries;
