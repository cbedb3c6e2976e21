//! Analysis configuration

use crate::analysis::{SpectrogramConfig, WaveformOptions, WindowKind};
use crate::decode::DecodeOptions;
use crate::error::{AnalysisError, Stage};

/// Configuration for one analysis run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    /// How the source is decoded (downmix policy, optional resampling)
    pub decode: DecodeOptions,

    /// Waveform envelope settings
    pub waveform: WaveformOptions,

    /// STFT parameters
    pub spectrogram: SpectrogramConfig,
}

impl AnalysisConfig {
    /// Create a configuration with the default 2048/512 Hann analysis
    pub fn new() -> Self {
        Self::default()
    }

    /// Set frame size, hop size and window in one call
    pub fn with_frames(mut self, frame_size: usize, hop_size: usize, window: WindowKind) -> Self {
        self.spectrogram.frame_size = frame_size;
        self.spectrogram.hop_size = hop_size;
        self.spectrogram.window = window;
        self
    }

    pub fn with_spectrogram(mut self, spectrogram: SpectrogramConfig) -> Self {
        self.spectrogram = spectrogram;
        self
    }

    pub fn with_waveform(mut self, waveform: WaveformOptions) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_decode(mut self, decode: DecodeOptions) -> Self {
        self.decode = decode;
        self
    }

    /// Check parameters up front, tagging failures with the stage that owns them
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.waveform
            .validate()
            .map_err(|e| AnalysisError::new(Stage::Waveform, e))?;
        self.spectrogram
            .validate()
            .map_err(|e| AnalysisError::new(Stage::Spectrogram, e))?;
        Ok(())
    }
}
