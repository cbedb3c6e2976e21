//! Analysis parameters

use super::window::WindowKind;
use crate::error::{Error, Result};
use serde::Serialize;

/// Default FFT frame length in samples
pub const DEFAULT_FRAME_SIZE: usize = 2048;

/// Default hop between frames (a quarter frame, 75% overlap)
pub const DEFAULT_HOP_SIZE: usize = DEFAULT_FRAME_SIZE / 4;

/// Dynamic range kept below the peak, in dB
pub const DEFAULT_TOP_DB: f32 = 80.0;

/// Waveform length above which min/max envelope reduction kicks in
pub const DEFAULT_MAX_WAVEFORM_POINTS: usize = 1 << 20;

/// Short-time Fourier transform parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrogramConfig {
    /// Samples per frame; the spectrum has `frame_size / 2 + 1` bins
    pub frame_size: usize,

    /// Samples between the starts of consecutive frames
    pub hop_size: usize,

    pub window: WindowKind,

    /// Zero-pad half a frame on both ends so frame `j` is centered on sample `j * hop`
    pub center: bool,

    /// Cells more than this many dB below the peak are clamped to `-top_db`
    pub top_db: f32,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            hop_size: DEFAULT_HOP_SIZE,
            window: WindowKind::Hann,
            center: false,
            top_db: DEFAULT_TOP_DB,
        }
    }
}

impl SpectrogramConfig {
    /// Config with the given frame size and a quarter-frame hop
    pub fn new(frame_size: usize) -> Self {
        Self {
            frame_size,
            hop_size: frame_size / 4,
            ..Self::default()
        }
    }

    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = hop_size;
        self
    }

    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn with_top_db(mut self, top_db: f32) -> Self {
        self.top_db = top_db;
        self
    }

    /// Decibel value assigned to everything quieter than the dynamic range
    pub fn floor_db(&self) -> f32 {
        -self.top_db
    }

    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(Error::InvalidParameter(
                "frame_size must be positive".to_string(),
            ));
        }
        if self.hop_size == 0 {
            return Err(Error::InvalidParameter(
                "hop_size must be positive".to_string(),
            ));
        }
        if !(self.top_db.is_finite() && self.top_db > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "top_db must be a positive number, got {}",
                self.top_db
            )));
        }
        Ok(())
    }
}

/// Waveform extraction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveformOptions {
    /// Longest series returned before envelope reduction is applied
    pub max_points: usize,
}

impl Default for WaveformOptions {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_WAVEFORM_POINTS,
        }
    }
}

impl WaveformOptions {
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_points < 2 {
            return Err(Error::InvalidParameter(format!(
                "max_points must be at least 2, got {}",
                self.max_points
            )));
        }
        Ok(())
    }
}
