use super::spectrogram::SpectrogramMatrix;
use super::waveform::WaveformSeries;
use serde::Serialize;

/// Complete output of one analysis call
///
/// Immutable once built; handed to the caller by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    waveform: WaveformSeries,
    spectrogram: SpectrogramMatrix,
    sample_rate: u32,
    duration_seconds: f64,
}

impl AnalysisResult {
    pub(crate) fn new(
        waveform: WaveformSeries,
        spectrogram: SpectrogramMatrix,
        sample_rate: u32,
        duration_seconds: f64,
    ) -> Self {
        Self {
            waveform,
            spectrogram,
            sample_rate,
            duration_seconds,
        }
    }

    pub fn waveform(&self) -> &WaveformSeries {
        &self.waveform
    }

    pub fn spectrogram(&self) -> &SpectrogramMatrix {
        &self.spectrogram
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn into_parts(self) -> (WaveformSeries, SpectrogramMatrix) {
        (self.waveform, self.spectrogram)
    }
}
