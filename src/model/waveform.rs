use serde::Serialize;

/// Amplitude-vs-time series ready for plotting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveformSeries {
    /// Seconds from the start of the buffer, non-decreasing
    pub time_axis: Vec<f64>,

    /// Amplitude at each time point
    pub amplitude: Vec<f32>,

    /// Whether min/max envelope reduction was applied
    pub reduced: bool,
}

impl WaveformSeries {
    pub fn len(&self) -> usize {
        self.amplitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitude.is_empty()
    }

    /// Iterate `(seconds, amplitude)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f32)> + '_ {
        self.time_axis
            .iter()
            .copied()
            .zip(self.amplitude.iter().copied())
    }
}
