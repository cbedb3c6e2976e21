use serde::Serialize;

/// Decibel spectrogram indexed by `[frequency_bin][time_frame]`
///
/// Values are relative to the global peak magnitude, so the loudest cell is
/// exactly 0 dB and every other cell is negative down to `floor_db`.
/// Storage is row-major: one contiguous row of frames per frequency bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrogramMatrix {
    db: Vec<f32>,
    num_bins: usize,
    num_frames: usize,
    freq_axis: Vec<f64>,
    time_axis: Vec<f64>,
    floor_db: f32,
}

impl SpectrogramMatrix {
    /// Assemble a matrix; `db` must hold `freq_axis.len() * time_axis.len()` values
    pub(crate) fn from_parts(
        db: Vec<f32>,
        freq_axis: Vec<f64>,
        time_axis: Vec<f64>,
        floor_db: f32,
    ) -> Self {
        let num_bins = freq_axis.len();
        let num_frames = time_axis.len();
        debug_assert_eq!(db.len(), num_bins * num_frames);
        Self {
            db,
            num_bins,
            num_frames,
            freq_axis,
            time_axis,
            floor_db,
        }
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Frequency of each bin in Hz
    pub fn freq_axis(&self) -> &[f64] {
        &self.freq_axis
    }

    /// Start time of each frame in seconds
    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    /// Decibel value clamped onto every cell quieter than it
    pub fn floor_db(&self) -> f32 {
        self.floor_db
    }

    /// Raw row-major values
    pub fn values(&self) -> &[f32] {
        &self.db
    }

    pub fn get(&self, bin: usize, frame: usize) -> Option<f32> {
        if bin >= self.num_bins || frame >= self.num_frames {
            return None;
        }
        Some(self.db[bin * self.num_frames + frame])
    }

    /// All frames of one frequency bin
    pub fn row(&self, bin: usize) -> Option<&[f32]> {
        if bin >= self.num_bins {
            return None;
        }
        let start = bin * self.num_frames;
        Some(&self.db[start..start + self.num_frames])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.db.chunks(self.num_frames.max(1))
    }

    /// All bins of one time frame
    pub fn column(&self, frame: usize) -> Option<Vec<f32>> {
        if frame >= self.num_frames {
            return None;
        }
        Some(
            (0..self.num_bins)
                .map(|bin| self.db[bin * self.num_frames + frame])
                .collect(),
        )
    }

    pub fn max_db(&self) -> f32 {
        self.db.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn min_db(&self) -> f32 {
        self.db.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// `true` when no cell rises above the floor
    pub fn is_silent(&self) -> bool {
        self.db.iter().all(|&v| v <= self.floor_db)
    }

    /// Location `(bin, frame)` of the 0 dB reference cell, `None` for silence
    pub fn peak(&self) -> Option<(usize, usize)> {
        if self.is_silent() {
            return None;
        }
        let idx = self.db.iter().position(|&v| v == 0.0)?;
        Some((idx / self.num_frames, idx % self.num_frames))
    }

    /// Frequency in Hz of the peak cell
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.peak().map(|(bin, _)| self.freq_axis[bin])
    }

    /// Bin with the highest decibel value within a single frame
    pub fn loudest_bin_in_frame(&self, frame: usize) -> Option<usize> {
        let column = self.column(frame)?;
        column
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(bin, _)| bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> SpectrogramMatrix {
        // 3 bins x 2 frames
        SpectrogramMatrix::from_parts(
            vec![-80.0, -12.0, -6.0, 0.0, -80.0, -40.0],
            vec![0.0, 100.0, 200.0],
            vec![0.0, 0.5],
            -80.0,
        )
    }

    #[test]
    fn test_indexing_is_bin_major() {
        let m = sample_matrix();
        assert_eq!(m.num_bins(), 3);
        assert_eq!(m.num_frames(), 2);
        assert_eq!(m.get(1, 1), Some(0.0));
        assert_eq!(m.row(2), Some(&[-80.0, -40.0][..]));
        assert_eq!(m.column(0), Some(vec![-80.0, -6.0, -80.0]));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_peak_and_dominant_frequency() {
        let m = sample_matrix();
        assert_eq!(m.peak(), Some((1, 1)));
        assert_eq!(m.dominant_frequency(), Some(100.0));
        assert_eq!(m.max_db(), 0.0);
        assert_eq!(m.min_db(), -80.0);
        assert_eq!(m.loudest_bin_in_frame(0), Some(1));
    }

    #[test]
    fn test_silent_matrix_has_no_peak() {
        let m = SpectrogramMatrix::from_parts(vec![-80.0; 4], vec![0.0, 1.0], vec![0.0, 1.0], -80.0);
        assert!(m.is_silent());
        assert_eq!(m.peak(), None);
        assert_eq!(m.dominant_frequency(), None);
    }
}
