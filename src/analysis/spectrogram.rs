//! Decibel spectrogram relative to the global peak
//!
//! `db = 20 * log10(max(magnitude / peak, AMIN))`, clamped at `-top_db`.
//! The peak cell is exactly 0 dB however quiet the input is. Silent input
//! (every magnitude zero) yields the floor everywhere instead of dividing by
//! zero.

use super::config::SpectrogramConfig;
use super::stft::{magnitudes, MagnitudeSpectrogram};
use crate::error::Result;
use crate::model::{AudioBuffer, SpectrogramMatrix};

/// Smallest ratio to the peak that reaches the log; anything below is treated as this
pub const AMIN: f64 = 1e-10;

/// Compute the decibel spectrogram of a buffer
pub fn transform(buffer: &AudioBuffer, config: &SpectrogramConfig) -> Result<SpectrogramMatrix> {
    let mags = magnitudes(buffer, config)?;
    let matrix = amplitude_to_db(&mags, config.top_db);

    log::debug!(
        "Spectrogram: {} bins x {} frames, dominant frequency {:?} Hz",
        matrix.num_bins(),
        matrix.num_frames(),
        matrix.dominant_frequency()
    );

    Ok(matrix)
}

/// Convert linear magnitudes to decibels relative to their global peak
pub fn amplitude_to_db(mags: &MagnitudeSpectrogram, top_db: f32) -> SpectrogramMatrix {
    let floor = -top_db.abs();
    let peak = mags.peak();

    let db: Vec<f32> = if peak == 0.0 {
        vec![floor; mags.values().len()]
    } else {
        let reference = peak as f64;
        mags.values()
            .iter()
            .map(|&m| {
                let ratio = (m as f64 / reference).max(AMIN);
                ((20.0 * ratio.log10()) as f32).max(floor)
            })
            .collect()
    };

    SpectrogramMatrix::from_parts(db, mags.freq_axis(), mags.time_axis(), floor)
}
