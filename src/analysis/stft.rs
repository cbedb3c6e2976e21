//! Short-time Fourier transform producing linear magnitudes
//!
//! Frames are laid out from sample 0 (or from `-frame_size / 2` when
//! centered), advance by `hop_size`, and the last frame is zero-padded.
//! Only the non-negative half of each spectrum is kept.

use super::config::SpectrogramConfig;
use crate::error::{Error, Result};
use crate::model::AudioBuffer;
use rayon::prelude::*;
use realfft::RealFftPlanner;

/// Linear magnitudes indexed `[bin][frame]`, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeSpectrogram {
    magnitudes: Vec<f32>,
    num_bins: usize,
    num_frames: usize,
    frame_size: usize,
    hop_size: usize,
    sample_rate: u32,
}

impl MagnitudeSpectrogram {
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn values(&self) -> &[f32] {
        &self.magnitudes
    }

    pub fn get(&self, bin: usize, frame: usize) -> Option<f32> {
        if bin >= self.num_bins || frame >= self.num_frames {
            return None;
        }
        Some(self.magnitudes[bin * self.num_frames + frame])
    }

    /// Global peak magnitude
    pub fn peak(&self) -> f32 {
        self.magnitudes.iter().copied().fold(0.0f32, f32::max)
    }

    /// `f[k] = k * sample_rate / frame_size`
    pub fn freq_axis(&self) -> Vec<f64> {
        let resolution = self.sample_rate as f64 / self.frame_size as f64;
        (0..self.num_bins).map(|k| k as f64 * resolution).collect()
    }

    /// `t[j] = j * hop_size / sample_rate`
    pub fn time_axis(&self) -> Vec<f64> {
        let step = self.hop_size as f64 / self.sample_rate as f64;
        (0..self.num_frames).map(|j| j as f64 * step).collect()
    }
}

/// Number of frames needed to cover `len` samples
///
/// One frame when the input fits; otherwise enough hops for the last frame to
/// reach the end, without ever starting a frame past the end. A hop longer
/// than the frame leaves the samples between frames unanalyzed.
pub fn frame_count(len: usize, frame_size: usize, hop_size: usize) -> usize {
    if len <= frame_size {
        return 1;
    }
    let covering = 1 + (len - frame_size).div_ceil(hop_size);
    covering.min(len.div_ceil(hop_size))
}

/// Compute the magnitude spectrogram of a buffer
pub fn magnitudes(buffer: &AudioBuffer, config: &SpectrogramConfig) -> Result<MagnitudeSpectrogram> {
    config.validate()?;

    let samples = buffer.samples();
    if let Some(idx) = samples.iter().position(|s| !s.is_finite()) {
        return Err(Error::Transform(format!(
            "non-finite sample {} at index {}",
            samples[idx], idx
        )));
    }

    let frame_size = config.frame_size;
    let hop_size = config.hop_size;
    let pad = if config.center { frame_size / 2 } else { 0 };
    let padded_len = samples.len() + 2 * pad;

    if frame_size > padded_len {
        log::warn!(
            "Frame size {} exceeds input length {}; using a single zero-padded frame",
            frame_size,
            samples.len()
        );
    }

    let num_frames = frame_count(padded_len, frame_size, hop_size);
    let num_bins = config.num_bins();
    let window = config.window.coefficients(frame_size);

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frame_size);

    log::debug!(
        "STFT: {} samples, frame={}, hop={}, window={}, frames={}, bins={}",
        samples.len(),
        frame_size,
        hop_size,
        config.window,
        num_frames,
        num_bins
    );

    let columns: Vec<Vec<f32>> = (0..num_frames)
        .into_par_iter()
        .map_init(
            || (fft.make_input_vec(), fft.make_output_vec(), fft.make_scratch_vec()),
            |(input, spectrum, scratch), frame| -> Result<Vec<f32>> {
                let start = frame * hop_size;
                for (i, (slot, &w)) in input.iter_mut().zip(window.iter()).enumerate() {
                    // Position in the unpadded signal; outside it reads as zero
                    let sample = (start + i)
                        .checked_sub(pad)
                        .and_then(|idx| samples.get(idx))
                        .copied()
                        .unwrap_or(0.0);
                    *slot = sample * w;
                }

                fft.process_with_scratch(input, spectrum, scratch)
                    .map_err(|e| Error::Transform(format!("forward FFT failed: {}", e)))?;

                Ok(spectrum.iter().map(|c| c.norm()).collect())
            },
        )
        .collect::<Result<_>>()?;

    let mut magnitudes = vec![0.0f32; num_bins * num_frames];
    for (frame, column) in columns.iter().enumerate() {
        for (bin, &mag) in column.iter().enumerate() {
            magnitudes[bin * num_frames + frame] = mag;
        }
    }

    if magnitudes.iter().any(|m| !m.is_finite()) {
        return Err(Error::Transform(
            "spectrum overflowed to a non-finite magnitude".to_string(),
        ));
    }

    Ok(MagnitudeSpectrogram {
        magnitudes,
        num_bins,
        num_frames,
        frame_size,
        hop_size,
        sample_rate: buffer.sample_rate(),
    })
}
