//! Waveform extraction for amplitude-vs-time plots
//!
//! Short buffers are returned sample for sample. Buffers longer than
//! `max_points` are reduced to a min/max envelope:
//! - fixed windows of `ratio` samples
//! - each window emits its minimum and maximum in order of occurrence
//! - points stay evenly spaced, the first on sample 0 and the last on the final sample

use super::config::WaveformOptions;
use crate::error::{Error, Result};
use crate::model::{AudioBuffer, WaveformSeries};

/// Extract the waveform with default options
pub fn extract_waveform(buffer: &AudioBuffer) -> Result<WaveformSeries> {
    extract_waveform_with(buffer, &WaveformOptions::default())
}

pub fn extract_waveform_with(buffer: &AudioBuffer, options: &WaveformOptions) -> Result<WaveformSeries> {
    options.validate()?;

    let samples = buffer.samples();
    if samples.is_empty() {
        return Err(Error::EmptyBuffer);
    }
    let sample_rate = buffer.sample_rate() as f64;

    let (rms, peak) = calculate_rms_and_peak(samples);
    log::debug!(
        "Waveform source: {} samples, peak amplitude {:.4}, rms {:.4}",
        samples.len(),
        peak,
        rms
    );

    if samples.len() <= options.max_points {
        let time_axis = (0..samples.len()).map(|i| i as f64 / sample_rate).collect();
        return Ok(WaveformSeries {
            time_axis,
            amplitude: samples.to_vec(),
            reduced: false,
        });
    }

    let windows = options.max_points / 2;
    let ratio = samples.len().div_ceil(windows);
    let amplitude = min_max_envelope(samples, ratio);

    // At least one window, two points each
    let last_time = (samples.len() - 1) as f64 / sample_rate;
    let step = last_time / (amplitude.len() - 1) as f64;
    let time_axis = (0..amplitude.len()).map(|k| k as f64 * step).collect();

    log::debug!(
        "Waveform reduced: {} samples -> {} points ({} samples per window)",
        samples.len(),
        amplitude.len(),
        ratio
    );

    Ok(WaveformSeries {
        time_axis,
        amplitude,
        reduced: true,
    })
}

/// Two points per window of `ratio` samples: the extremes, earliest first
fn min_max_envelope(samples: &[f32], ratio: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(2 * samples.len().div_ceil(ratio));

    for chunk in samples.chunks(ratio) {
        let mut min_idx = 0;
        let mut max_idx = 0;
        for (i, &s) in chunk.iter().enumerate() {
            if s < chunk[min_idx] {
                min_idx = i;
            }
            if s > chunk[max_idx] {
                max_idx = i;
            }
        }

        if min_idx <= max_idx {
            out.push(chunk[min_idx]);
            out.push(chunk[max_idx]);
        } else {
            out.push(chunk[max_idx]);
            out.push(chunk[min_idx]);
        }
    }

    out
}

/// Calculate RMS and peak values for a sample chunk
#[inline]
fn calculate_rms_and_peak(samples: &[f32]) -> (f32, f32) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }

    let mut sum_sq = 0.0f64;
    let mut peak = 0.0f32;

    for &sample in samples {
        let abs = sample.abs();
        sum_sq += (abs as f64) * (abs as f64);
        if abs > peak {
            peak = abs;
        }
    }

    let rms = (sum_sq / samples.len() as f64).sqrt() as f32;
    (rms, peak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_short_buffer_is_raw() {
        let buffer = AudioBuffer::new(vec![0.0, 0.5, -0.5, 0.25], 2).unwrap();
        let series = extract_waveform(&buffer).unwrap();
        assert!(!series.reduced);
        assert_eq!(series.amplitude, vec![0.0, 0.5, -0.5, 0.25]);
        assert_eq!(series.time_axis, vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_envelope_keeps_extremes() {
        let mut samples = vec![0.01f32; 10_000];
        samples[1234] = 0.9;
        samples[8765] = -0.95;
        let buffer = AudioBuffer::new(samples, 1000).unwrap();
        let options = WaveformOptions::default().with_max_points(100);
        let series = extract_waveform_with(&buffer, &options).unwrap();

        assert!(series.reduced);
        assert!(series.len() <= 100);
        assert_eq!(series.time_axis.len(), series.amplitude.len());
        assert!(series.amplitude.contains(&0.9));
        assert!(series.amplitude.contains(&-0.95));
    }

    #[test]
    fn test_envelope_axis_spans_duration() {
        let buffer = AudioBuffer::new(vec![0.1; 48_000], 48_000).unwrap();
        let options = WaveformOptions::default().with_max_points(1000);
        let series = extract_waveform_with(&buffer, &options).unwrap();

        let diffs: Vec<f64> = series.time_axis.windows(2).map(|w| w[1] - w[0]).collect();
        let first = diffs[0];
        assert!(diffs.iter().all(|d| (d - first).abs() < 1e-12));

        let last = *series.time_axis.last().unwrap();
        assert!(last < 1.0 && last > 1.0 - 2.0 * first);
    }

    #[test]
    fn test_envelope_axis_ends_on_last_sample_with_short_final_window() {
        // 49 windows of 50 samples, then one of 1
        let buffer = AudioBuffer::new(vec![0.1; 2451], 1000).unwrap();
        let options = WaveformOptions::default().with_max_points(100);
        let series = extract_waveform_with(&buffer, &options).unwrap();

        assert!(series.reduced);
        assert_eq!(series.len(), 100);
        assert_eq!(series.time_axis[0], 0.0);
        let last = *series.time_axis.last().unwrap();
        assert!((last - 2.450).abs() < 1e-9, "last point at {}", last);
        assert!(last <= buffer.duration_seconds());

        let first_step = series.time_axis[1] - series.time_axis[0];
        assert!(series
            .time_axis
            .windows(2)
            .all(|w| ((w[1] - w[0]) - first_step).abs() < 1e-12));
    }

    #[test]
    fn test_envelope_axis_never_passes_duration() {
        for len in [1001, 1999, 2451, 2499, 3001, 7777] {
            let buffer = AudioBuffer::new(vec![0.0; len], 1000).unwrap();
            let options = WaveformOptions::default().with_max_points(100);
            let series = extract_waveform_with(&buffer, &options).unwrap();
            let last = *series.time_axis.last().unwrap();
            assert!(last <= buffer.duration_seconds(), "len {}: last {}", len, last);
            assert!((last - (len - 1) as f64 / 1000.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_envelope_orders_by_occurrence() {
        let out = min_max_envelope(&[0.0, 0.8, -0.2, 0.1, -0.7, 0.3], 3);
        assert_eq!(out, vec![0.8, -0.2, -0.7, 0.3]);
    }

    #[test]
    fn test_rejects_tiny_max_points() {
        let buffer = AudioBuffer::new(vec![0.0; 10], 10).unwrap();
        let options = WaveformOptions::default().with_max_points(1);
        let err = extract_waveform_with(&buffer, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_calculate_rms_and_peak() {
        let samples = vec![0.0, 0.5, -0.5, 0.25, -0.25];
        let (rms, peak) = calculate_rms_and_peak(&samples);
        assert!((peak - 0.5).abs() < 0.001);
        assert!(rms > 0.0 && rms < peak);
    }
}
