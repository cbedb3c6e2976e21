use crate::error::DecodeError;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

const CHUNK_SIZE: usize = 1024;

/// Resample a mono signal from `from_rate` to `to_rate` with sinc interpolation
///
/// Returns the input unchanged when the rates already match.
pub fn resample_mono(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>, DecodeError> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }
    if to_rate == 0 {
        return Err(DecodeError::Resample(
            "target sample rate must be positive".to_string(),
        ));
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_SIZE, 1)
        .map_err(|e| DecodeError::Resample(format!("failed to create resampler: {}", e)))?;

    let expected_len = (samples.len() as f64 * ratio).round() as usize;
    let mut output = Vec::with_capacity(expected_len + CHUNK_SIZE);

    let mut pos = 0;
    while pos + CHUNK_SIZE <= samples.len() {
        let chunk = &samples[pos..pos + CHUNK_SIZE];
        let result = resampler
            .process(&[chunk], None)
            .map_err(|e| DecodeError::Resample(e.to_string()))?;
        output.extend_from_slice(&result[0]);
        pos += CHUNK_SIZE;
    }

    if pos < samples.len() {
        let remaining = &samples[pos..];
        let result = resampler
            .process_partial(Some(&[remaining]), None)
            .map_err(|e| DecodeError::Resample(e.to_string()))?;
        output.extend_from_slice(&result[0]);
    }

    // Flush the filter tail until the delayed output covers the expected length
    let delay = resampler.output_delay();
    while output.len() < delay + expected_len {
        let result = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| DecodeError::Resample(e.to_string()))?;
        if result[0].is_empty() {
            break;
        }
        output.extend_from_slice(&result[0]);
    }

    // Drop the filter delay so the output lines up with the input
    let end = (delay + expected_len).min(output.len());
    let aligned = output.get(delay..end).map(|s| s.to_vec()).unwrap_or_default();

    log::debug!(
        "Resampled {} samples at {}Hz to {} samples at {}Hz",
        samples.len(),
        from_rate,
        aligned.len(),
        to_rate
    );

    Ok(aligned)
}
