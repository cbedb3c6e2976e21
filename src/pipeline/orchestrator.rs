//! Pipeline orchestration: decode, then waveform and spectrogram side by side

use super::config::AnalysisConfig;
use crate::analysis::{extract_waveform_with, transform};
use crate::decode::{AudioDecoder, AudioSource, SymphoniaDecoder};
use crate::error::{AnalysisError, Stage};
use crate::model::{AnalysisResult, AudioBuffer};

/// Analyze a source with the default symphonia decoder
pub fn analyze(source: AudioSource, config: &AnalysisConfig) -> Result<AnalysisResult, AnalysisError> {
    AnalysisPipeline::with_config(config.clone()).analyze(source)
}

/// Main analysis pipeline
pub struct AnalysisPipeline<D: AudioDecoder> {
    config: AnalysisConfig,
    decoder: D,
}

impl AnalysisPipeline<SymphoniaDecoder> {
    /// Pipeline whose decoder follows `config.decode`
    pub fn with_config(config: AnalysisConfig) -> Self {
        let decoder = SymphoniaDecoder::new(config.decode.clone());
        Self { config, decoder }
    }
}

impl Default for AnalysisPipeline<SymphoniaDecoder> {
    fn default() -> Self {
        Self::with_config(AnalysisConfig::default())
    }
}

impl<D: AudioDecoder> AnalysisPipeline<D> {
    /// Create a pipeline around any decoder
    pub fn new(config: AnalysisConfig, decoder: D) -> Self {
        Self { config, decoder }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the complete analysis
    ///
    /// Fails fast: the first error from any stage is returned, tagged with
    /// that stage, and no partial result is produced.
    pub fn analyze(&self, source: AudioSource) -> Result<AnalysisResult, AnalysisError> {
        // Parameter misuse should not pay for a decode
        self.config.validate()?;

        let buffer = self
            .decoder
            .decode(source)
            .map_err(|e| AnalysisError::new(Stage::Decode, e))?;

        log::info!(
            "Decoded {:.2}s of audio at {}Hz",
            buffer.duration_seconds(),
            buffer.sample_rate()
        );

        self.analyze_buffer(&buffer)
    }

    /// Derive waveform and spectrogram from an already decoded buffer
    pub fn analyze_buffer(&self, buffer: &AudioBuffer) -> Result<AnalysisResult, AnalysisError> {
        let (waveform, spectrogram) = rayon::join(
            || extract_waveform_with(buffer, &self.config.waveform),
            || transform(buffer, &self.config.spectrogram),
        );

        let waveform = waveform.map_err(|e| AnalysisError::new(Stage::Waveform, e))?;
        let spectrogram = spectrogram.map_err(|e| AnalysisError::new(Stage::Spectrogram, e))?;

        log::info!(
            "Analysis complete: {} waveform points, spectrogram {} bins x {} frames",
            waveform.len(),
            spectrogram.num_bins(),
            spectrogram.num_frames()
        );

        Ok(AnalysisResult::new(
            waveform,
            spectrogram,
            buffer.sample_rate(),
            buffer.duration_seconds(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, ErrorKind};

    /// Decoder that ignores its source and hands back a fixed buffer
    struct FixedDecoder(AudioBuffer);

    impl AudioDecoder for FixedDecoder {
        fn decode(&self, _source: AudioSource) -> Result<AudioBuffer, DecodeError> {
            Ok(self.0.clone())
        }
    }

    struct FailingDecoder;

    impl AudioDecoder for FailingDecoder {
        fn decode(&self, _source: AudioSource) -> Result<AudioBuffer, DecodeError> {
            Err(DecodeError::NoTrack)
        }
    }

    fn ramp_buffer() -> AudioBuffer {
        let samples = (0..4000).map(|i| (i % 100) as f32 / 100.0 - 0.5).collect();
        AudioBuffer::new(samples, 8000).unwrap()
    }

    #[test]
    fn test_result_carries_rate_and_duration() {
        let pipeline = AnalysisPipeline::new(AnalysisConfig::new(), FixedDecoder(ramp_buffer()));
        let result = pipeline.analyze(AudioSource::Bytes(vec![1])).unwrap();
        assert_eq!(result.sample_rate(), 8000);
        assert!((result.duration_seconds() - 0.5).abs() < 1e-12);
        assert_eq!(result.waveform().len(), 4000);
        assert_eq!(result.spectrogram().num_bins(), 1025);
    }

    #[test]
    fn test_decode_failure_is_tagged() {
        let pipeline = AnalysisPipeline::new(AnalysisConfig::new(), FailingDecoder);
        let err = pipeline.analyze(AudioSource::Bytes(vec![1])).unwrap_err();
        assert_eq!(err.stage, Stage::Decode);
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_bad_parameters_rejected_before_decode() {
        let config = AnalysisConfig::new().with_frames(1024, 0, Default::default());
        // FailingDecoder would report a decode error if it were reached
        let pipeline = AnalysisPipeline::new(config, FailingDecoder);
        let err = pipeline.analyze(AudioSource::Bytes(vec![1])).unwrap_err();
        assert_eq!(err.stage, Stage::Spectrogram);
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_non_finite_samples_fail_in_spectrogram_stage() {
        let buffer = AudioBuffer::new(vec![0.0, f32::INFINITY, 0.0, 0.0], 8000).unwrap();
        let pipeline = AnalysisPipeline::new(AnalysisConfig::new(), FixedDecoder(buffer));
        let err = pipeline.analyze(AudioSource::Bytes(vec![1])).unwrap_err();
        assert_eq!(err.stage, Stage::Spectrogram);
        assert_eq!(err.kind(), ErrorKind::Transform);
    }
}
