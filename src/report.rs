//! JSON report written by the command-line front end

use crate::analysis::{SpectrogramConfig, WaveformOptions};
use crate::decode::SourceMetadata;
use crate::model::AnalysisResult;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Everything a renderer needs, plus provenance
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    /// Where the audio came from (path or "stdin")
    pub source: String,

    /// RFC 3339 timestamp of the analysis
    pub analyzed_at: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a SourceMetadata>,

    pub spectrogram_config: &'a SpectrogramConfig,

    pub waveform_options: &'a WaveformOptions,

    /// Frequency of the 0 dB cell, absent for silence
    pub dominant_frequency_hz: Option<f64>,

    pub result: &'a AnalysisResult,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(
        source: impl Into<String>,
        result: &'a AnalysisResult,
        spectrogram_config: &'a SpectrogramConfig,
        waveform_options: &'a WaveformOptions,
    ) -> Self {
        Self {
            source: source.into(),
            analyzed_at: chrono::Local::now().to_rfc3339(),
            metadata: None,
            spectrogram_config,
            waveform_options,
            dominant_frequency_hz: result.spectrogram().dominant_frequency(),
            result,
        }
    }

    pub fn with_metadata(mut self, metadata: Option<&'a SourceMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize analysis report")
    }

    /// Write the report as JSON to `path`
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {:?}", path))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write report: {:?}", path))?;
        log::info!("Report written to {:?}", path);
        Ok(())
    }
}
