//! Error taxonomy for the analysis pipeline
//!
//! Every stage fails fast and hands its error up unchanged. The orchestrator
//! wraps it in an [`AnalysisError`] that records which stage produced it.

use std::fmt;
use thiserror::Error;

/// Failures while turning a source into samples
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source contained zero bytes
    #[error("audio source is empty")]
    EmptySource,

    /// The source could not be opened or read
    #[error("failed to read audio source: {0}")]
    Io(#[from] std::io::Error),

    /// The container or codec was not recognized
    #[error("unsupported or corrupted audio: {0}")]
    Unsupported(#[from] symphonia::core::errors::Error),

    /// The container holds no decodable audio track
    #[error("no audio track found")]
    NoTrack,

    /// The audio track does not declare a sample rate
    #[error("no sample rate in audio track")]
    MissingSampleRate,

    /// Decoding finished without producing a single sample
    #[error("decoding produced no samples")]
    NoSamples,

    /// Resampling to the requested rate failed
    #[error("resampling failed: {0}")]
    Resample(String),
}

/// Crate-level error kinds
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(DecodeError),

    /// A buffer with zero samples reached a stage that needs samples
    #[error("audio buffer contains no samples")]
    EmptyBuffer,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numeric failure during spectral computation
    #[error("spectral transform failed: {0}")]
    Transform(String),
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::NoSamples => Error::EmptyBuffer,
            other => Error::Decode(other),
        }
    }
}

/// Discriminant of [`Error`], for callers that branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    EmptyBuffer,
    InvalidParameter,
    Transform,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Decode(_) => ErrorKind::Decode,
            Error::EmptyBuffer => ErrorKind::EmptyBuffer,
            Error::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Error::Transform(_) => ErrorKind::Transform,
        }
    }

    /// Short corrective suggestion for user-facing messages
    pub fn hint(&self) -> &'static str {
        match self {
            Error::Decode(DecodeError::EmptySource) | Error::EmptyBuffer => {
                "the audio source is empty; check the file or download"
            }
            Error::Decode(DecodeError::Io(_)) => "check that the path exists and is readable",
            Error::Decode(_) => "unsupported or corrupted audio source",
            Error::InvalidParameter(_) => {
                "use a positive frame size, hop size and dynamic range"
            }
            Error::Transform(_) => "the decoded audio contains invalid (non-finite) samples",
        }
    }
}

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Waveform,
    Spectrogram,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decode => "decode",
            Stage::Waveform => "waveform",
            Stage::Spectrogram => "spectrogram",
        };
        f.write_str(name)
    }
}

/// Error surfaced by [`crate::analyze`], tagged with the failing stage
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct AnalysisError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

impl AnalysisError {
    pub fn new(stage: Stage, source: impl Into<Error>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
