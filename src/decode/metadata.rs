//! Embedded tag metadata (title, artist, container) for display next to the plots
//!
//! Independent of the analysis pipeline: a file with unreadable tags can still
//! be analyzed.

use lofty::prelude::*;
use lofty::probe::Probe;
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to open source for tag reading: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read tags: {0}")]
    Tags(#[from] lofty::error::LoftyError),
}

/// Descriptive information about a source
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Container type as detected from the content (e.g. "Mpeg", "Flac")
    pub file_type: Option<String>,
    pub channels: Option<u8>,
    pub sample_rate: Option<u32>,
    /// Duration reported by the container, in seconds
    pub duration_seconds: Option<f64>,
}

/// Read tags and container properties from a file
pub fn read_metadata(path: &Path) -> Result<SourceMetadata, MetadataError> {
    let tagged_file = Probe::open(path)?.read()?;
    Ok(collect(&tagged_file))
}

/// Read tags and container properties from in-memory bytes
pub fn read_metadata_from_bytes(bytes: &[u8]) -> Result<SourceMetadata, MetadataError> {
    let tagged_file = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;
    Ok(collect(&tagged_file))
}

fn collect(tagged_file: &lofty::file::TaggedFile) -> SourceMetadata {
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let properties = tagged_file.properties();
    let duration = properties.duration();

    SourceMetadata {
        title: tag.and_then(|t| t.title().map(|s| s.into_owned())),
        artist: tag.and_then(|t| t.artist().map(|s| s.into_owned())),
        album: tag.and_then(|t| t.album().map(|s| s.into_owned())),
        file_type: Some(format!("{:?}", tagged_file.file_type())),
        channels: properties.channels(),
        sample_rate: properties.sample_rate(),
        duration_seconds: (!duration.is_zero()).then(|| duration.as_secs_f64()),
    }
}
