use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where the encoded audio comes from
pub enum AudioSource {
    /// A file on disk; its extension is used as a format hint
    Path(PathBuf),

    /// Encoded bytes already in memory, read from offset 0
    Bytes(Vec<u8>),

    /// Any byte stream (stdin, a download body, ...); drained to the end
    Reader(Box<dyn Read + Send>),
}

impl AudioSource {
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        AudioSource::Reader(Box::new(reader))
    }

    /// Extension of a path source, lowercased
    pub fn extension(&self) -> Option<String> {
        match self {
            AudioSource::Path(path) => path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase()),
            _ => None,
        }
    }
}

impl fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            AudioSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            AudioSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<PathBuf> for AudioSource {
    fn from(path: PathBuf) -> Self {
        AudioSource::Path(path)
    }
}

impl From<&Path> for AudioSource {
    fn from(path: &Path) -> Self {
        AudioSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for AudioSource {
    fn from(bytes: Vec<u8>) -> Self {
        AudioSource::Bytes(bytes)
    }
}

impl From<&[u8]> for AudioSource {
    fn from(bytes: &[u8]) -> Self {
        AudioSource::Bytes(bytes.to_vec())
    }
}
