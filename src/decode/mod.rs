//! Decoder adapter
//!
//! Turns a path, a byte buffer or a reader into a mono [`crate::AudioBuffer`].
//! Container and codec work is delegated to symphonia; this layer only
//! normalizes the input and translates errors.
//!
//! Multi-channel audio is averaged to mono unless
//! [`Downmix::FirstChannel`] is requested.
//!
//! Individually corrupt packets are skipped with a warning. A failure to read
//! the stream itself aborts decoding with an error, even when some samples
//! were already decoded.

mod decoder;
mod metadata;
mod options;
mod resample;
mod source;

pub use decoder::{decode, decode_with, AudioDecoder, SymphoniaDecoder};
pub use metadata::{read_metadata, read_metadata_from_bytes, MetadataError, SourceMetadata};
pub use options::{DecodeOptions, Downmix};
pub use resample::resample_mono;
pub use source::AudioSource;
