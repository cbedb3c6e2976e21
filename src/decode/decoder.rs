//! Symphonia-backed decoding to mono f32 samples

use super::options::{DecodeOptions, Downmix};
use super::resample::resample_mono;
use super::source::AudioSource;
use crate::error::DecodeError;
use crate::model::AudioBuffer;
use std::io::{Cursor, Read};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Anything that turns an [`AudioSource`] into an [`AudioBuffer`]
///
/// Decoders are shared with the parallel analysis stages, so they must be
/// `Send + Sync`.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, source: AudioSource) -> Result<AudioBuffer, DecodeError>;
}

/// Default decoder: symphonia probes the container and decodes the first audio track
#[derive(Debug, Clone, Default)]
pub struct SymphoniaDecoder {
    options: DecodeOptions,
}

impl SymphoniaDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, source: AudioSource) -> Result<AudioBuffer, DecodeError> {
        decode_with(source, &self.options)
    }
}

/// Decode with default options (average downmix, native rate)
pub fn decode(source: AudioSource) -> Result<AudioBuffer, DecodeError> {
    decode_with(source, &DecodeOptions::default())
}

/// Decode a source to a mono buffer
pub fn decode_with(source: AudioSource, options: &DecodeOptions) -> Result<AudioBuffer, DecodeError> {
    log::debug!("Decoding {:?}", source);

    let mut hint = Hint::new();
    if let Some(ext) = source.extension() {
        hint.with_extension(&ext);
    } else if let Some(ref format) = options.format_hint {
        hint.with_extension(format);
    }

    let media = open_media(source)?;
    let (samples, native_rate) = decode_to_mono(media, &hint, options)?;

    if samples.is_empty() {
        return Err(DecodeError::NoSamples);
    }

    let (samples, sample_rate) = match options.target_sample_rate {
        Some(target) if target != native_rate => {
            (resample_mono(samples, native_rate, target)?, target)
        }
        _ => (samples, native_rate),
    };

    log::debug!(
        "Decoded {} samples ({:.1}s) at {}Hz",
        samples.len(),
        samples.len() as f64 / sample_rate as f64,
        sample_rate
    );

    AudioBuffer::new(samples, sample_rate).map_err(|_| DecodeError::NoSamples)
}

/// Turn a source into something symphonia can read, rejecting empty input
fn open_media(source: AudioSource) -> Result<Box<dyn MediaSource>, DecodeError> {
    match source {
        AudioSource::Path(path) => {
            let file = std::fs::File::open(&path)?;
            if file.metadata()?.len() == 0 {
                return Err(DecodeError::EmptySource);
            }
            Ok(Box::new(file))
        }
        AudioSource::Bytes(bytes) => bytes_media(bytes),
        AudioSource::Reader(mut reader) => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            drop(reader);
            bytes_media(bytes)
        }
    }
}

fn bytes_media(bytes: Vec<u8>) -> Result<Box<dyn MediaSource>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptySource);
    }
    Ok(Box::new(Cursor::new(bytes)))
}

fn decode_to_mono(
    media: Box<dyn MediaSource>,
    hint: &Hint,
    options: &DecodeOptions,
) -> Result<(Vec<f32>, u32), DecodeError> {
    let mss = MediaSourceStream::new(media, Default::default());

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe().format(hint, mss, &format_opts, &metadata_opts)?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .filter(|&rate| rate > 0)
        .ok_or(DecodeError::MissingSampleRate)?;

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &dec_opts)?;

    let max_samples = options
        .max_duration
        .map(|secs| (secs.max(0.0) * sample_rate as f64).ceil() as usize);

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(e) if is_end_of_stream(&e) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("Skipping corrupt packet: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let duration = decoded.capacity() as u64;

        let mut sample_buf = SampleBuffer::<f32>::new(duration, spec);
        sample_buf.copy_interleaved_ref(decoded);

        let channels = spec.channels.count().max(1);
        downmix_into(&mut all_samples, sample_buf.samples(), channels, options.downmix);

        if let Some(max) = max_samples {
            if all_samples.len() >= max {
                all_samples.truncate(max);
                break;
            }
        }
    }

    Ok((all_samples, sample_rate))
}

/// Whether a `next_packet` error just means the stream is exhausted
///
/// Anything else is a read failure and aborts the decode; a truncated buffer
/// is never returned as success.
fn is_end_of_stream(err: &SymphoniaError) -> bool {
    match err {
        SymphoniaError::IoError(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
        SymphoniaError::ResetRequired => true,
        _ => false,
    }
}

/// Append interleaved frames to `out` as mono
pub(crate) fn downmix_into(out: &mut Vec<f32>, interleaved: &[f32], channels: usize, downmix: Downmix) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    out.reserve(interleaved.len() / channels);
    for frame in interleaved.chunks(channels) {
        let mono = match downmix {
            Downmix::Average => frame.iter().sum::<f32>() / channels as f32,
            Downmix::FirstChannel => frame[0],
        };
        out.push(mono);
    }
}
