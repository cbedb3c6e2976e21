mod common;

use audioscope::decode::{decode, decode_with, AudioDecoder, SymphoniaDecoder};
use audioscope::{AudioSource, DecodeError, DecodeOptions, Downmix};
use common::{interleave, sine, wav_bytes, wav_bytes_float, write_wav};
use std::io::Cursor;
use tempfile::TempDir;

#[test]
fn test_decode_wav_from_memory_keeps_native_rate() {
    let samples = sine(440.0, 22050, 0.5, 0.5);
    let bytes = wav_bytes(&samples, 1, 22050);

    let buffer = decode(AudioSource::Bytes(bytes)).unwrap();

    assert_eq!(buffer.sample_rate(), 22050);
    assert_eq!(buffer.len(), samples.len());
    // 16-bit quantization only
    for (a, b) in buffer.samples().iter().zip(&samples) {
        assert!((a - b).abs() < 1e-3);
    }
}

#[test]
fn test_decode_float_wav() {
    let samples = sine(1000.0, 48000, 0.25, 0.8);
    let buffer = decode(AudioSource::Bytes(wav_bytes_float(&samples, 48000))).unwrap();
    assert_eq!(buffer.sample_rate(), 48000);
    assert_eq!(buffer.samples(), &samples[..]);
}

#[test]
fn test_decode_from_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("tone.wav");
    let samples = sine(300.0, 16000, 1.0, 0.4);
    write_wav(&path, &samples, 16000);

    let buffer = decode(AudioSource::Path(path)).unwrap();
    assert_eq!(buffer.sample_rate(), 16000);
    assert_eq!(buffer.len(), 16000);
}

#[test]
fn test_decode_from_reader() {
    let samples = sine(300.0, 8000, 0.5, 0.4);
    let reader = Cursor::new(wav_bytes(&samples, 1, 8000));

    let buffer = decode(AudioSource::from_reader(reader)).unwrap();
    assert_eq!(buffer.len(), samples.len());
}

#[test]
fn test_stereo_average_downmix() {
    let left = vec![0.5f32; 1000];
    let right = vec![-0.25f32; 1000];
    let bytes = wav_bytes(&interleave(&left, &right), 2, 8000);

    let buffer = decode(AudioSource::Bytes(bytes)).unwrap();
    assert_eq!(buffer.len(), 1000);
    for &s in buffer.samples() {
        assert!((s - 0.125).abs() < 1e-3, "sample {}", s);
    }
}

#[test]
fn test_stereo_first_channel_downmix() {
    let left = vec![0.5f32; 1000];
    let right = vec![-0.25f32; 1000];
    let bytes = wav_bytes(&interleave(&left, &right), 2, 8000);

    let options = DecodeOptions::new().with_downmix(Downmix::FirstChannel);
    let buffer = decode_with(AudioSource::Bytes(bytes), &options).unwrap();
    assert_eq!(buffer.len(), 1000);
    for &s in buffer.samples() {
        assert!((s - 0.5).abs() < 1e-3, "sample {}", s);
    }
}

#[test]
fn test_decoder_trait_uses_its_options() {
    let bytes = wav_bytes(&interleave(&[0.5; 10], &[0.0; 10]), 2, 8000);
    let decoder = SymphoniaDecoder::new(DecodeOptions::new().with_downmix(Downmix::FirstChannel));
    let buffer = decoder.decode(AudioSource::Bytes(bytes)).unwrap();
    assert!((buffer.samples()[0] - 0.5).abs() < 1e-3);
}

#[test]
fn test_resample_on_request() {
    let samples = sine(440.0, 48000, 1.0, 0.5);
    let bytes = wav_bytes(&samples, 1, 48000);

    let options = DecodeOptions::new().with_target_sample_rate(16000);
    let buffer = decode_with(AudioSource::Bytes(bytes), &options).unwrap();

    assert_eq!(buffer.sample_rate(), 16000);
    let diff = (buffer.len() as i64 - 16000).abs();
    assert!(diff <= 16, "resampled length {}", buffer.len());
}

#[test]
fn test_max_duration_truncates() {
    let samples = sine(440.0, 8000, 2.0, 0.5);
    let bytes = wav_bytes(&samples, 1, 8000);

    let options = DecodeOptions::new().with_max_duration(0.5);
    let buffer = decode_with(AudioSource::Bytes(bytes), &options).unwrap();
    assert_eq!(buffer.len(), 4000);
}

#[test]
fn test_empty_file_is_empty_source() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("empty.mp3");
    std::fs::write(&path, b"").unwrap();

    let err = decode(AudioSource::Path(path)).unwrap_err();
    assert!(matches!(err, DecodeError::EmptySource), "{:?}", err);
}

#[test]
fn test_empty_reader_is_empty_source() {
    let err = decode(AudioSource::from_reader(std::io::empty())).unwrap_err();
    assert!(matches!(err, DecodeError::EmptySource), "{:?}", err);
}

#[test]
fn test_non_audio_bytes_are_rejected() {
    let bytes = b"<html><body>not audio at all</body></html>".repeat(64);
    let err = decode(AudioSource::Bytes(bytes)).unwrap_err();
    assert!(matches!(err, DecodeError::Unsupported(_)), "{:?}", err);
}

#[test]
fn test_decoding_is_repeatable() {
    let bytes = wav_bytes(&sine(220.0, 8000, 0.3, 0.6), 1, 8000);
    let a = decode(AudioSource::Bytes(bytes.clone())).unwrap();
    let b = decode(AudioSource::Bytes(bytes)).unwrap();
    assert_eq!(a, b);
}
