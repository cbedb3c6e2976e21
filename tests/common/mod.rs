//! Shared fixtures: synthetic signals and in-memory WAV files

#![allow(dead_code)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::io::Cursor;
use std::path::Path;

/// Mono sine wave
pub fn sine(freq: f32, sample_rate: u32, seconds: f32, amplitude: f32) -> Vec<f32> {
    let n = (sample_rate as f32 * seconds).round() as usize;
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Encode interleaved samples as a 16-bit PCM WAV file in memory
pub fn wav_bytes(interleaved: &[f32], channels: u16, sample_rate: u32) -> Vec<u8> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).expect("Failed to create WAV writer");
        for &s in interleaved {
            let value = (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
            writer.write_sample(value).expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");
    }
    cursor.into_inner()
}

/// Encode mono samples as a 32-bit float WAV file in memory
pub fn wav_bytes_float(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).expect("Failed to create WAV writer");
        for &s in samples {
            writer.write_sample(s).expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");
    }
    cursor.into_inner()
}

/// Interleave two equal-length channels
pub fn interleave(left: &[f32], right: &[f32]) -> Vec<f32> {
    left.iter()
        .zip(right.iter())
        .flat_map(|(&l, &r)| [l, r])
        .collect()
}

/// Write a mono 16-bit WAV to disk
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) {
    std::fs::write(path, wav_bytes(samples, 1, sample_rate)).expect("Failed to write WAV file");
}
