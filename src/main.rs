use anyhow::Result;
use audioscope::decode::{read_metadata, read_metadata_from_bytes, SourceMetadata};
use audioscope::report::AnalysisReport;
use audioscope::{
    AnalysisConfig, AnalysisError, AnalysisPipeline, AudioSource, DecodeOptions, Downmix,
    SpectrogramConfig, WaveformOptions, WindowKind,
};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "audioscope")]
#[command(about = "Compute the waveform and decibel spectrogram of an audio file", long_about = None)]
struct Args {
    /// Audio file to analyze, or "-" to read from stdin
    input: String,

    /// FFT frame size in samples
    #[arg(long, default_value = "2048")]
    frame_size: usize,

    /// Hop between frames in samples (default: frame size / 4)
    #[arg(long)]
    hop_size: Option<usize>,

    /// Window applied to each frame
    #[arg(long, value_enum, default_value = "hann")]
    window: WindowArg,

    /// Center frames on their hop position (pads half a frame on each end)
    #[arg(long)]
    center: bool,

    /// Dynamic range below the peak before values are clamped (dB)
    #[arg(long, default_value = "80")]
    top_db: f32,

    /// How multi-channel audio is reduced to mono
    #[arg(long, value_enum, default_value = "average")]
    downmix: DownmixArg,

    /// Resample to this rate (Hz) after decoding
    #[arg(long)]
    resample: Option<u32>,

    /// Maximum waveform points before min/max envelope reduction
    #[arg(long, default_value_t = audioscope::analysis::DEFAULT_MAX_WAVEFORM_POINTS)]
    max_points: usize,

    /// Container format hint for stdin input (e.g. mp4, webm, mp3)
    #[arg(long)]
    format: Option<String>,

    /// Write the full analysis as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WindowArg {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<WindowArg> for WindowKind {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Hann => WindowKind::Hann,
            WindowArg::Hamming => WindowKind::Hamming,
            WindowArg::Blackman => WindowKind::Blackman,
            WindowArg::Rectangular => WindowKind::Rectangular,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DownmixArg {
    Average,
    First,
}

impl From<DownmixArg> for Downmix {
    fn from(arg: DownmixArg) -> Self {
        match arg {
            DownmixArg::Average => Downmix::Average,
            DownmixArg::First => Downmix::FirstChannel,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args);

    // Resolve the source; stdin is buffered so tags and audio read the same bytes
    let (source, metadata, label) = if args.input == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        let metadata = lookup_metadata(|| read_metadata_from_bytes(&bytes));
        (AudioSource::Bytes(bytes), metadata, "stdin".to_string())
    } else {
        let path = PathBuf::from(shellexpand::tilde(&args.input).as_ref());
        let metadata = lookup_metadata(|| read_metadata(&path));
        let label = path.display().to_string();
        (AudioSource::Path(path), metadata, label)
    };

    log::info!("Analyzing {}", label);

    let pipeline = AnalysisPipeline::with_config(config.clone());
    let result = match pipeline.analyze(source) {
        Ok(result) => result,
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    };

    if let Some(ref meta) = metadata {
        if let Some(ref title) = meta.title {
            log::info!("Title: {}", title);
        }
        if let Some(ref artist) = meta.artist {
            log::info!("Artist: {}", artist);
        }
    }

    let spectrogram = result.spectrogram();
    log::info!("Duration: {:.2}s at {}Hz", result.duration_seconds(), result.sample_rate());
    log::info!(
        "Waveform: {} points{}",
        result.waveform().len(),
        if result.waveform().reduced { " (min/max envelope)" } else { "" }
    );
    log::info!(
        "Spectrogram: {} frequency bins x {} frames ({} window, frame {}, hop {})",
        spectrogram.num_bins(),
        spectrogram.num_frames(),
        config.spectrogram.window,
        config.spectrogram.frame_size,
        config.spectrogram.hop_size
    );
    match spectrogram.dominant_frequency() {
        Some(freq) => log::info!("Dominant frequency: {:.1} Hz", freq),
        None => log::info!("Dominant frequency: none (silent input)"),
    }

    if let Some(ref json_path) = args.json {
        AnalysisReport::new(label, &result, &config.spectrogram, &config.waveform)
            .with_metadata(metadata.as_ref())
            .write(json_path)?;
    }

    Ok(())
}

fn build_config(args: &Args) -> AnalysisConfig {
    let mut spectrogram = SpectrogramConfig::new(args.frame_size)
        .with_window(args.window.into())
        .with_center(args.center)
        .with_top_db(args.top_db);
    if let Some(hop) = args.hop_size {
        spectrogram = spectrogram.with_hop_size(hop);
    }

    let mut decode = DecodeOptions::new().with_downmix(args.downmix.into());
    if let Some(rate) = args.resample {
        decode = decode.with_target_sample_rate(rate);
    }
    if let Some(ref format) = args.format {
        decode = decode.with_format_hint(format.clone());
    }

    AnalysisConfig::new()
        .with_decode(decode)
        .with_waveform(WaveformOptions::default().with_max_points(args.max_points))
        .with_spectrogram(spectrogram)
}

/// Tag lookup never blocks analysis; failures are only logged
fn lookup_metadata<E: std::fmt::Display>(
    read: impl FnOnce() -> std::result::Result<SourceMetadata, E>,
) -> Option<SourceMetadata> {
    match read() {
        Ok(meta) => Some(meta),
        Err(e) => {
            log::warn!("Could not read source metadata: {}", e);
            None
        }
    }
}

fn report_failure(e: &AnalysisError) {
    log::error!("❌ {}", e);
    log::error!("Suggestion: {}", e.source.hint());
}
