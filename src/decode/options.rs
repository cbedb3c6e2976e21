//! Decoder configuration

/// How multi-channel audio is reduced to mono
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Downmix {
    /// Arithmetic mean of all channels in each frame
    #[default]
    Average,

    /// Keep only the first channel
    FirstChannel,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOptions {
    pub downmix: Downmix,

    /// Resample to this rate after decoding (None = keep the native rate)
    pub target_sample_rate: Option<u32>,

    /// Stop decoding after this many seconds (None = decode everything)
    pub max_duration: Option<f64>,

    /// Container/codec hint (e.g. "mp4", "webm") for sources without a file extension
    pub format_hint: Option<String>,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_downmix(mut self, downmix: Downmix) -> Self {
        self.downmix = downmix;
        self
    }

    pub fn with_target_sample_rate(mut self, rate: u32) -> Self {
        self.target_sample_rate = Some(rate);
        self
    }

    pub fn with_max_duration(mut self, seconds: f64) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    pub fn with_format_hint(mut self, hint: impl Into<String>) -> Self {
        self.format_hint = Some(hint.into());
        self
    }
}
