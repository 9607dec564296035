//! The compression decision engine.
//!
//! Given a source image over the size budget, the engine escalates through
//! three strategies, each built from render+encode probes:
//!
//! 1. **Lossless scale search** (PNG originals only): bisect the scale in
//!    `[0.5, 0.99]` for six probes, keeping the largest PNG that fits.
//! 2. **Lossy quality search**: try a full-size JPEG at quality 1.0, then
//!    bisect quality in `[0.5, 1.0]` for seven probes against 99% of the
//!    budget, keeping the highest quality that fits.
//! 3. **Dimension fallback**: step the scale down from 0.9 in tenths at
//!    quality 0.8 and return the first JPEG under budget, else one unchecked
//!    half-size, half-quality encode.
//!
//! Probes run one at a time. Only the best candidate of the current strategy
//! is held; every other buffer is dropped as soon as it is measured.

use log::{debug, info, warn};

use super::{
    scaled_dimensions, CompressConfig, CompressError, Compressed, Probe, SourceImage, Strategy,
};
use crate::encode::{Encoder, OutputFormat};
use crate::render::{Background, Rasterizer};

/// Fallback scales in tenths: 0.9 down to 0.2, stopping before 0.1.
///
/// Stepping in integer tenths never reaches 0.1. A float loop subtracting
/// 0.1 ends near 0.1000000000000002, which passes `scale > 0.1` and probes a
/// ninth time.
const FALLBACK_TENTHS: std::ops::RangeInclusive<u32> = 2..=9;

/// Size test applied to a probe.
#[derive(Debug, Clone, Copy)]
enum Ceiling {
    /// `size < budget`
    Below(u64),
    /// `size <= target`
    AtMost(f64),
    /// Accepted without a size check.
    Unchecked,
}

impl Ceiling {
    fn admits(self, size: u64) -> bool {
        match self {
            Ceiling::Below(budget) => size < budget,
            Ceiling::AtMost(target) => size as f64 <= target,
            Ceiling::Unchecked => true,
        }
    }
}

/// Parameters of a single probe.
#[derive(Debug, Clone, Copy)]
struct Attempt {
    strategy: Strategy,
    scale: f64,
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: Option<f32>,
}

impl Attempt {
    fn at_scale(
        source: &SourceImage,
        strategy: Strategy,
        scale: f64,
        format: OutputFormat,
        quality: Option<f32>,
    ) -> Self {
        let (width, height) = scaled_dimensions(source.width, source.height, scale);
        Self {
            strategy,
            scale,
            width,
            height,
            format,
            quality,
        }
    }

    fn background(&self) -> Background {
        // Lossy output cannot carry alpha
        if self.format.is_lossless() {
            Background::Transparent
        } else {
            Background::White
        }
    }
}

/// An encoded probe and the verdict of its size check.
#[derive(Debug)]
struct Candidate {
    attempt: Attempt,
    bytes: Vec<u8>,
    accepted: bool,
}

impl Candidate {
    fn finish(self, probes: Vec<Probe>) -> Compressed {
        Compressed {
            bytes: self.bytes,
            format: self.attempt.format,
            width: self.attempt.width,
            height: self.attempt.height,
            strategy: self.attempt.strategy,
            quality: self.attempt.quality,
            probes,
        }
    }
}

/// Searches for the best encoding that fits the size budget.
///
/// Generic over the rasterizer and encoder so the search can be driven by
/// real codecs or by deterministic fakes.
#[derive(Debug)]
pub struct Compressor<R, E> {
    rasterizer: R,
    encoder: E,
    config: CompressConfig,
}

impl<R, E> Compressor<R, E>
where
    R: Rasterizer,
    E: Encoder<R::Buffer>,
{
    /// Create a compressor with the default 1 MiB configuration.
    pub fn new(rasterizer: R, encoder: E) -> Self {
        Self {
            rasterizer,
            encoder,
            config: CompressConfig::default(),
        }
    }

    /// Create a compressor with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidConfig` if the configuration fails
    /// validation.
    pub fn with_config(
        rasterizer: R,
        encoder: E,
        config: CompressConfig,
    ) -> Result<Self, CompressError> {
        config.validate()?;
        Ok(Self {
            rasterizer,
            encoder,
            config,
        })
    }

    pub fn config(&self) -> &CompressConfig {
        &self.config
    }

    /// Produce an encoding of `source` within the budget.
    ///
    /// Inputs already under the budget are returned byte-for-byte without
    /// rendering anything. Otherwise the result is under the budget unless it
    /// came from the last-resort encode, which is returned regardless.
    ///
    /// # Errors
    ///
    /// Any render or encode failure aborts the whole attempt.
    pub fn compress(
        &mut self,
        source: &SourceImage,
        original: &[u8],
    ) -> Result<Compressed, CompressError> {
        if source.byte_size < self.config.budget_bytes {
            info!(
                "{} bytes is under the {} byte budget, returning original",
                source.byte_size, self.config.budget_bytes
            );
            return Ok(Compressed::pass_through(
                original,
                source.origin,
                source.width,
                source.height,
            ));
        }

        let mut probes = Vec::new();

        if source.origin.is_lossless_transparent() {
            if let Some(best) = self.search_scale(source, &mut probes)? {
                info!(
                    "PNG fits at {}x{} after {} probes",
                    best.attempt.width,
                    best.attempt.height,
                    probes.len()
                );
                return Ok(best.finish(probes));
            }
            debug!("no PNG scale fits, switching to JPEG");
        }

        if let Some(best) = self.search_quality(source, &mut probes)? {
            info!(
                "JPEG fits at quality {:?} after {} probes",
                best.attempt.quality,
                probes.len()
            );
            return Ok(best.finish(probes));
        }

        let best = self.shrink_dimensions(source, &mut probes)?;
        info!(
            "JPEG fallback at {}x{} after {} probes",
            best.attempt.width,
            best.attempt.height,
            probes.len()
        );
        Ok(best.finish(probes))
    }

    /// Strategy 1: bisect the PNG scale, keeping the largest that fits.
    fn search_scale(
        &mut self,
        source: &SourceImage,
        probes: &mut Vec<Probe>,
    ) -> Result<Option<Candidate>, CompressError> {
        let range = self.config.scale_search;
        let ceiling = Ceiling::Below(self.config.budget_bytes);
        let (mut low, mut high) = (range.min, range.max);
        let mut best = None;

        for _ in 0..range.iterations {
            let mid = (low + high) / 2.0;
            let attempt = Attempt::at_scale(
                source,
                Strategy::LosslessScale,
                mid,
                OutputFormat::Png,
                None,
            );
            let candidate = self.probe(attempt, ceiling, probes)?;
            if candidate.accepted {
                best = Some(candidate);
                low = mid;
            } else {
                high = mid;
            }
        }
        Ok(best)
    }

    /// Strategy 2: full-quality JPEG, then bisect quality under the margin.
    fn search_quality(
        &mut self,
        source: &SourceImage,
        probes: &mut Vec<Probe>,
    ) -> Result<Option<Candidate>, CompressError> {
        let full = Attempt::at_scale(
            source,
            Strategy::LossyFullQuality,
            1.0,
            OutputFormat::Jpeg,
            Some(1.0),
        );
        let candidate = self.probe(full, Ceiling::Below(self.config.budget_bytes), probes)?;
        if candidate.accepted {
            return Ok(Some(candidate));
        }
        drop(candidate);

        let range = self.config.quality_search;
        let ceiling = Ceiling::AtMost(self.config.lossy_target());
        let (mut low, mut high) = (range.min, range.max);
        let mut best = None;

        for _ in 0..range.iterations {
            let mid = (low + high) / 2.0;
            let attempt = Attempt::at_scale(
                source,
                Strategy::LossyQuality,
                1.0,
                OutputFormat::Jpeg,
                Some(mid as f32),
            );
            let candidate = self.probe(attempt, ceiling, probes)?;
            if candidate.accepted {
                best = Some(candidate);
                low = mid;
            } else {
                high = mid;
            }
        }
        Ok(best)
    }

    /// Strategy 3: step dimensions down, then force a last-resort encode.
    fn shrink_dimensions(
        &mut self,
        source: &SourceImage,
        probes: &mut Vec<Probe>,
    ) -> Result<Candidate, CompressError> {
        let ceiling = Ceiling::Below(self.config.budget_bytes);
        let quality = Some(self.config.fallback_quality);

        for tenths in FALLBACK_TENTHS.rev() {
            let scale = f64::from(tenths) / 10.0;
            let attempt = Attempt::at_scale(
                source,
                Strategy::DimensionFallback,
                scale,
                OutputFormat::Jpeg,
                quality,
            );
            let candidate = self.probe(attempt, ceiling, probes)?;
            if candidate.accepted {
                return Ok(candidate);
            }
        }

        let last = Attempt::at_scale(
            source,
            Strategy::LastResort,
            self.config.last_resort_scale,
            OutputFormat::Jpeg,
            Some(self.config.last_resort_quality),
        );
        let candidate = self.probe(last, Ceiling::Unchecked, probes)?;
        if candidate.bytes.len() as u64 >= self.config.budget_bytes {
            warn!(
                "last resort encode is {} bytes, over the {} byte budget",
                candidate.bytes.len(),
                self.config.budget_bytes
            );
        }
        Ok(candidate)
    }

    /// Render and encode one attempt and record it.
    ///
    /// The pixel buffer is dropped before returning; callers drop the
    /// candidate itself as soon as it is rejected or superseded.
    fn probe(
        &mut self,
        attempt: Attempt,
        ceiling: Ceiling,
        probes: &mut Vec<Probe>,
    ) -> Result<Candidate, CompressError> {
        let bytes = {
            let pixels = self
                .rasterizer
                .render(attempt.width, attempt.height, attempt.background())?;
            self.encoder
                .encode(&pixels, attempt.format, attempt.quality)?
        };

        let size = bytes.len() as u64;
        let accepted = ceiling.admits(size);
        debug!(
            "{:?} probe {}x{} {:?} q={:?}: {} bytes, {}",
            attempt.strategy,
            attempt.width,
            attempt.height,
            attempt.format,
            attempt.quality,
            size,
            if accepted { "fits" } else { "too large" }
        );

        probes.push(Probe {
            strategy: attempt.strategy,
            scale: attempt.scale,
            width: attempt.width,
            height: attempt.height,
            format: attempt.format,
            quality: attempt.quality,
            size,
            accepted,
        });

        Ok(Candidate {
            attempt,
            bytes,
            accepted,
        })
    }
}
