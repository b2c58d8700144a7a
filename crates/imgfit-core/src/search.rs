//! Quality search that approximates a target output file size.
//!
//! Lossy codecs trade fidelity for size through a quality parameter. Given a
//! target byte count, [`find_quality_for_size`] binary-searches quality in
//! `[min_quality, max_quality]`, re-encoding the full-resolution image each
//! step, until an encode lands within `tolerance_ratio` of the target or the
//! iteration bound is hit.
//!
//! The search relies on encoded size being non-increasing as quality drops.
//! Lossy encoders behave that way in practice, although nothing guarantees
//! it; a codec that violates it just yields a less precise result.
//!
//! Failing to reach the target is not an error. The caller always gets the
//! best encode that was tried, with `met_target` telling them how it went.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::RasterImage;
use crate::encode::{encode_with, Codec, DefaultEncoder, EncodeError, EncodeResult, RasterEncoder};

/// Narrowest quality bracket worth another encode (half a JPEG quality step).
const MIN_BRACKET: f32 = 0.005;

/// Errors that can occur during the size search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The target size is not a positive number of bytes.
    #[error("Invalid target size: must be greater than zero")]
    InvalidTarget,

    /// The encode primitive rejected the image.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// How an encode's size is measured against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizeMeasure {
    /// Length of the encoded file.
    #[default]
    EncodedBytes,
    /// Length of the `data:` URL text, base64 overhead included.
    DataUrlLength,
}

impl SizeMeasure {
    fn measure(self, result: &EncodeResult) -> usize {
        match self {
            SizeMeasure::EncodedBytes => result.size_bytes,
            SizeMeasure::DataUrlLength => result.data_url_len(),
        }
    }
}

/// Search configuration. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Upper bound on trial encodes (at least 1 is always performed).
    pub max_iterations: u32,
    /// Acceptable relative deviation from the target.
    pub tolerance_ratio: f64,
    /// Lowest quality the search will try.
    pub min_quality: f32,
    /// Highest quality the search will try; also the first one tried.
    pub max_quality: f32,
    pub measure: SizeMeasure,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            tolerance_ratio: 0.05,
            min_quality: 0.1,
            max_quality: 1.0,
            measure: SizeMeasure::EncodedBytes,
        }
    }
}

impl SearchOptions {
    /// Clamp out-of-range values into something the search can run with.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let quality = |q: f32, fallback: f32| {
            if q.is_finite() {
                q.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        let mut min_quality = quality(self.min_quality, defaults.min_quality);
        let mut max_quality = quality(self.max_quality, defaults.max_quality);
        if min_quality > max_quality {
            std::mem::swap(&mut min_quality, &mut max_quality);
        }
        let tolerance_ratio = if self.tolerance_ratio.is_finite() && self.tolerance_ratio >= 0.0 {
            self.tolerance_ratio
        } else {
            defaults.tolerance_ratio
        };

        Self {
            max_iterations: self.max_iterations.max(1),
            tolerance_ratio,
            min_quality,
            max_quality,
            measure: self.measure,
        }
    }
}

/// Outcome of a size search.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSearchResult {
    pub best_result: EncodeResult,
    /// Quality that produced `best_result` (1.0 for PNG).
    pub best_quality: f32,
    /// Number of trial encodes performed.
    pub iterations: u32,
    /// Whether `best_result` is as close to the target as the codec allows.
    pub met_target: bool,
    /// Size of `best_result` under the configured [`SizeMeasure`].
    pub measured_size: usize,
}

/// Search for the quality whose encode best approximates `target_bytes`,
/// using the [`DefaultEncoder`].
pub fn find_quality_for_size(
    image: &RasterImage,
    target_bytes: u64,
    codec: Codec,
    options: &SearchOptions,
) -> Result<SizeSearchResult, SearchError> {
    find_quality_for_size_with(&DefaultEncoder, image, target_bytes, codec, options)
}

/// As [`find_quality_for_size`], with a caller-supplied encode primitive.
///
/// # Errors
///
/// * `SearchError::InvalidTarget` when `target_bytes` is zero
/// * `SearchError::Encode` when the encoder rejects the image
pub fn find_quality_for_size_with<E: RasterEncoder + ?Sized>(
    encoder: &E,
    image: &RasterImage,
    target_bytes: u64,
    codec: Codec,
    options: &SearchOptions,
) -> Result<SizeSearchResult, SearchError> {
    if target_bytes == 0 {
        return Err(SearchError::InvalidTarget);
    }
    let options = options.normalized();
    let target = Target::new(target_bytes, options.tolerance_ratio);

    if !codec.is_lossy() {
        let result = encode_with(encoder, image, codec, options.max_quality)?;
        let measured = options.measure.measure(&result);
        let met_target = target.within(measured) || measured < target.bytes;
        debug!(size = measured, target = target_bytes, met_target, "lossless encode, no search");
        return Ok(SizeSearchResult {
            best_result: result,
            best_quality: 1.0,
            iterations: 1,
            met_target,
            measured_size: measured,
        });
    }

    let mut low = options.min_quality;
    let mut high = options.max_quality;
    let mut quality = high;
    let mut iterations = 0;

    // Largest encode not over the ceiling, and smallest encode overall.
    let mut best: Option<Candidate> = None;
    let mut smallest: Option<Candidate> = None;

    while iterations < options.max_iterations {
        let candidate = Candidate::encode(encoder, image, codec, quality, options.measure)?;
        iterations += 1;
        let size = candidate.measured;
        debug!(iteration = iterations, quality, size, low, high, "size search step");

        let close_enough = target.within(size);
        let too_large = size > target.bytes;
        let undershoots_at_ceiling = !too_large && quality >= options.max_quality;

        if smallest.as_ref().map_or(true, |s| size < s.measured) {
            smallest = Some(candidate.clone());
        }
        if size <= target.ceiling && best.as_ref().map_or(true, |b| size > b.measured) {
            best = Some(candidate);
        }

        if close_enough || undershoots_at_ceiling {
            break;
        }

        if too_large {
            high = quality;
        } else {
            low = quality;
        }
        if high - low < MIN_BRACKET {
            break;
        }
        quality = (low + high) / 2.0;
    }

    // Nothing fit: make sure the quality floor itself was tried.
    if best.is_none() && iterations < options.max_iterations {
        let tried_floor = smallest
            .as_ref()
            .is_some_and(|s| s.quality <= options.min_quality);
        if !tried_floor {
            let candidate =
                Candidate::encode(encoder, image, codec, options.min_quality, options.measure)?;
            iterations += 1;
            debug!(iteration = iterations, quality = options.min_quality, size = candidate.measured, "quality floor probe");
            if candidate.measured <= target.ceiling {
                best = Some(candidate);
            } else if smallest.as_ref().map_or(true, |s| candidate.measured < s.measured) {
                smallest = Some(candidate);
            }
        }
    }

    let chosen = match best.or(smallest) {
        Some(chosen) => chosen,
        // max_iterations >= 1, so at least one encode happened
        None => Candidate::encode(encoder, image, codec, options.min_quality, options.measure)?,
    };

    let met_target = target.within(chosen.measured)
        || (chosen.measured < target.bytes && chosen.quality >= options.max_quality);

    debug!(
        quality = chosen.quality,
        size = chosen.measured,
        target = target_bytes,
        iterations,
        met_target,
        "size search finished"
    );

    Ok(SizeSearchResult {
        best_result: chosen.result,
        best_quality: chosen.quality,
        iterations,
        met_target,
        measured_size: chosen.measured,
    })
}

#[derive(Debug, Clone)]
struct Candidate {
    quality: f32,
    measured: usize,
    result: EncodeResult,
}

impl Candidate {
    fn encode<E: RasterEncoder + ?Sized>(
        encoder: &E,
        image: &RasterImage,
        codec: Codec,
        quality: f32,
        measure: SizeMeasure,
    ) -> Result<Self, EncodeError> {
        let result = encode_with(encoder, image, codec, quality)?;
        Ok(Self {
            quality,
            measured: measure.measure(&result),
            result,
        })
    }
}

struct Target {
    bytes: usize,
    /// Absolute tolerance in bytes.
    slack: f64,
    /// Largest size still acceptable as a candidate.
    ceiling: usize,
}

impl Target {
    fn new(bytes: u64, tolerance_ratio: f64) -> Self {
        let bytes = usize::try_from(bytes).unwrap_or(usize::MAX);
        let slack = bytes as f64 * tolerance_ratio;
        Self {
            bytes,
            slack,
            ceiling: (bytes as f64 + slack).floor().min(usize::MAX as f64) as usize,
        }
    }

    fn within(&self, size: usize) -> bool {
        (size as f64 - self.bytes as f64).abs() <= self.slack
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    struct LinearEncoder {
        floor: usize,
        ceiling: usize,
    }

    impl RasterEncoder for LinearEncoder {
        fn encode(&self, _: &RasterImage, _: Codec, quality: f32) -> Result<Vec<u8>, EncodeError> {
            let span = (self.ceiling - self.floor) as f32;
            Ok(vec![0u8; self.floor + (span * quality).round() as usize])
        }
    }

    proptest! {
        /// Property: lossy searches never exceed the iteration bound.
        #[test]
        fn prop_terminates_within_bound(
            floor in 100usize..=5_000,
            extra in 1_000usize..=200_000,
            target in 1u64..=300_000,
            max_iterations in 1u32..=30,
            tolerance_ratio in 0.0f64..=0.2,
        ) {
            let encoder = LinearEncoder { floor, ceiling: floor + extra };
            let img = RasterImage::new(1, 1, vec![0, 0, 0]);
            let options = SearchOptions { max_iterations, tolerance_ratio, ..SearchOptions::default() };

            let result = find_quality_for_size_with(&encoder, &img, target, Codec::Jpeg, &options).unwrap();
            prop_assert!(result.iterations >= 1);
            prop_assert!(result.iterations <= max_iterations);
            prop_assert!(result.best_quality >= options.min_quality);
            prop_assert!(result.best_quality <= options.max_quality);
        }

        /// Property: a target between the floor and ceiling sizes is met with
        /// the default options.
        #[test]
        fn prop_reachable_target_is_met(
            floor in 100usize..=5_000,
            extra in 10_000usize..=200_000,
            fraction in 0.15f64..=0.95,
        ) {
            let ceiling = floor + extra;
            let encoder = LinearEncoder { floor, ceiling };
            let low = floor as f64 + extra as f64 * 0.1;
            let target = (low + (ceiling as f64 - low) * fraction) as u64;
            let img = RasterImage::new(1, 1, vec![0, 0, 0]);

            let result = find_quality_for_size_with(&encoder, &img, target, Codec::WebP, &SearchOptions::default()).unwrap();
            prop_assert!(result.met_target, "target {} got {}", target, result.best_result.size_bytes);
        }
    }
}
