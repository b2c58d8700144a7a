//! Output dimension resolution for the resize-by-pixels path.
//!
//! The user may type a width, a height, both, or neither. [`resolve_dimensions`]
//! turns that into concrete output dimensions, optionally preserving the
//! source aspect ratio.
//!
//! When both a width and a height are given with aspect preservation on, the
//! image is fit inside the requested box: whichever axis is the tighter
//! constraint is kept and the other is recomputed, so the result never
//! exceeds the box on either axis.

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving output dimensions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    /// A resolved dimension is zero, negative, non-finite or too large.
    #[error("Invalid dimension: resolved size {width}x{height} is not a positive pixel size")]
    InvalidDimension { width: f64, height: f64 },
}

/// Compute output dimensions from native and requested sizes.
///
/// # Arguments
///
/// * `native_width`, `native_height` - Source image dimensions
/// * `requested_width`, `requested_height` - User-requested values, if any
/// * `preserve_aspect` - Derive or adjust values to keep `native_width / native_height`
///
/// # Rules
///
/// * Nothing requested: native dimensions.
/// * One value with `preserve_aspect`: the other is derived and rounded.
/// * Both values with `preserve_aspect`: fit inside the requested box.
/// * `preserve_aspect == false`: requested values verbatim; a missing value
///   keeps the native size on that axis.
///
/// # Example
///
/// ```ignore
/// use imgfit_core::dimensions::resolve_dimensions;
///
/// assert_eq!(resolve_dimensions(1920, 1080, Some(960), None, true), Ok((960, 540)));
/// assert_eq!(resolve_dimensions(800, 600, Some(400), Some(400), true), Ok((400, 300)));
/// ```
pub fn resolve_dimensions(
    native_width: u32,
    native_height: u32,
    requested_width: Option<u32>,
    requested_height: Option<u32>,
    preserve_aspect: bool,
) -> Result<(u32, u32), DimensionError> {
    let native_w = native_width as f64;
    let native_h = native_height as f64;
    let native_aspect = native_w / native_h;

    let (width, height) = match (requested_width, requested_height) {
        (None, None) => (native_w, native_h),
        (Some(w), Some(h)) if preserve_aspect => {
            let (w, h) = (w as f64, h as f64);
            let target_aspect = w / h;
            if native_aspect > target_aspect {
                (w, (w / native_aspect).round())
            } else {
                ((h * native_aspect).round(), h)
            }
        }
        (Some(w), None) if preserve_aspect => {
            let w = w as f64;
            (w, (w / native_aspect).round())
        }
        (None, Some(h)) if preserve_aspect => {
            let h = h as f64;
            ((h * native_aspect).round(), h)
        }
        (w, h) => (
            w.map_or(native_w, f64::from),
            h.map_or(native_h, f64::from),
        ),
    };

    let resolved = (to_pixels(width), to_pixels(height));
    match resolved {
        (Some(w), Some(h)) => {
            debug!(
                native_width,
                native_height,
                width = w,
                height = h,
                preserve_aspect,
                "resolved output dimensions"
            );
            Ok((w, h))
        }
        _ => Err(DimensionError::InvalidDimension { width, height }),
    }
}

fn to_pixels(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
