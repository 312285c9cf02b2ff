//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised by sampling, pool and composition operations.
///
/// Sizing a [`TilePicture`](crate::TilePicture) that has no image yet, or a
/// zero-sized one, is not an error: the re-render is simply skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MosaicError {
    /// A size, crop or aspect ratio was zero, negative, non-finite or not a number.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Nearest-color lookup was requested on a pool without tiles.
    #[error("tile pool is empty")]
    EmptyPool,

    /// Composition was requested before a target was set.
    #[error("no target picture set")]
    MissingTarget,

    /// The target raster does not have one pixel per grid cell.
    #[error("target has {actual} pixels but the grid has {expected} cells")]
    GridMismatch { expected: usize, actual: usize },

    /// A tile was added to the pool before its average color was known.
    #[error("tile has no average color (no image or zero size)")]
    UnrenderedTile,

    /// Color blending outside of `0.0..=1.0`.
    #[error("color blending must be within 0..=1, got {0}")]
    InvalidBlending(f64),

    /// A pixel buffer does not match its declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// The output surface could not perform the requested operation.
    #[error("surface error: {0}")]
    Surface(String),
}

impl MosaicError {
    pub(crate) fn dimensions(msg: impl Into<String>) -> Self {
        MosaicError::InvalidDimensions(msg.into())
    }
}

/// Parse a pixel dimension such as `"300"` or `" 12 "`.
///
/// Fractional values are truncated, matching how sizes coming from markup
/// attributes are treated. Negative, non-finite and non-numeric input fails.
pub fn parse_dimension(value: &str) -> Result<u32, MosaicError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| MosaicError::dimensions(format!("{value:?} is not a number")))?;
    if !parsed.is_finite() || parsed < 0.0 || parsed > u32::MAX as f64 {
        return Err(MosaicError::dimensions(format!(
            "{value:?} is not a valid size"
        )));
    }
    Ok(parsed.trunc() as u32)
}

/// Parse a positive, finite ratio such as `"1.5"` or `"16/9"`.
pub fn parse_ratio(value: &str) -> Result<f64, MosaicError> {
    let invalid = || MosaicError::dimensions(format!("{value:?} is not a valid ratio"));

    let ratio = match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().map_err(|_| invalid())?;
            let den: f64 = den.trim().parse().map_err(|_| invalid())?;
            num / den
        }
        None => value.trim().parse().map_err(|_| invalid())?,
    };

    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(MosaicError::EmptyPool.to_string(), "tile pool is empty");
        assert_eq!(MosaicError::MissingTarget.to_string(), "no target picture set");
        assert_eq!(
            MosaicError::GridMismatch {
                expected: 100,
                actual: 64
            }
            .to_string(),
            "target has 64 pixels but the grid has 100 cells"
        );
        assert_eq!(
            MosaicError::InvalidBlending(1.5).to_string(),
            "color blending must be within 0..=1, got 1.5"
        );
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("300").unwrap(), 300);
        assert_eq!(parse_dimension(" 12 ").unwrap(), 12);
        assert_eq!(parse_dimension("10.9").unwrap(), 10);
        assert_eq!(parse_dimension("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_dimension_rejects_garbage() {
        for input in ["", "abc", "-1", "NaN", "inf", "1e20"] {
            assert!(
                matches!(parse_dimension(input), Err(MosaicError::InvalidDimensions(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("1").unwrap(), 1.0);
        assert_eq!(parse_ratio("1.5").unwrap(), 1.5);
        assert!((parse_ratio("16/9").unwrap() - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_ratio_rejects_degenerate() {
        for input in ["0", "-2", "1/0", "0/4", "wide", "3/x"] {
            assert!(
                matches!(parse_ratio(input), Err(MosaicError::InvalidDimensions(_))),
                "{input:?} should be rejected"
            );
        }
    }
}
