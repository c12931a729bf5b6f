//! Errors produced while parsing an ICC profile.

use thiserror::Error;

use crate::types::Signature;

/// All failures are structural: the input bytes don't describe a
/// valid profile. There is no transient/retryable case.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("buffer too small: need at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("missing 'acsp' signature")]
    BadSignature,

    #[error("declared profile size {declared} is outside the valid range [{min}, {buffer_len}]")]
    BadProfileSize {
        declared: usize,
        min: usize,
        buffer_len: usize,
    },

    #[error("unsupported profile version: major byte {major} > 4")]
    UnsupportedVersion { major: u8 },

    #[error(
        "illuminant ({x}, {y}, {z}) is not within tolerance of D50 (0.9642, 1.0000, 0.8249)"
    )]
    NonD50Illuminant { x: f32, y: f32, z: f32 },

    #[error("tag {signature} at offset {offset} size {size} exceeds profile size {profile_size}")]
    TagOutOfBounds {
        signature: Signature,
        offset: usize,
        size: usize,
        profile_size: usize,
    },

    #[error("tag {signature} has size {size}, smaller than the minimum of 4 bytes")]
    TagTooSmall { signature: Signature, size: usize },

    #[error("tag {signature} has unexpected type {found}, expected one of {expected:?}")]
    UnexpectedTagType {
        signature: Signature,
        found: Signature,
        expected: &'static [Signature],
    },

    #[error("function_type {found} is out of range [0, 4]")]
    BadParametricFunctionType { found: u16 },

    #[error("parametric curve coefficient 'a' is zero, which is invalid for function_type {function_type}")]
    ZeroParametricA { function_type: u16 },

    #[error("table_entries {found} is outside the valid range [2, 4096]")]
    BadTableEntries { found: u32 },

    #[error("grid_points[{axis}] = {found} is below the minimum of 2")]
    BadGridPoints { axis: usize, found: u8 },

    #[error("input_channels {found} is outside the valid range [1, 4]")]
    BadInputChannels { found: u8 },

    #[error("output_channels {found}, expected 3")]
    BadOutputChannels { found: u8 },

    #[error("byte_width {found} is neither 1 nor 2")]
    BadByteWidth { found: u8 },

    #[error("'mAB ' tag is missing its required B-curve offset")]
    MissingBCurve,

    #[error("'mAB ' tag has an A-curve offset without a matching CLUT offset, or vice versa")]
    AOrClutMismatch,

    #[error("'mAB ' tag has an M-curve offset without a matching matrix offset, or vice versa")]
    MOrMatrixMismatch,
}
