use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlicError {
    /// The Golomb divisor m must be at least 1.
    #[error("Golomb divisor must be at least 1")]
    InvalidParameter,

    /// A dimension is zero or exceeds the 16-bit range the header can carry.
    #[error("image dimensions {width}x{height} are outside the supported range")]
    InvalidDimensions { width: usize, height: usize },

    /// The raster length disagrees with width * height.
    #[error("raster holds {actual} samples but {width}x{height} requires {expected}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// The bit sequence ended in the middle of a codeword or header field.
    #[error("bit stream ended inside a codeword at bit {position}")]
    TruncatedStream { position: usize },

    /// A decoded symbol folds to a value no encoder could have produced.
    #[error("symbol starting at bit {position} exceeds the representable value range")]
    ValueOutOfRange { position: usize },

    /// Header dimensions and caller-supplied dimensions must agree.
    #[error(
        "header dimensions {header_width}x{header_height} disagree with caller dimensions {width}x{height}"
    )]
    DimensionMismatch {
        width: usize,
        height: usize,
        header_width: usize,
        header_height: usize,
    },

    /// The header names a predictor this decoder does not know.
    #[error("unknown predictor id {0} in header")]
    UnknownPredictor(u8),

    /// The reserved header field must read back as zero.
    #[error("reserved header bits are not zero")]
    ReservedBitsNotZero,

    /// The header stores a divisor of zero, which no encoder emits.
    #[error("header stores a zero Golomb divisor")]
    ZeroDivisorInHeader,

    /// Strict reconstruction refused a sample outside the 8-bit range.
    #[error("reconstructed sample at ({x}, {y}) falls outside the 8-bit range")]
    SampleOutOfRange { x: usize, y: usize },
}
