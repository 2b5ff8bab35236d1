use crate::bit_sequence::BitSequence;
use crate::error::GlicError;
use crate::predictor::Predictor;

/// Size of the fixed frame header in bits.
pub const HEADER_BITS: usize = 64;

const RESERVED_BITS: u32 = 12;

/// The fixed 64-bit header framing every compressed image.
///
/// Layout, MSB first: width (16), height (16), Golomb divisor m (16),
/// predictor id (4), reserved (12, zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub width: u16,
    pub height: u16,
    pub m: u16,
    pub predictor: Predictor,
}

impl FrameHeader {
    /// Appends the 64 header bits to `sink`.
    pub fn write_to(&self, sink: &mut BitSequence) {
        sink.push_bits(u64::from(self.width), 16);
        sink.push_bits(u64::from(self.height), 16);
        sink.push_bits(u64::from(self.m), 16);
        sink.push_bits(u64::from(self.predictor.id()), 4);
        sink.push_bits(0, RESERVED_BITS);
    }

    /// Reads and validates the header at the start of `bits`.
    pub fn read_from(bits: &BitSequence) -> Result<Self, GlicError> {
        let mut pos = 0usize;
        let mut field = |count: u32| -> Result<u64, GlicError> {
            let value = bits
                .get_bits(pos, count)
                .ok_or(GlicError::TruncatedStream { position: bits.len() })?;
            pos += count as usize;
            Ok(value)
        };

        let width = field(16)? as u16;
        let height = field(16)? as u16;
        let m = field(16)? as u16;
        let predictor_id = field(4)? as u8;
        let reserved = field(RESERVED_BITS)?;

        if reserved != 0 {
            return Err(GlicError::ReservedBitsNotZero);
        }
        if m == 0 {
            return Err(GlicError::ZeroDivisorInHeader);
        }
        let predictor = Predictor::try_from(predictor_id)?;

        Ok(Self {
            width,
            height,
            m,
            predictor,
        })
    }
}
