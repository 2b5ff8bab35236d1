//! Lossless codec for 8-bit grayscale rasters.
//!
//! Encoding runs one raster-order pass computing prediction residuals,
//! derives the Golomb divisor from their statistics, and emits the frame
//! header followed by one codeword per pixel. Decoding reads the header,
//! then reconstructs each pixel from its residual and the prediction over
//! already-reconstructed neighbors, in the same raster order.

use log::{debug, trace};

use crate::bit_sequence::BitSequence;
use crate::error::GlicError;
use crate::frame_header::{FrameHeader, HEADER_BITS};
use crate::golomb::{Golomb, SignMapping};
use crate::parameter::optimal_m;
use crate::predictor::Predictor;

/// Largest width or height the 16-bit header fields can carry.
pub const MAX_DIMENSION: usize = u16::MAX as usize;

pub struct ImageCodec {
    predictor: Predictor,
    strict_reconstruction: bool,
}

impl ImageCodec {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            strict_reconstruction: false,
        }
    }

    /// Fail decoding with [`GlicError::SampleOutOfRange`] instead of
    /// clamping when a residual pushes a sample outside [0, 255]. Streams
    /// produced by [`encode`](Self::encode) never trigger either path.
    pub fn with_strict_reconstruction(mut self, strict: bool) -> Self {
        self.strict_reconstruction = strict;
        self
    }

    pub fn predictor(&self) -> Predictor {
        self.predictor
    }

    /// Compresses a row-major grayscale raster into a framed bit sequence.
    pub fn encode(
        &self,
        image: &[u8],
        width: usize,
        height: usize,
    ) -> Result<BitSequence, GlicError> {
        validate_dimensions(width, height)?;
        if image.len() != width * height {
            return Err(GlicError::ShapeMismatch {
                width,
                height,
                expected: width * height,
                actual: image.len(),
            });
        }

        // The predictor may read original samples here: in a lossless
        // chain they equal the reconstructed samples at that position.
        let mut residuals = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let predicted = self.predictor.predict(image, width, x, y);
                residuals.push(i32::from(image[y * width + x]) - predicted);
            }
        }

        let m = optimal_m(&residuals);
        debug!(
            "encoding {width}x{height} raster with predictor {:?}, m = {m}",
            self.predictor
        );

        let header = FrameHeader {
            width: width as u16,
            height: height as u16,
            m: m as u16,
            predictor: self.predictor,
        };
        let coder = Golomb::new(m, SignMapping::Interleaving)?;

        let mut bits = BitSequence::with_capacity(HEADER_BITS + residuals.len() * 4);
        header.write_to(&mut bits);
        for residual in residuals {
            coder.encode_to(residual, &mut bits);
        }
        debug!("emitted {} bits for {} samples", bits.len(), width * height);
        Ok(bits)
    }

    /// Reconstructs the raster from a framed bit sequence.
    ///
    /// The caller's dimensions must agree with the header; the predictor
    /// and divisor are taken from the header, so any codec instance can
    /// decode any well-formed stream.
    pub fn decode(
        &self,
        bits: &BitSequence,
        width: usize,
        height: usize,
    ) -> Result<Vec<u8>, GlicError> {
        validate_dimensions(width, height)?;
        let header = FrameHeader::read_from(bits)?;
        if usize::from(header.width) != width || usize::from(header.height) != height {
            return Err(GlicError::DimensionMismatch {
                width,
                height,
                header_width: usize::from(header.width),
                header_height: usize::from(header.height),
            });
        }
        debug!(
            "decoding {width}x{height} raster with predictor {:?}, m = {}",
            header.predictor, header.m
        );

        let coder = Golomb::new(u32::from(header.m), SignMapping::Interleaving)?;
        let mut image = vec![0u8; width * height];
        let mut pos = HEADER_BITS;

        for y in 0..height {
            for x in 0..width {
                let decoded = coder.decode(bits, pos)?;
                pos += decoded.bits_consumed;

                let predicted = header.predictor.predict(&image, width, x, y);
                let sample = predicted + decoded.value;
                if !(0..=255).contains(&sample) {
                    if self.strict_reconstruction {
                        return Err(GlicError::SampleOutOfRange { x, y });
                    }
                    trace!("clamping sample {sample} at ({x}, {y})");
                }
                image[y * width + x] = sample.clamp(0, 255) as u8;
            }
        }

        Ok(image)
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<(), GlicError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(GlicError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paeth_round_trip_on_known_residuals() {
        // Predictions are 0, 10, 10, 13, so the residuals Golomb-coded
        // into the body are 10, 2, 1, 1.
        let image = [10u8, 12, 11, 14];
        let codec = ImageCodec::new(Predictor::Paeth);
        let bits = codec.encode(&image, 2, 2).unwrap();

        let header = FrameHeader::read_from(&bits).unwrap();
        let coder = Golomb::new(u32::from(header.m), SignMapping::Interleaving).unwrap();
        let mut pos = HEADER_BITS;
        let mut residuals = Vec::new();
        for _ in 0..4 {
            let decoded = coder.decode(&bits, pos).unwrap();
            pos += decoded.bits_consumed;
            residuals.push(decoded.value);
        }
        assert_eq!(residuals, vec![10, 2, 1, 1]);
        assert_eq!(pos, bits.len());

        assert_eq!(codec.decode(&bits, 2, 2).unwrap(), image);
    }

    #[test]
    fn every_predictor_round_trips_a_structured_raster() {
        let width = 9;
        let height = 5;
        let image: Vec<u8> = (0..width * height)
            .map(|i| ((i % width) * 23 + (i / width) * 11) as u8)
            .collect();

        for predictor in [
            Predictor::Prev,
            Predictor::Above,
            Predictor::Average,
            Predictor::Paeth,
            Predictor::JpegLs,
            Predictor::Gradient,
        ] {
            let codec = ImageCodec::new(predictor);
            let bits = codec.encode(&image, width, height).unwrap();
            let restored = codec.decode(&bits, width, height).unwrap();
            assert_eq!(restored, image, "predictor {predictor:?}");
        }
    }

    #[test]
    fn header_carries_the_encode_parameters() {
        let image = [10u8, 12, 11, 14];
        let codec = ImageCodec::new(Predictor::Gradient);
        let bits = codec.encode(&image, 2, 2).unwrap();

        assert_eq!(bits.get_bits(0, 16), Some(2));
        assert_eq!(bits.get_bits(16, 16), Some(2));
        assert_eq!(bits.get_bits(48, 4), Some(u64::from(Predictor::Gradient.id())));
        assert_eq!(bits.get_bits(52, 12), Some(0));
    }

    #[test]
    fn any_instance_decodes_a_self_describing_stream() {
        let image = [50u8, 60, 70, 80, 90, 100];
        let bits = ImageCodec::new(Predictor::JpegLs)
            .encode(&image, 3, 2)
            .unwrap();
        let restored = ImageCodec::new(Predictor::Prev).decode(&bits, 3, 2).unwrap();
        assert_eq!(restored, image);
    }

    #[test]
    fn shape_errors_are_reported_before_any_coding() {
        let codec = ImageCodec::new(Predictor::Prev);
        assert!(matches!(
            codec.encode(&[1, 2, 3], 2, 2),
            Err(GlicError::ShapeMismatch { expected: 4, actual: 3, .. })
        ));
        assert!(matches!(
            codec.encode(&[], 0, 4),
            Err(GlicError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            codec.encode(&[0; 8], 65536, 0),
            Err(GlicError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn caller_dimensions_must_match_the_header() {
        let image = [1u8, 2, 3, 4];
        let codec = ImageCodec::new(Predictor::Prev);
        let bits = codec.encode(&image, 2, 2).unwrap();
        assert!(matches!(
            codec.decode(&bits, 4, 1),
            Err(GlicError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn truncated_body_is_rejected() {
        let image = [10u8, 200, 30, 250];
        let codec = ImageCodec::new(Predictor::Paeth);
        let bits = codec.encode(&image, 2, 2).unwrap();

        let mut cut = BitSequence::new();
        for index in 0..bits.len() - 3 {
            cut.push(bits.get(index).unwrap());
        }
        assert!(matches!(
            codec.decode(&cut, 2, 2),
            Err(GlicError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn out_of_range_reconstruction_clamps_or_fails_by_policy() {
        // Hand-build a stream whose first residual is -5: the prediction
        // at (0, 0) is 0, so reconstruction lands below the valid range.
        let header = FrameHeader {
            width: 2,
            height: 1,
            m: 2,
            predictor: Predictor::Prev,
        };
        let coder = Golomb::new(2, SignMapping::Interleaving).unwrap();
        let mut bits = BitSequence::new();
        header.write_to(&mut bits);
        coder.encode_to(-5, &mut bits);
        coder.encode_to(3, &mut bits);

        let lenient = ImageCodec::new(Predictor::Prev);
        assert_eq!(lenient.decode(&bits, 2, 1).unwrap(), vec![0, 3]);

        let strict = ImageCodec::new(Predictor::Prev).with_strict_reconstruction(true);
        assert_eq!(
            strict.decode(&bits, 2, 1),
            Err(GlicError::SampleOutOfRange { x: 0, y: 0 })
        );
    }
}
