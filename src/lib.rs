/*!
# glic

`glic` is a lossless compressor for 8-bit grayscale images built from two
composable layers: a spatial-predictor front-end that turns the raster
into a stream of prediction residuals, and a configurable Golomb coder
that entropy-codes them. Decompression inverts both layers bit-exactly.

## Compressing an image

```rust
use glic::{ImageCodec, Predictor};

let image: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
let codec = ImageCodec::new(Predictor::Paeth);

let bits = codec.encode(&image, 8, 8)?;
let restored = codec.decode(&bits, 8, 8)?;
assert_eq!(restored, image);
# Ok::<(), glic::GlicError>(())
```

## Using the Golomb coder directly

```rust
use glic::{BitSequence, Golomb, SignMapping};

let mut coder = Golomb::new(5, SignMapping::Interleaving)?;
let mut bits = BitSequence::new();
coder.encode_to(3, &mut bits);
coder.encode_to(-3, &mut bits);

let first = coder.decode(&bits, 0)?;
assert_eq!(first.value, 3);
assert_eq!(coder.decode(&bits, first.bits_consumed)?.value, -3);

// The divisor can change between whole symbols.
coder.set_m(8)?;
assert_eq!(coder.decode(&coder.encode(42), 0)?.value, 42);
# Ok::<(), glic::GlicError>(())
```

The compressed stream is framed by a fixed 64-bit header (dimensions,
divisor, predictor id) and packs MSB-first into bytes via
[`BitSequence::to_bytes`]; see [`frame_header::FrameHeader`] for the
layout.
*/

pub mod bit_sequence;
pub mod error;
pub mod frame_header;
pub mod golomb;
pub mod image_codec;
pub mod parameter;
pub mod predictor;

pub use bit_sequence::BitSequence;
pub use error::GlicError;
pub use golomb::{Decoded, Golomb, SignMapping};
pub use image_codec::ImageCodec;
pub use predictor::Predictor;
