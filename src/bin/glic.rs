//! glic CLI - lossless grayscale image compression utility.
//!
//! Compresses 8-bit grayscale rasters (raw or PGM) into Golomb-coded
//! streams and back, and inspects compressed headers.

use clap::{Parser, Subcommand, ValueEnum};
use glic::frame_header::FrameHeader;
use glic::{BitSequence, ImageCodec, Predictor};
use log::Level;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Lossless grayscale image compressor built on Golomb-coded prediction residuals
#[derive(Parser)]
#[command(name = "glic")]
#[command(version)]
#[command(about = "Compress and decompress 8-bit grayscale images losslessly", long_about = None)]
#[command(after_help = "EXAMPLES:
    glic encode -i photo.pgm -o photo.glc
    glic encode -i pixels.raw -o pixels.glc -f raw -w 512 -H 512 -p jpeg-ls
    glic decode -i photo.glc -o restored.pgm
    glic decode -i photo.glc -o pixels.raw -f raw
    glic info -i photo.glc")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Enable trace logging
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a grayscale raster
    ///
    /// Reads a PGM (P5) file, or raw 8-bit samples with explicit
    /// dimensions, and writes the compressed bit stream.
    #[command(visible_alias = "e")]
    Encode {
        /// Input raster file
        #[arg(short, long)]
        input: PathBuf,

        /// Output compressed file
        #[arg(short, long)]
        output: PathBuf,

        /// Input format; raw requires --width and --height
        #[arg(short, long, default_value = "pgm", value_enum)]
        format: RasterFormat,

        /// Image width in pixels (raw input only)
        #[arg(short, long)]
        width: Option<usize>,

        /// Image height in pixels (raw input only)
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Spatial predictor for the residual pass
        #[arg(short, long, default_value = "paeth", value_enum)]
        predictor: PredictorArg,
    },

    /// Decompress a compressed file back to a grayscale raster
    #[command(visible_alias = "d")]
    Decode {
        /// Input compressed file
        #[arg(short, long)]
        input: PathBuf,

        /// Output raster file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "pgm", value_enum)]
        format: RasterFormat,
    },

    /// Show the header of a compressed file
    #[command(visible_alias = "i")]
    Info {
        /// Input compressed file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RasterFormat {
    /// Portable GrayMap (PGM, P5)
    Pgm,
    /// Raw 8-bit samples, row-major
    Raw,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PredictorArg {
    /// Left neighbor
    Prev,
    /// Above neighbor
    Above,
    /// Mean of left and above
    Average,
    /// Paeth selection among left, above, upper-left
    Paeth,
    /// Left + above - upper-left
    JpegLs,
    /// Left + half the vertical gradient
    Gradient,
}

impl From<PredictorArg> for Predictor {
    fn from(arg: PredictorArg) -> Self {
        match arg {
            PredictorArg::Prev => Predictor::Prev,
            PredictorArg::Above => Predictor::Above,
            PredictorArg::Average => Predictor::Average,
            PredictorArg::Paeth => Predictor::Paeth,
            PredictorArg::JpegLs => Predictor::JpegLs,
            PredictorArg::Gradient => Predictor::Gradient,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logger(&cli);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            format,
            width,
            height,
            predictor,
        } => encode_image(&input, &output, format, width, height, predictor),
        Commands::Decode {
            input,
            output,
            format,
        } => decode_image(&input, &output, format),
        Commands::Info { input } => show_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn setup_logger(cli: &Cli) {
    let level = if cli.trace {
        Level::Trace
    } else if cli.debug {
        Level::Debug
    } else {
        Level::Warn
    };
    simple_logger::init_with_level(level).expect("logger is initialized once");
}

fn encode_image(
    input: &Path,
    output: &Path,
    format: RasterFormat,
    width: Option<usize>,
    height: Option<usize>,
    predictor: PredictorArg,
) -> Result<(), Box<dyn Error>> {
    let (pixels, width, height) = match format {
        RasterFormat::Pgm => read_pgm(input)?,
        RasterFormat::Raw => {
            let (width, height) = match (width, height) {
                (Some(w), Some(h)) => (w, h),
                _ => return Err("raw input requires --width and --height".into()),
            };
            (fs::read(input)?, width, height)
        }
    };

    let codec = ImageCodec::new(predictor.into());
    let bits = codec.encode(&pixels, width, height)?;
    fs::write(output, bits.to_bytes())?;

    let compressed = bits.len() as f64 / 8.0;
    println!("Original size:     {} bytes", pixels.len());
    println!("Compressed size:   {compressed:.1} bytes");
    println!(
        "Compression ratio: {:.2}:1",
        pixels.len() as f64 / compressed
    );
    Ok(())
}

fn decode_image(input: &Path, output: &Path, format: RasterFormat) -> Result<(), Box<dyn Error>> {
    let bits = BitSequence::from_bytes(&fs::read(input)?);
    let header = FrameHeader::read_from(&bits)?;
    let width = usize::from(header.width);
    let height = usize::from(header.height);

    let codec = ImageCodec::new(header.predictor);
    let pixels = codec.decode(&bits, width, height)?;

    match format {
        RasterFormat::Pgm => write_pgm(output, &pixels, width, height)?,
        RasterFormat::Raw => fs::write(output, &pixels)?,
    }

    println!("Decoded {width}x{height} image to {}", output.display());
    Ok(())
}

fn show_info(input: &Path) -> Result<(), Box<dyn Error>> {
    let data = fs::read(input)?;
    let bits = BitSequence::from_bytes(&data);
    let header = FrameHeader::read_from(&bits)?;

    println!("File: {}", input.display());
    println!("Size: {} bytes", data.len());
    println!();
    println!("  Dimensions: {}x{}", header.width, header.height);
    println!("  Divisor m:  {}", header.m);
    println!("  Predictor:  {:?}", header.predictor);
    Ok(())
}

// Raster file helpers

fn read_pgm(path: &Path) -> Result<(Vec<u8>, usize, usize), Box<dyn Error>> {
    let data = fs::read(path)?;
    if !data.starts_with(b"P5") {
        return Err("only binary PGM (P5) input is supported".into());
    }

    let mut cursor = 2;
    let mut fields = [0usize; 3];
    for field in &mut fields {
        *field = read_pgm_number(&data, &mut cursor).ok_or("malformed PGM header")?;
    }
    let [width, height, max_value] = fields;
    if max_value > 255 {
        return Err("only 8-bit PGM input is supported".into());
    }

    // A single whitespace byte separates the header from the samples.
    cursor += 1;
    let expected = width.checked_mul(height).ok_or("malformed PGM header")?;
    let end = cursor
        .checked_add(expected)
        .ok_or("malformed PGM header")?;
    let samples = data
        .get(cursor..end)
        .ok_or("PGM file is shorter than its header claims")?;
    Ok((samples.to_vec(), width, height))
}

fn read_pgm_number(data: &[u8], cursor: &mut usize) -> Option<usize> {
    loop {
        match data.get(*cursor)? {
            b' ' | b'\t' | b'\r' | b'\n' => *cursor += 1,
            b'#' => {
                while *data.get(*cursor)? != b'\n' {
                    *cursor += 1;
                }
            }
            _ => break,
        }
    }
    let start = *cursor;
    while data.get(*cursor).is_some_and(u8::is_ascii_digit) {
        *cursor += 1;
    }
    if *cursor == start {
        return None;
    }
    std::str::from_utf8(&data[start..*cursor]).ok()?.parse().ok()
}

fn write_pgm(path: &Path, pixels: &[u8], width: usize, height: usize) -> Result<(), Box<dyn Error>> {
    use std::io::Write;
    let mut file = fs::File::create(path)?;
    writeln!(file, "P5")?;
    writeln!(file, "{width} {height}")?;
    writeln!(file, "255")?;
    file.write_all(pixels)?;
    Ok(())
}
