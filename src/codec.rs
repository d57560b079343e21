// Codec adapter: turns located chunk bytes into one raster representation.
//
// The PNG and QOI decoders are external crates treated as black boxes; this
// module normalizes whatever they return (grayscale, RGB, RGBA, with or
// without alpha) into a single RGBA8 pixel buffer so display code never has
// to care which format a chunk was.

use std::io::Cursor;

// ---------------------------------------------------------------------------
// Raster image
// ---------------------------------------------------------------------------

/// A decoded image, always RGBA8: `pixels.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Decode error
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum DecodeError {
    Png(png::DecodingError),
    Qoi(qoi::Error),
    Unsupported(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png(e) => write!(f, "PNG decode error: {e}"),
            Self::Qoi(e) => write!(f, "QOI decode error: {e}"),
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Png(e) => Some(e),
            Self::Qoi(e) => Some(e),
            Self::Unsupported(_) => None,
        }
    }
}

impl From<png::DecodingError> for DecodeError {
    fn from(e: png::DecodingError) -> Self {
        Self::Png(e)
    }
}

impl From<qoi::Error> for DecodeError {
    fn from(e: qoi::Error) -> Self {
        Self::Qoi(e)
    }
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

use crate::scan::ImageFormat;

/// Decode one chunk's bytes according to its located format.
///
/// Failures are per-chunk: callers are expected to recover (typically by
/// skipping the chunk for display) rather than treat this as fatal.
pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<RasterImage, DecodeError> {
    match format {
        ImageFormat::Png => decode_png(bytes),
        ImageFormat::Qoi => decode_qoi(bytes),
    }
}

fn decode_png(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    // Expand palette/low-bit-depth variants so output is always 8-bit.
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let pixels = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => rgb_to_rgba(&buf),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 0xFF]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        other => {
            return Err(DecodeError::Unsupported(format!(
                "PNG color type {other:?} after normalization"
            )));
        }
    };

    Ok(RasterImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

fn decode_qoi(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let (header, data) = qoi::decode_to_vec(bytes)?;

    let pixels = match header.channels {
        qoi::Channels::Rgba => data,
        qoi::Channels::Rgb => rgb_to_rgba(&data),
    };

    Ok(RasterImage {
        width: header.width,
        height: header.height,
        pixels,
    })
}

fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 0xFF])
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // Encode an RGBA image as QOI using only OP_RGBA chunks. Valid per the
    // QOI spec (the literal op never depends on decoder state).
    pub(crate) fn qoi_fixture(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        let mut out = Vec::new();
        out.extend_from_slice(b"qoif");
        out.extend_from_slice(&width.to_be_bytes());
        out.extend_from_slice(&height.to_be_bytes());
        out.push(4); // channels
        out.push(0); // colorspace: sRGB
        for px in rgba.chunks_exact(4) {
            out.push(0xFF); // QOI_OP_RGBA
            out.extend_from_slice(px);
        }
        out.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
        out
    }

    pub(crate) fn png_fixture(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(rgba).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn qoi_roundtrip_rgba() {
        let rgba = [
            10, 20, 30, 255, //
            40, 50, 60, 128, //
            70, 80, 90, 0, //
            1, 2, 3, 4,
        ];
        let blob = qoi_fixture(2, 2, &rgba);
        let img = decode(&blob, ImageFormat::Qoi).unwrap();
        assert_eq!(img.width, 2);
        assert_eq!(img.height, 2);
        assert_eq!(img.pixels, rgba);
    }

    #[test]
    fn png_roundtrip_rgba() {
        let rgba = [200, 100, 50, 255, 0, 0, 0, 255];
        let blob = png_fixture(2, 1, &rgba);
        let img = decode(&blob, ImageFormat::Png).unwrap();
        assert_eq!(img.width, 2);
        assert_eq!(img.height, 1);
        assert_eq!(img.pixels, rgba);
    }

    #[test]
    fn png_rgb_is_expanded_to_rgba() {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 1, 2);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[9, 8, 7, 6, 5, 4]).unwrap();
            writer.finish().unwrap();
        }
        let img = decode(&out, ImageFormat::Png).unwrap();
        assert_eq!(img.pixels, [9, 8, 7, 255, 6, 5, 4, 255]);
    }

    #[test]
    fn garbage_bytes_fail_cleanly() {
        let garbage = b"definitely not an image";
        assert!(decode(garbage, ImageFormat::Qoi).is_err());
        assert!(decode(garbage, ImageFormat::Png).is_err());
    }

    #[test]
    fn truncated_qoi_fails_cleanly() {
        let rgba = [1, 2, 3, 4];
        let blob = qoi_fixture(1, 1, &rgba);
        let truncated = &blob[..blob.len() / 2];
        assert!(decode(truncated, ImageFormat::Qoi).is_err());
    }

    #[test]
    fn wrong_format_tag_fails_not_panics() {
        // A valid QOI decoded as PNG must yield an error, never a panic.
        let blob = qoi_fixture(1, 1, &[1, 2, 3, 4]);
        assert!(decode(&blob, ImageFormat::Png).is_err());
    }
}
