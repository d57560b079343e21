// Chunk locator: finds embedded image payloads in a BGCode byte stream.
//
// BGCode carries no length-prefixed framing for its thumbnails, so the only
// way to delimit an embedded image is its format magic plus a fixed
// end-of-stream marker. The scan is a single left-to-right pass: at each
// candidate offset test the known magics, and on a match search forward for
// the matching end marker with `memchr::memmem` (linear-time, no quadratic
// blowup on adversarial tails).

use log::debug;
use memchr::memmem;

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// QOI file magic ("qoif").
pub const QOI_MAGIC: [u8; 4] = *b"qoif";

/// QOI end-of-stream marker: seven zero bytes followed by 0x01.
pub const QOI_END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// PNG file magic.
pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG end-of-stream sentinel: the IEND chunk tag plus its fixed CRC.
pub const PNG_END_MARKER: [u8; 8] = [b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

/// Embedded image format recognized by the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Qoi,
    Png,
}

impl ImageFormat {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Qoi => "qoi",
            Self::Png => "png",
        }
    }

    /// Short lowercase name, used in reports and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Qoi => "qoi",
            Self::Png => "png",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A located image payload: a half-open byte range `[start, end)` within the
/// scanned buffer, spanning magic through end marker inclusive.
///
/// Chunks store offsets only; the bytes stay owned by the scanned buffer and
/// are borrowed on demand via [`Chunk::bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
    pub format: ImageFormat,
}

impl Chunk {
    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow the chunk's bytes out of the buffer it was located in.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than `self.end`, i.e. if called against a
    /// buffer other than the one that produced this chunk.
    pub fn bytes<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.start..self.end]
    }
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

/// Scan `data` for embedded QOI and PNG payloads.
///
/// Returns chunks in buffer order; ranges never overlap and bytes inside an
/// emitted chunk are not re-scanned, so a signature that happens to occur
/// inside another image's payload is ignored.
///
/// The scan is fail-open: a magic with no end marker anywhere in the
/// remaining buffer terminates the scan at that offset, dropping the
/// unterminated tail and anything after it. This mirrors how truncated
/// containers are treated everywhere else in the pipeline: whatever was
/// found up to that point is still usable.
pub fn locate(data: &[u8]) -> Vec<Chunk> {
    let qoi_end = memmem::Finder::new(&QOI_END_MARKER);
    let png_end = memmem::Finder::new(&PNG_END_MARKER);

    let mut chunks = Vec::new();
    let mut cursor = 0usize;

    while cursor < data.len() {
        let rest = &data[cursor..];

        // QOI takes priority; the magics are disjoint so at most one matches.
        let hit = if rest.starts_with(&QOI_MAGIC) {
            Some((ImageFormat::Qoi, &qoi_end))
        } else if rest.starts_with(&PNG_MAGIC) {
            Some((ImageFormat::Png, &png_end))
        } else {
            None
        };

        match hit {
            Some((format, finder)) => match finder.find(rest) {
                Some(rel) => {
                    let end = cursor + rel + 8;
                    chunks.push(Chunk {
                        start: cursor,
                        end,
                        format,
                    });
                    cursor = end;
                }
                None => {
                    debug!("unterminated {format} chunk at offset {cursor}, stopping scan");
                    break;
                }
            },
            None => {
                // Skip ahead to the next byte that could begin either magic.
                match memchr::memchr2(QOI_MAGIC[0], PNG_MAGIC[0], &rest[1..]) {
                    Some(rel) => cursor += 1 + rel,
                    None => break,
                }
            }
        }
    }

    chunks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
