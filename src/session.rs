// Session state: one loaded container, its chunks, and pending replacements.
//
// Exactly one session exists per interactive use; it is a plain owned struct
// so the caller controls the lifecycle. Every operation either succeeds or
// leaves the session exactly as it was (no partial mutation on error).

use log::warn;

use crate::codec::{self, RasterImage};
use crate::scan::{self, Chunk};
use crate::splice;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// `export` or `load_replacement_source` called before a container was
    /// loaded, or the loaded container had no image chunks to replace.
    NoOriginalLoaded,
    /// Replacement source yielded a different number of chunks than the
    /// original container.
    ChunkCountMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoOriginalLoaded => write!(f, "no container with image chunks is loaded"),
            Self::ChunkCountMismatch { expected, actual } => write!(
                f,
                "replacement must contain the same number of images as the original \
                 (expected {expected}, got {actual})"
            ),
        }
    }
}

impl std::error::Error for SessionError {}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Holds the loaded original container and pending replacement payloads.
#[derive(Debug, Default)]
pub struct Session {
    original: Vec<u8>,
    original_chunks: Vec<Chunk>,
    replacement_payloads: Vec<Vec<u8>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a container, superseding any previously loaded one.
    ///
    /// Scans for image chunks and returns how many were found. Pending
    /// replacement payloads from an earlier `load_replacement_source` call
    /// are deliberately kept; the count check at export time decides whether
    /// they still pair up.
    pub fn load_original(&mut self, bytes: Vec<u8>) -> usize {
        self.original_chunks = scan::locate(&bytes);
        self.original = bytes;
        self.original_chunks.len()
    }

    /// Harvest replacement payloads from a second container's bytes.
    ///
    /// Only the chunk payloads are kept (copied out); the source buffer and
    /// its offsets are discarded. Replaces any previously harvested payloads.
    pub fn load_replacement_source(&mut self, bytes: &[u8]) -> Result<usize, SessionError> {
        if self.original.is_empty() {
            return Err(SessionError::NoOriginalLoaded);
        }
        let chunks = scan::locate(bytes);
        // Pairing is positional, not tag-verified; flag format changes loudly.
        for (i, (original, replacement)) in self.original_chunks.iter().zip(&chunks).enumerate() {
            if original.format != replacement.format {
                warn!(
                    "chunk {i}: replacing {} with {} (pairing is positional)",
                    original.format, replacement.format
                );
            }
        }
        self.replacement_payloads = chunks.iter().map(|c| c.bytes(bytes).to_vec()).collect();
        Ok(self.replacement_payloads.len())
    }

    /// Build the spliced container.
    ///
    /// Refused unless an original with at least one chunk is loaded and the
    /// replacement payload count matches exactly. Never mutates the session;
    /// repeated exports yield identical buffers.
    pub fn export(&self) -> Result<Vec<u8>, SessionError> {
        if self.original_chunks.is_empty() {
            return Err(SessionError::NoOriginalLoaded);
        }
        if self.replacement_payloads.len() != self.original_chunks.len() {
            return Err(SessionError::ChunkCountMismatch {
                expected: self.original_chunks.len(),
                actual: self.replacement_payloads.len(),
            });
        }
        Ok(splice::splice(
            &self.original,
            &self.original_chunks,
            &self.replacement_payloads,
        ))
    }

    /// The loaded container's bytes (empty before the first load).
    pub fn original(&self) -> &[u8] {
        &self.original
    }

    /// Chunks located in the loaded container, in buffer order.
    pub fn original_chunks(&self) -> &[Chunk] {
        &self.original_chunks
    }

    /// Harvested replacement payloads, in their source's buffer order.
    pub fn replacement_payloads(&self) -> &[Vec<u8>] {
        &self.replacement_payloads
    }

    /// Decode each original chunk for display, `None` where decoding failed.
    pub fn original_images(&self) -> Vec<Option<RasterImage>> {
        self.original_chunks
            .iter()
            .map(|c| decode_for_display(c.bytes(&self.original), c.format))
            .collect()
    }

    /// Decode each replacement payload for display, `None` on failure.
    ///
    /// Replacement payloads carry no located format, so the format is
    /// re-derived from the payload's own leading magic.
    pub fn replacement_images(&self) -> Vec<Option<RasterImage>> {
        self.replacement_payloads
            .iter()
            .map(|payload| {
                scan::locate(payload)
                    .first()
                    .and_then(|c| decode_for_display(c.bytes(payload), c.format))
            })
            .collect()
    }
}

fn decode_for_display(bytes: &[u8], format: scan::ImageFormat) -> Option<RasterImage> {
    match codec::decode(bytes, format) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!("failed to decode {format} chunk for display: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
