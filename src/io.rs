// File-level helpers for scanning and swapping BGCode containers.
//
// Wraps the session pipeline with path-oriented convenience functions.
// Output files are written through a named temporary file in the destination
// directory and persisted atomically, so a failure part-way through never
// leaves a truncated container at the destination path. Optionally computes
// SHA-256 checksums of the input and output (feature-gated behind `file-io`).

use std::io::{self, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::scan::{self, Chunk};
use crate::session::{Session, SessionError};

// ---------------------------------------------------------------------------
// Reports and stats
// ---------------------------------------------------------------------------

/// Result of `scan_file()`.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Container file size in bytes.
    pub file_size: u64,
    /// Located image chunks, in buffer order.
    pub chunks: Vec<Chunk>,
}

/// Statistics returned by `swap_file()`.
#[derive(Debug, Clone)]
pub struct SwapStats {
    /// Original container size in bytes.
    pub original_size: u64,
    /// Replacement source file size in bytes.
    pub replacement_size: u64,
    /// Spliced output size in bytes.
    pub output_size: u64,
    /// Number of chunks swapped.
    pub chunks: usize,
    /// SHA-256 of the original container (if `file-io` is enabled).
    pub original_sha256: Option<[u8; 32]>,
    /// SHA-256 of the spliced output (if `file-io` is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file operations.
#[derive(Debug)]
pub enum IoError {
    /// I/O error (file open, read, write, persist).
    Io(io::Error),
    /// Session-level refusal (nothing loaded, chunk count mismatch).
    Session(SessionError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Session(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Session(e) => Some(e),
        }
    }
}

impl From<io::Error> for IoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SessionError> for IoError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

// ---------------------------------------------------------------------------
// scan_file
// ---------------------------------------------------------------------------

/// Read a container file and locate its embedded image chunks.
pub fn scan_file(path: &Path) -> Result<ScanReport, IoError> {
    let data = std::fs::read(path)?;
    let chunks = scan::locate(&data);
    Ok(ScanReport {
        file_size: data.len() as u64,
        chunks,
    })
}

// ---------------------------------------------------------------------------
// swap_file
// ---------------------------------------------------------------------------

/// Run the whole load → replace → export pipeline against file paths.
///
/// Reads both containers fully into memory, splices, and writes the result
/// to `output_path` via an atomic rename. Refused (without touching the
/// destination) when the chunk counts differ or the original has no chunks.
pub fn swap_file(
    original_path: &Path,
    replacement_path: &Path,
    output_path: &Path,
) -> Result<SwapStats, IoError> {
    let original = std::fs::read(original_path)?;
    let replacement = std::fs::read(replacement_path)?;

    let original_size = original.len() as u64;
    let replacement_size = replacement.len() as u64;

    #[cfg(feature = "file-io")]
    let original_sha256 = {
        let mut h = sha2::Sha256::new();
        h.update(&original);
        Some(h.finalize().into())
    };
    #[cfg(not(feature = "file-io"))]
    let original_sha256: Option<[u8; 32]> = None;

    let mut session = Session::new();
    let chunks = session.load_original(original);
    session.load_replacement_source(&replacement)?;
    let output = session.export()?;

    #[cfg(feature = "file-io")]
    let output_sha256 = {
        let mut h = sha2::Sha256::new();
        h.update(&output);
        Some(h.finalize().into())
    };
    #[cfg(not(feature = "file-io"))]
    let output_sha256: Option<[u8; 32]> = None;

    write_atomic(output_path, &output)?;

    Ok(SwapStats {
        original_size,
        replacement_size,
        output_size: output.len() as u64,
        chunks,
        original_sha256,
        output_sha256,
    })
}

/// Write `data` to `path` through a temp file in the same directory, then
/// rename into place. An existing file at `path` is replaced atomically.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<(), IoError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
