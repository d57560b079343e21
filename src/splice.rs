// Splicer: rebuilds a container with chunk ranges swapped for new payloads.
//
// The output is reconstructed from scratch rather than patched in place:
// replacement payloads rarely match the original chunk lengths, so every
// byte after the first swap lands at a new offset. Nothing else in a BGCode
// container is offset-sensitive, so this is safe.

use crate::scan::Chunk;

/// Rebuild `original` with each chunk's bytes replaced by the payload at the
/// same index in `replacements`.
///
/// Every byte outside the chunk ranges is copied unchanged and in order; a
/// replacement never bleeds into a neighboring chunk's span. The result's
/// length is `original.len() - Σ chunk.len() + Σ replacement.len()`.
///
/// Callers must pair chunks and replacements one-to-one ([`crate::session`]
/// enforces this before delegating here).
pub fn splice(original: &[u8], chunks: &[Chunk], replacements: &[Vec<u8>]) -> Vec<u8> {
    debug_assert_eq!(chunks.len(), replacements.len());

    let swapped: usize = chunks.iter().map(Chunk::len).sum();
    let added: usize = replacements.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(original.len() - swapped + added);

    let mut last_end = 0usize;
    for (chunk, payload) in chunks.iter().zip(replacements) {
        out.extend_from_slice(&original[last_end..chunk.start]);
        out.extend_from_slice(payload);
        last_end = chunk.end;
    }
    out.extend_from_slice(&original[last_end..]);

    out
}
