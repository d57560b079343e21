//! Bgsplice: locate and swap embedded image payloads in BGCode containers.
//!
//! The crate provides:
//! - A magic-marker chunk locator for embedded QOI/PNG payloads (`scan`)
//! - A black-box codec adapter normalizing decodes to RGBA8 (`codec`)
//! - A byte-exact splicer for swapping chunk payloads (`splice`)
//! - Session orchestration for the load/replace/export flow (`session`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use bgsplice::session::Session;
//!
//! // A minimal container: opaque bytes around one QOI-framed payload.
//! let payload = |body: &[u8]| {
//!     let mut v = b"qoif".to_vec();
//!     v.extend_from_slice(body);
//!     v.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
//!     v
//! };
//! let mut original = b"AAA".to_vec();
//! original.extend_from_slice(&payload(b"old"));
//! original.extend_from_slice(b"BBB");
//!
//! let mut session = Session::new();
//! session.load_original(original);
//! session.load_replacement_source(&payload(b"new")).unwrap();
//!
//! let spliced = session.export().unwrap();
//! let mut expected = b"AAA".to_vec();
//! expected.extend_from_slice(&payload(b"new"));
//! expected.extend_from_slice(b"BBB");
//! assert_eq!(spliced, expected);
//! ```

pub mod codec;
pub mod io;
pub mod scan;
pub mod session;
pub mod splice;

#[cfg(feature = "cli")]
pub mod cli;
