#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The locator must never panic and must only emit well-formed ranges:
    // in-bounds, non-empty, ordered, disjoint.
    let chunks = bgsplice::scan::locate(data);
    let mut prev_end = 0usize;
    for c in &chunks {
        assert!(c.start >= prev_end);
        assert!(c.start < c.end);
        assert!(c.end <= data.len());
        prev_end = c.end;
    }

    // Decoding located chunks must fail cleanly, never panic.
    for c in &chunks {
        let _ = bgsplice::codec::decode(c.bytes(data), c.format);
    }
});
