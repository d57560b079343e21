#![no_main]
use bgsplice::session::Session;
use bgsplice::splice::splice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let split = 1 + (data[0] as usize % (data.len() - 1));
    let (original, replacement) = data.split_at(split);

    let mut session = Session::new();
    session.load_original(original.to_vec());

    // Identity splice must reproduce the original exactly.
    let identity: Vec<Vec<u8>> = session
        .original_chunks()
        .iter()
        .map(|c| c.bytes(original).to_vec())
        .collect();
    let rebuilt = splice(original, session.original_chunks(), &identity);
    assert_eq!(rebuilt, original);

    // Replace/export either succeeds or refuses; neither path may panic.
    if session.load_replacement_source(replacement).is_ok() {
        let _ = session.export();
    }
});
