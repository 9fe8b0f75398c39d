#![no_main]
use camshaft_core::snapshot::DisplaySnapshot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes to the snapshot deserializer.
    // Must not panic -- returning Err is fine.
    let _ = serde_json::from_slice::<DisplaySnapshot>(data);
});
