#![no_main]

use libfuzzer_sys::fuzz_target;
use sierraecg::sierra::SierraReader;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must decode or fail with an error, never panic
    let reader = SierraReader::new().include_repbeats(true);
    let _ = reader.read(data);
});
