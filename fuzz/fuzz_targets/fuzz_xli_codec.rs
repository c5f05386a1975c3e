#![no_main]

use libfuzzer_sys::fuzz_target;
use sierraecg::codec::XliCodec;

fuzz_target!(|data: &[u8]| {
    let _ = XliCodec::decode_chunks(data);
});
