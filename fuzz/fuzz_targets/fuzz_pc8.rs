#![no_main]

use libfuzzer_sys::fuzz_target;
use moms::sie::{decode_pc8, encode_pc8};

fuzz_target!(|data: &[u8]| {
    // Every byte decodes, and decoded text encodes back unchanged.
    let text = decode_pc8(data);
    let out = encode_pc8(&text);
    assert_eq!(out.replaced, 0);
    assert_eq!(out.bytes, data);
});
