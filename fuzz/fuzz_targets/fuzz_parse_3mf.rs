#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // ZIP extraction -> model XML -> models
    let _ = meshfiles::threemf::from_reader(Cursor::new(data));
});
