#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if let Ok(model) = meshfiles::stl::binary::read(Cursor::new(data)) {
        assert_eq!(model.positions.len(), model.triangle_count() * 3);
    }
});
