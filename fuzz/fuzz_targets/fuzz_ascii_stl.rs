#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // STL never shares vertices, so each index points at its own position
    if let Ok(model) = meshfiles::stl::ascii::read(data) {
        assert_eq!(model.positions.len(), model.triangle_indices.len());
        assert!(model.to_triangle_soup().is_ok());
    }
});
