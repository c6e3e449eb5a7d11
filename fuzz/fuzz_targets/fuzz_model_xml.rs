#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = meshfiles::parser::parse_model_xml(data);
});
