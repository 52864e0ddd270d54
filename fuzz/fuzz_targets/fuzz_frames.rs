#![no_main]
use flatframe::{SizePrefixedFrames, buffer_has_identifier, root_as_table, size_prefixed_root_as_table};
use libfuzzer_sys::fuzz_target;

// Entry points must reject malformed bytes with an error, never a panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(table) = root_as_table(data) {
        let _ = table.vtable().num_fields();
        let _ = table.field_offset(4);
    }
    let _ = buffer_has_identifier(data, "FUZZ", false);
    let _ = buffer_has_identifier(data, "FUZZ", true);
    for frame in SizePrefixedFrames::new(data) {
        let Ok(frame) = frame else { break };
        assert!(frame.len() >= 4);
        let _ = size_prefixed_root_as_table(frame);
    }
});
