#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic on any input; an accepted GSTIN carries its own check character.
        if let Ok(gstin) = bijak::validate_gstin(s) {
            let trimmed = s.trim();
            assert_eq!(
                bijak::gstin::gstin_check_char(&trimmed[..14]),
                Some(gstin.check_char)
            );
        }
    }
});
