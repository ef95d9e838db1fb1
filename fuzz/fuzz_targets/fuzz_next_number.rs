#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Newline-separated invoice numbers; the suggestion must be numeric
        // and not collide with any numeric input.
        let existing: Vec<&str> = s.lines().collect();
        let next = bijak::next_invoice_number(&existing);
        assert!(bijak::is_numeric_invoice_number(&next));
        assert!(
            !existing
                .iter()
                .any(|n| bijak::is_numeric_invoice_number(n) && n.trim_start_matches('0') == next)
        );
    }
});
