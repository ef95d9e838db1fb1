use std::cmp::Ordering;

use super::error::BijakError;

/// Longest invoice number a tax invoice may carry (CGST Rule 46(b)).
pub const MAX_INVOICE_NUMBER_LEN: usize = 16;

/// Whether `number` takes part in sequential numbering: non-empty and
/// ASCII digits only.
pub fn is_numeric_invoice_number(number: &str) -> bool {
    !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())
}

/// Largest numeric invoice number among `existing`, without leading zeros.
///
/// Non-numeric numbers are skipped. Returns `None` when nothing numeric is
/// present.
pub fn max_numeric_invoice_number<I, S>(existing: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    existing
        .into_iter()
        .filter(|n| is_numeric_invoice_number(n.as_ref()))
        .map(|n| canonical_digits(n.as_ref()).to_string())
        .max_by(|a, b| compare_digits(a, b))
}

/// Suggest the next invoice number for one user's existing numbers.
///
/// Takes the numeric maximum (0 when none) and adds one. Digit strings of
/// any length are handled without overflow. The result is advisory: two
/// drafts opened concurrently receive the same suggestion, and the store's
/// uniqueness check decides which one wins.
///
/// ```
/// use bijak::core::next_invoice_number;
///
/// assert_eq!(next_invoice_number(["3", "7", "abc", "10"]), "11");
/// assert_eq!(next_invoice_number(Vec::<String>::new()), "1");
/// ```
pub fn next_invoice_number<I, S>(existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match max_numeric_invoice_number(existing) {
        Some(max) => increment_digits(&max),
        None => "1".to_string(),
    }
}

/// [`next_invoice_number`], failing with [`BijakError::Numbering`] when the
/// sequence has run past [`MAX_INVOICE_NUMBER_LEN`] digits.
pub fn checked_next_invoice_number<I, S>(existing: I) -> Result<String, BijakError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let next = next_invoice_number(existing);
    if next.len() > MAX_INVOICE_NUMBER_LEN {
        return Err(BijakError::Numbering(format!(
            "next invoice number {next} exceeds {MAX_INVOICE_NUMBER_LEN} characters"
        )));
    }
    Ok(next)
}

/// Strip leading zeros, keeping a single "0" for an all-zero string.
fn canonical_digits(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Numeric comparison of canonical digit strings.
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn increment_digits(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    for byte in out.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    // Every digit carried over.
    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_pattern() {
        assert!(is_numeric_invoice_number("42"));
        assert!(is_numeric_invoice_number("007"));
        assert!(!is_numeric_invoice_number(""));
        assert!(!is_numeric_invoice_number("INV-1"));
        assert!(!is_numeric_invoice_number(" 12"));
        assert!(!is_numeric_invoice_number("-3"));
        assert!(!is_numeric_invoice_number("١٢"));
    }

    #[test]
    fn skips_non_numeric() {
        assert_eq!(next_invoice_number(["3", "7", "abc", "10"]), "11");
    }

    #[test]
    fn empty_starts_at_one() {
        assert_eq!(next_invoice_number(Vec::<&str>::new()), "1");
        assert_eq!(next_invoice_number(["INV/2024/1"]), "1");
    }

    #[test]
    fn numeric_not_lexicographic_max() {
        assert_eq!(next_invoice_number(["9", "10", "2"]), "11");
    }

    #[test]
    fn leading_zeros_are_dropped() {
        assert_eq!(next_invoice_number(["0007", "5"]), "8");
        assert_eq!(next_invoice_number(["000"]), "1");
    }

    #[test]
    fn carries_across_digits() {
        assert_eq!(next_invoice_number(["99"]), "100");
        assert_eq!(next_invoice_number(["1999"]), "2000");
    }

    #[test]
    fn beyond_u64_range() {
        assert_eq!(
            next_invoice_number(["18446744073709551615"]),
            "18446744073709551616"
        );
        assert_eq!(
            next_invoice_number(["99999999999999999999999999"]),
            "100000000000000000000000000"
        );
    }

    #[test]
    fn checked_stops_at_sixteen_digits() {
        assert_eq!(
            checked_next_invoice_number(["999999999999998"]).unwrap(),
            "999999999999999"
        );
        assert_eq!(
            checked_next_invoice_number(["999999999999999"]).unwrap(),
            "1000000000000000"
        );
        let err = checked_next_invoice_number(["9999999999999999"]).unwrap_err();
        assert!(matches!(err, BijakError::Numbering(_)));
    }

    #[test]
    fn max_reports_canonical_form() {
        assert_eq!(
            max_numeric_invoice_number(["012", "x", "11"]),
            Some("12".to_string())
        );
        assert_eq!(max_numeric_invoice_number(["x"]), None);
    }
}
