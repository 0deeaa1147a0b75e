/// Numeric ordering key of a dotted version token.
///
/// Reads the longest leading `digits[.digits]` prefix and parses it as a
/// float, so `"2.1.0"` → `2.1`, `"10"` → `10.0` and `"1.10"` → `1.1`.
/// A token with no leading digits maps to `0.0`.
pub fn numeric_version(token: &str) -> f64 {
    let bytes = token.as_bytes();
    let major_end = digits_end(bytes, 0);
    if major_end == 0 {
        return 0.0;
    }

    let mut end = major_end;
    if bytes.get(major_end) == Some(&b'.') {
        let minor_end = digits_end(bytes, major_end + 1);
        if minor_end > major_end + 1 {
            end = minor_end;
        }
    }

    // The prefix is ASCII digits with at most one dot; parsing cannot fail.
    token[..end].parse().unwrap_or(0.0)
}

fn digits_end(bytes: &[u8], from: usize) -> usize {
    let mut end = from;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}
