//! Percent-unescaping of path fields
//!
//! Paths are stored escaped the way browsers' legacy `escape()` writes them:
//! `%XX` for a byte-sized code unit and `%uXXXX` for a UTF-16 code unit.
//! Sequences that don't form a valid escape are kept as written.

/// Decode `%XX` and `%uXXXX` escapes
///
/// Each escape stands for one UTF-16 code unit, so `%uD83D%uDE00` decodes to a
/// single astral character. Unpaired surrogates are replaced with U+FFFD.
#[must_use]
pub fn unescape(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }

    let units: Vec<u16> = input.encode_utf16().collect();
    let mut out: Vec<u16> = Vec::with_capacity(units.len());
    let mut i = 0;

    while i < units.len() {
        if units[i] == u16::from(b'%') {
            if units.get(i + 1) == Some(&u16::from(b'u')) {
                if let Some(unit) = hex_value(units.get(i + 2..i + 6)) {
                    out.push(unit);
                    i += 6;
                    continue;
                }
            }
            if let Some(unit) = hex_value(units.get(i + 1..i + 3)) {
                out.push(unit);
                i += 3;
                continue;
            }
        }
        out.push(units[i]);
        i += 1;
    }

    String::from_utf16_lossy(&out)
}

/// Parse a run of ASCII hex digits stored as UTF-16 units
fn hex_value(digits: Option<&[u16]>) -> Option<u16> {
    digits?.iter().try_fold(0u16, |acc, &unit| {
        let digit = char::from_u32(u32::from(unit))?.to_digit(16)?;
        // At most four digits, so this never overflows
        Some(acc * 16 + u16::try_from(digit).ok()?)
    })
}
