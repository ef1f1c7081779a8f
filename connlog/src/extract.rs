//! First-line and header-block extraction over partially received payloads.
//!
//! Both functions are pure and may be called again on a longer buffer until
//! they report a complete unit.

/// Upper bound on the bytes buffered while waiting for a unit to complete.
pub const MAX_PENDING: usize = 8 * 1024;

/// The first line of `buf` without its terminator, once a `\n` has arrived.
pub fn first_line(buf: &[u8]) -> Option<&[u8]> {
    let end = buf.iter().position(|&b| b == b'\n')?;
    let line = buf.get(..end)?;
    Some(line.strip_suffix(b"\r").unwrap_or(line))
}

/// The header lines following the start line, once the blank line ending the
/// header block has arrived.
pub fn header_block(buf: &[u8]) -> Option<Vec<&[u8]>> {
    let mut lines = Vec::new();
    let mut rest = buf;
    let mut start_line = true;

    while let Some(end) = rest.iter().position(|&b| b == b'\n') {
        let line = rest.get(..end)?;
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        rest = rest.get(end + 1..)?;

        if start_line {
            start_line = false;
            continue;
        }
        if line.is_empty() {
            return Some(lines);
        }
        lines.push(line);
    }

    None
}
