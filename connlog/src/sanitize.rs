//! Byte filter applied to every rendered record before it reaches a
//! destination.
//!
//! Only printable ASCII, newline and tab pass through; every other byte is
//! replaced with `.`. Payload bytes echoed into a record therefore cannot
//! carry terminal control sequences or split the record.

/// Replacement for bytes that may not be written.
pub const REPLACEMENT: u8 = b'.';

/// Returns true when `byte` may be written unchanged.
pub fn is_passthrough(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\t' | 0x20..=0x7e)
}

pub fn sanitize_byte(byte: u8) -> u8 {
    if is_passthrough(byte) {
        byte
    } else {
        REPLACEMENT
    }
}

/// Lazily sanitize a byte sequence.
pub fn sanitize(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes.iter().map(|&b| sanitize_byte(b))
}

pub fn sanitize_in_place(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        *byte = sanitize_byte(*byte);
    }
}
