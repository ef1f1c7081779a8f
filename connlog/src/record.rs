/// Output buffer a flow's fields render into
use crate::sanitize::sanitize_in_place;
use std::fmt;
use std::io::Write;

/// One rendered log record, built field by field.
///
/// Bytes are kept raw until [`Record::sanitize`] is called by a printer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Record {
    buf: Vec<u8>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn push_str(&mut self, text: &str) {
        self.push_bytes(text.as_bytes());
    }

    pub fn push_display(&mut self, value: impl fmt::Display) {
        // Writing into a Vec cannot fail
        let _ = write!(self.buf, "{value}");
    }

    /// Durations are written in fixed notation with microsecond precision.
    pub fn push_seconds(&mut self, secs: f64) {
        self.push_display(format_args!("{secs:.6}"));
    }

    pub fn sanitize(&mut self) {
        sanitize_in_place(&mut self.buf);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
