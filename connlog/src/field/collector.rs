/// Latching capture of a first line or header block from streamed payload
use crate::extract::{first_line, header_block, MAX_PENDING};

/// Separator placed between captured header lines.
pub const HEADER_SEPARATOR: &[u8] = b"; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    FirstLine,
    Headers,
}

/// Buffers payload until its unit is complete, then freezes the capture.
///
/// Fields hold a `Collector` and forward the relevant payload to it; once
/// [`Collector::is_complete`] is true further input is ignored.
#[derive(Debug, Clone)]
pub struct Collector {
    unit: Unit,
    pending: Vec<u8>,
    captured: Option<Vec<u8>>,
}

impl Collector {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            pending: Vec::new(),
            captured: None,
        }
    }

    pub fn first_line() -> Self {
        Self::new(Unit::FirstLine)
    }

    pub fn headers() -> Self {
        Self::new(Unit::Headers)
    }

    pub fn feed(&mut self, data: &[u8]) {
        if self.captured.is_some() {
            return;
        }

        let room = MAX_PENDING.saturating_sub(self.pending.len());
        self.pending.extend(data.iter().take(room));

        self.captured = match self.unit {
            Unit::FirstLine => first_line(&self.pending).map(<[u8]>::to_vec),
            Unit::Headers => header_block(&self.pending).map(|lines| lines.join(HEADER_SEPARATOR)),
        };

        if self.captured.is_some() {
            self.pending = Vec::new();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.captured.is_some()
    }

    /// The captured unit, or empty while incomplete.
    pub fn captured(&self) -> &[u8] {
        self.captured.as_deref().unwrap_or_default()
    }
}
