/// Fields derived from request and response payload bytes
use crate::event::{Observation, Timestamp};
use crate::extract::MAX_PENDING;
use crate::field::collector::Collector;
use crate::field::FieldHandler;
use crate::record::Record;

/// First line of the request payload, or empty until one has arrived.
#[derive(Debug, Clone)]
pub struct RequestLine {
    line: Collector,
}

impl Default for RequestLine {
    fn default() -> Self {
        Self {
            line: Collector::first_line(),
        }
    }
}

impl FieldHandler for RequestLine {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.line.feed(obs.data);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_bytes(self.line.captured());
    }
}

/// First line of the response payload, or empty until one has arrived.
#[derive(Debug, Clone)]
pub struct ResponseLine {
    line: Collector,
}

impl Default for ResponseLine {
    fn default() -> Self {
        Self {
            line: Collector::first_line(),
        }
    }
}

impl FieldHandler for ResponseLine {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.line.feed(obs.data);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_bytes(self.line.captured());
    }
}

/// Request header lines, joined on one line.
#[derive(Debug, Clone)]
pub struct RequestHeaders {
    headers: Collector,
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self {
            headers: Collector::headers(),
        }
    }
}

impl FieldHandler for RequestHeaders {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.headers.feed(obs.data);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_bytes(self.headers.captured());
    }
}

/// Response header lines, joined on one line.
#[derive(Debug, Clone)]
pub struct ResponseHeaders {
    headers: Collector,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        Self {
            headers: Collector::headers(),
        }
    }
}

impl FieldHandler for ResponseHeaders {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.headers.feed(obs.data);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_bytes(self.headers.captured());
    }
}

/// Append `data` to `buf` without growing it past [`MAX_PENDING`].
fn append_bounded(buf: &mut Vec<u8>, data: &[u8]) {
    let room = MAX_PENDING.saturating_sub(buf.len());
    buf.extend(data.iter().take(room));
}

/// Request payload as sent, cut off after [`MAX_PENDING`] bytes.
///
/// Bytes are rendered raw; the printer replaces anything unprintable.
#[derive(Debug, Clone, Default)]
pub struct RequestPayload {
    data: Vec<u8>,
}

impl FieldHandler for RequestPayload {
    fn on_request(&mut self, obs: &Observation<'_>) {
        append_bounded(&mut self.data, obs.data);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_bytes(&self.data);
    }
}

/// Response payload as received, cut off after [`MAX_PENDING`] bytes.
#[derive(Debug, Clone, Default)]
pub struct ResponsePayload {
    data: Vec<u8>,
}

impl FieldHandler for ResponsePayload {
    fn on_response(&mut self, obs: &Observation<'_>) {
        append_bounded(&mut self.data, obs.data);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_bytes(&self.data);
    }
}

/// Total request bytes.
#[derive(Debug, Clone, Default)]
pub struct RequestSize {
    bytes: u64,
}

impl FieldHandler for RequestSize {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.bytes = self.bytes.saturating_add(obs.data.len() as u64);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_display(self.bytes);
    }
}

/// Total response bytes.
#[derive(Debug, Clone, Default)]
pub struct ResponseSize {
    bytes: u64,
}

impl FieldHandler for ResponseSize {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.bytes = self.bytes.saturating_add(obs.data.len() as u64);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_display(self.bytes);
    }
}
