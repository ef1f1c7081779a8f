//! JSON-lines event traces.
//!
//! A trace stands in for a live stream reassembly engine: each line is one
//! lifecycle event of one connection.
//!
//! ```text
//! {"event":"open","client":"10.0.0.1:40000","server":"10.0.0.2:80","at":"2024-05-01T12:00:00Z"}
//! {"event":"request","client":"10.0.0.1:40000","server":"10.0.0.2:80","at":"2024-05-01T12:00:00.2Z","data":"GET / HTTP/1.1\r\n\r\n"}
//! {"event":"close","client":"10.0.0.1:40000","server":"10.0.0.2:80","at":"2024-05-01T12:00:01Z"}
//! ```
//!
//! `data` is either a string, taken as its UTF-8 bytes, or an array of byte
//! values for payloads that are not valid UTF-8:
//!
//! ```text
//! {"event":"response","client":"10.0.0.1:40000","server":"10.0.0.2:80","at":"2024-05-01T12:00:00.4Z","data":[22,3,1,0,255]}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::event::{ConnectionId, Event, EventKind, Timestamp};
use serde::Deserialize;
use std::io::{self, BufRead};
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    #[error("trace line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

/// Payload bytes of a trace line.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<Payload> for Vec<u8> {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Text(text) => text.into_bytes(),
            Payload::Bytes(bytes) => bytes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TraceLine {
    event: EventKind,
    client: SocketAddr,
    server: SocketAddr,
    at: Timestamp,
    #[serde(default)]
    data: Option<Payload>,
    #[serde(default)]
    packet: Option<Vec<u8>>,
}

impl From<TraceLine> for Event {
    fn from(line: TraceLine) -> Self {
        let id = ConnectionId::new(line.client, line.server);
        let at = line.at;
        let data = line.data.map(Vec::from).unwrap_or_default();
        match line.event {
            EventKind::Opening => Event::Opening { id, at },
            EventKind::Open => Event::Open { id, at },
            EventKind::Request => Event::Request {
                id,
                at,
                payload: data,
            },
            EventKind::Response => Event::Response {
                id,
                at,
                payload: data,
            },
            EventKind::Close => Event::Close {
                id,
                at,
                packet: line.packet.unwrap_or_default(),
            },
        }
    }
}

/// Parse one trace line into an event.
pub fn parse_line(line: &str) -> Result<Event, serde_json::Error> {
    serde_json::from_str::<TraceLine>(line).map(Event::from)
}

/// Iterator over the events of a trace.
#[derive(Debug)]
pub struct TraceReader<R: BufRead> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of the last line read, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Event, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            let text = text.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let line = self.line;
            return Some(parse_line(text).map_err(|source| TraceError::Parse { line, source }));
        }
    }
}
