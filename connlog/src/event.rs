//! Connection identity and the lifecycle events delivered by the stream
//! reassembly engine.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use strum_macros::{Display, EnumString, VariantNames};

/// Event time as reported by the reassembly engine.
pub type Timestamp = DateTime<Utc>;

/// Build a timestamp from a `timeval`-style pair.
///
/// Values chrono cannot represent collapse to the Unix epoch.
pub fn from_timeval(secs: i64, micros: u32) -> Timestamp {
    DateTime::from_timestamp(secs, micros.saturating_mul(1_000)).unwrap_or_default()
}

/// Seconds elapsed between two event times, negative when `to` precedes `from`.
pub fn elapsed_secs(from: Timestamp, to: Timestamp) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

/// The direction-normalized 4-tuple of a TCP connection.
///
/// `client` is the endpoint that sends requests, `server` the one that
/// answers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId {
    pub client: SocketAddr,
    pub server: SocketAddr,
}

impl ConnectionId {
    pub fn new(client: SocketAddr, server: SocketAddr) -> Self {
        Self { client, server }
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.client, self.server)
    }
}

/// Lifecycle event kinds, in the order a well-behaved connection produces them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Opening,
    Open,
    Request,
    Response,
    Close,
}

/// Borrowed view of one event, handed to every field of a flow.
///
/// `data` is the newly delivered payload for request/response events, the
/// raw terminating packet for close events, and empty otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub id: ConnectionId,
    pub at: Timestamp,
    pub data: &'a [u8],
}

impl<'a> Observation<'a> {
    pub fn new(id: ConnectionId, at: Timestamp, data: &'a [u8]) -> Self {
        Self { id, at, data }
    }

    /// Source address of the IP packet carried in `data`, if it parses as
    /// an IPv4 or IPv6 header.
    pub fn packet_source(&self) -> Option<IpAddr> {
        let version = *self.data.first()? >> 4;
        match version {
            4 => {
                let octets: [u8; 4] = self.data.get(12..16)?.try_into().ok()?;
                Some(IpAddr::from(octets))
            }
            6 => {
                let octets: [u8; 16] = self.data.get(8..24)?.try_into().ok()?;
                Some(IpAddr::from(octets))
            }
            _ => None,
        }
    }
}

/// An owned lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Opening {
        id: ConnectionId,
        at: Timestamp,
    },
    Open {
        id: ConnectionId,
        at: Timestamp,
    },
    Request {
        id: ConnectionId,
        at: Timestamp,
        payload: Vec<u8>,
    },
    Response {
        id: ConnectionId,
        at: Timestamp,
        payload: Vec<u8>,
    },
    Close {
        id: ConnectionId,
        at: Timestamp,
        packet: Vec<u8>,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Opening { .. } => EventKind::Opening,
            Event::Open { .. } => EventKind::Open,
            Event::Request { .. } => EventKind::Request,
            Event::Response { .. } => EventKind::Response,
            Event::Close { .. } => EventKind::Close,
        }
    }

    pub fn id(&self) -> ConnectionId {
        match self {
            Event::Opening { id, .. }
            | Event::Open { id, .. }
            | Event::Request { id, .. }
            | Event::Response { id, .. }
            | Event::Close { id, .. } => *id,
        }
    }

    pub fn at(&self) -> Timestamp {
        match self {
            Event::Opening { at, .. }
            | Event::Open { at, .. }
            | Event::Request { at, .. }
            | Event::Response { at, .. }
            | Event::Close { at, .. } => *at,
        }
    }

    pub fn observation(&self) -> Observation<'_> {
        let data: &[u8] = match self {
            Event::Opening { .. } | Event::Open { .. } => &[],
            Event::Request { payload, .. } | Event::Response { payload, .. } => payload,
            Event::Close { packet, .. } => packet,
        };
        Observation::new(self.id(), self.at(), data)
    }
}
