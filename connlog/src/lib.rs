#![forbid(unsafe_code)]

//! Per-connection TCP logging driven by a log-format string.
//!
//! A format string such as `"%srcip:%srcport %status %reqsize %latency"` is
//! compiled once into a [`FormatProgram`]. Every connection reported by the
//! stream reassembly engine gets its own [`Flow`] holding one field per
//! program entry. Lifecycle events fan out to those fields, and when the
//! connection closes the fields are rendered in order, sanitized, and handed
//! to a [`Printer`].
//!
//! ```
//! use connlog::prelude::*;
//!
//! let mut coordinator =
//!     Coordinator::from_format("%srcip %status %reqsize", StreamPrinter::new(Vec::new()))
//!         .unwrap();
//! let id = ConnectionId::new(
//!     "10.0.0.1:40000".parse().unwrap(),
//!     "10.0.0.2:80".parse().unwrap(),
//! );
//! coordinator.on_open(id, from_timeval(1, 0));
//! coordinator.on_request(id, from_timeval(1, 500), b"GET / HTTP/1.0\r\n\r\n");
//! coordinator.on_close(id, from_timeval(2, 0), &[]);
//! assert_eq!(coordinator.printer().get_ref(), b"10.0.0.1 last 18\n");
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod extract;
pub mod field;
pub mod flow;
pub mod format;
pub mod printer;
pub mod record;
pub mod sanitize;
pub mod shutdown;
pub mod trace;

pub use crate::coordinator::{Coordinator, Stats};
pub use crate::error::Error;
pub use crate::event::{ConnectionId, Event, EventKind, Timestamp};
pub use crate::flow::{Flow, FlowTable};
pub use crate::format::{FormatError, FormatProgram, KeywordRegistry};
pub use crate::printer::{CommandPrinter, PrintError, Printer, StreamPrinter};
pub use crate::shutdown::ShutdownReason;

///
/// Everything needed to drive a logging session
///
/// ```
/// use connlog::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, OutputConfig};
    pub use crate::event::from_timeval;
    pub use crate::trace::TraceReader;
    pub use crate::{
        CommandPrinter, ConnectionId, Coordinator, Error, Event, EventKind, Printer,
        ShutdownReason, StreamPrinter, Timestamp,
    };
}
