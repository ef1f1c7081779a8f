//! The top-level value of a logging session.
//!
//! A [`Coordinator`] owns the compiled format program, the flow table and the
//! printer. The event source calls into it once per lifecycle event; when a
//! connection closes its record is printed and the flow is discarded.
//!
//! Only one coordinator may be live in a process at a time. Creating it is
//! the initialization boundary and dropping it is the teardown boundary.

use crate::error::Error;
use crate::event::{ConnectionId, Event, EventKind, Observation, Timestamp};
use crate::flow::FlowTable;
use crate::format::{self, FormatProgram};
use crate::printer::Printer;
use crate::shutdown::ShutdownReason;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Whether a coordinator is currently live in this process.
pub fn is_active() -> bool {
    ACTIVE.load(Ordering::Acquire)
}

/// Counters kept over the life of a coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Lifecycle events dispatched.
    pub events: u64,
    /// Records delivered by the printer.
    pub printed: u64,
    /// Records the printer failed to deliver.
    pub dropped: u64,
}

pub struct Coordinator<P: Printer = Box<dyn Printer>> {
    flows: FlowTable,
    printer: P,
    stats: Stats,
}

impl<P: Printer> Coordinator<P> {
    /// Claim the process-wide slot and start a session.
    ///
    /// # Errors
    /// Returns [`Error::AlreadyActive`] while another coordinator is live.
    pub fn new(program: FormatProgram, printer: P) -> Result<Self, Error> {
        if ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::AlreadyActive);
        }

        info!("coordinator started with {} columns", program.len());
        Ok(Self {
            flows: FlowTable::new(Arc::new(program)),
            printer,
            stats: Stats::default(),
        })
    }

    /// Compile `format` against the standard keywords and start a session.
    ///
    /// The format is compiled before the slot is claimed, so a bad format
    /// never blocks a later coordinator.
    pub fn from_format(format: &str, printer: P) -> Result<Self, Error> {
        let program = format::parse(format)?;
        Self::new(program, printer)
    }

    pub fn handle(&mut self, event: &Event) {
        self.dispatch(event.kind(), &event.observation());
    }

    pub fn on_opening(&mut self, id: ConnectionId, at: Timestamp) {
        self.dispatch(EventKind::Opening, &Observation::new(id, at, &[]));
    }

    pub fn on_open(&mut self, id: ConnectionId, at: Timestamp) {
        self.dispatch(EventKind::Open, &Observation::new(id, at, &[]));
    }

    pub fn on_request(&mut self, id: ConnectionId, at: Timestamp, payload: &[u8]) {
        self.dispatch(EventKind::Request, &Observation::new(id, at, payload));
    }

    pub fn on_response(&mut self, id: ConnectionId, at: Timestamp, payload: &[u8]) {
        self.dispatch(EventKind::Response, &Observation::new(id, at, payload));
    }

    /// `packet` is the raw IP packet that terminated the connection, if known.
    pub fn on_close(&mut self, id: ConnectionId, at: Timestamp, packet: &[u8]) {
        self.dispatch(EventKind::Close, &Observation::new(id, at, packet));
    }

    fn dispatch(&mut self, kind: EventKind, obs: &Observation<'_>) {
        self.stats.events = self.stats.events.saturating_add(1);
        let Some(flow) = self.flows.dispatch(kind, obs) else {
            return;
        };

        match self.printer.print(flow.fields(), obs.at) {
            Ok(()) => self.stats.printed = self.stats.printed.saturating_add(1),
            Err(e) => {
                warn!("dropping record for {}: {e}", flow.id());
                self.stats.dropped = self.stats.dropped.saturating_add(1);
            }
        }
    }

    pub fn flows(&self) -> &FlowTable {
        &self.flows
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// End the session, logging `reason`. Returns the final counters.
    pub fn shutdown(self, reason: ShutdownReason) -> Stats {
        info!("coordinator shutting down: {reason}");
        self.stats
    }
}

impl<P: Printer> Drop for Coordinator<P> {
    fn drop(&mut self) {
        let unclosed = self.flows.drain();
        for flow in &unclosed {
            debug!("discarding unclosed flow {} ({})", flow.id(), flow.state());
        }
        ACTIVE.store(false, Ordering::Release);
        info!(
            "coordinator stopped: {} events, {} printed, {} dropped, {} unclosed",
            self.stats.events,
            self.stats.printed,
            self.stats.dropped,
            unclosed.len()
        );
    }
}
