use crate::event::{Observation, Timestamp};
use crate::record::Record;
use enum_dispatch::enum_dispatch;

/// Per-connection observer behind one column of a log record.
///
/// A field reacts to the lifecycle events of the connection it belongs to
/// and renders its value once the connection closes. Every hook defaults to
/// a no-op, so a field only overrides the events it cares about. Fields never
/// fail: anything not observed renders as a documented default.
#[enum_dispatch]
pub trait FieldHandler {
    /// A connection attempt was seen (SYN).
    fn on_opening(&mut self, _obs: &Observation<'_>) {}

    /// The handshake completed.
    fn on_open(&mut self, _obs: &Observation<'_>) {}

    /// New client-to-server payload arrived in `obs.data`.
    fn on_request(&mut self, _obs: &Observation<'_>) {}

    /// New server-to-client payload arrived in `obs.data`.
    fn on_response(&mut self, _obs: &Observation<'_>) {}

    /// The connection terminated; `obs.data` holds the terminating packet.
    fn on_close(&mut self, _obs: &Observation<'_>) {}

    /// Append this field's value to `out`. `at` is the render timestamp.
    fn render(&self, _out: &mut Record, _at: Timestamp) {}
}
