//! Per-connection fields that make up a log record.
//!
//! Each keyword of the format language maps to one [`Field`] variant. A flow
//! owns one field per entry of its format program, forwards every lifecycle
//! event to all of them, and renders them in order when the connection
//! closes.
//!
//! Capture of a first line or header block is not inherited: fields that
//! need it hold a [`Collector`] and delegate to it from the relevant hook.

// The trait must be declared before the enum dispatching over it.
mod _traits;
mod _enums;
mod collector;
mod endpoint;
mod payload;
mod status;
mod text;
mod timing;

pub use _enums::field::{render_fields, Field};
pub use _enums::status::ConnectionStatus;
pub use _traits::field_handler::FieldHandler;

pub use collector::{Collector, Unit, HEADER_SEPARATOR};
pub use endpoint::{CloseOriginator, DestAddr, DestPort, SourceAddr, SourcePort};
pub use payload::{
    RequestHeaders, RequestLine, RequestPayload, RequestSize, ResponseHeaders, ResponseLine,
    ResponsePayload, ResponseSize,
};
pub use status::Status;
pub use text::Text;
pub use timing::{
    CloseDelay, FirstByte, Latency, RecordTime, RequestDuration, RequestIdle, RequestTime,
    ResponseDuration, ResponseIdle, ResponseTime, SetupTime, TimeFormat, DEFAULT_TIME_FORMAT,
};
