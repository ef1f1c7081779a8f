// Observation, Timestamp and Record appear in the forwarding impl that
// enum_dispatch expands next to this enum.
use crate::event::{Observation, Timestamp};
use crate::field::endpoint::{CloseOriginator, DestAddr, DestPort, SourceAddr, SourcePort};
use crate::field::payload::{
    RequestHeaders, RequestLine, RequestPayload, RequestSize, ResponseHeaders, ResponseLine,
    ResponsePayload, ResponseSize,
};
use crate::field::status::Status;
use crate::field::text::Text;
use crate::field::timing::{
    CloseDelay, FirstByte, Latency, RecordTime, RequestDuration, RequestIdle, RequestTime,
    ResponseDuration, ResponseIdle, ResponseTime, SetupTime,
};
use crate::field::FieldHandler;
use crate::record::Record;
use enum_dispatch::enum_dispatch;

/// Every field a format string can produce.
#[enum_dispatch(FieldHandler)]
#[derive(Debug, Clone)]
pub enum Field {
    Text(Text),
    SourceAddr(SourceAddr),
    DestAddr(DestAddr),
    SourcePort(SourcePort),
    DestPort(DestPort),
    CloseOriginator(CloseOriginator),
    Status(Status),
    RequestLine(RequestLine),
    ResponseLine(ResponseLine),
    RequestHeaders(RequestHeaders),
    ResponseHeaders(ResponseHeaders),
    RequestPayload(RequestPayload),
    ResponsePayload(ResponsePayload),
    RequestSize(RequestSize),
    ResponseSize(ResponseSize),
    RequestTime(RequestTime),
    ResponseTime(ResponseTime),
    RecordTime(RecordTime),
    RequestDuration(RequestDuration),
    Latency(Latency),
    FirstByte(FirstByte),
    ResponseDuration(ResponseDuration),
    RequestIdle(RequestIdle),
    ResponseIdle(ResponseIdle),
    CloseDelay(CloseDelay),
    SetupTime(SetupTime),
}

/// Render `fields` in order into one unsanitized record.
pub fn render_fields(fields: &[Field], at: Timestamp) -> Record {
    let mut record = Record::new();
    for field in fields {
        field.render(&mut record, at);
    }
    record
}
