/// Timestamp and duration fields
///
/// All arithmetic uses the event times delivered with each observation, never
/// the wall clock. Durations render in seconds with six decimals.
use crate::event::{elapsed_secs, Observation, Timestamp};
use crate::field::FieldHandler;
use crate::record::Record;

/// Default strftime pattern for the timestamp keywords.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A strftime pattern, rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    pattern: String,
}

impl TimeFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn write(&self, out: &mut Record, at: Timestamp) {
        out.push_display(at.format(&self.pattern));
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

fn push_span(out: &mut Record, from: Option<Timestamp>, to: Option<Timestamp>) {
    match (from, to) {
        (Some(from), Some(to)) => out.push_seconds(elapsed_secs(from, to)),
        _ => out.push_seconds(0.0),
    }
}

// The idle and close-delay fields print a bare integer zero when an anchor
// was never seen.
fn push_span_or_zero(out: &mut Record, from: Option<Timestamp>, to: Option<Timestamp>) {
    match (from, to) {
        (Some(from), Some(to)) => out.push_seconds(elapsed_secs(from, to)),
        _ => out.push_str("0"),
    }
}

/// Time of the latest request. Renders the epoch until one is seen.
#[derive(Debug, Clone, Default)]
pub struct RequestTime {
    format: TimeFormat,
    at: Option<Timestamp>,
}

impl RequestTime {
    pub fn new(format: TimeFormat) -> Self {
        Self { format, at: None }
    }
}

impl FieldHandler for RequestTime {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.at = Some(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        self.format.write(out, self.at.unwrap_or_default());
    }
}

/// Time of the latest response. Renders the epoch until one is seen.
#[derive(Debug, Clone, Default)]
pub struct ResponseTime {
    format: TimeFormat,
    at: Option<Timestamp>,
}

impl ResponseTime {
    pub fn new(format: TimeFormat) -> Self {
        Self { format, at: None }
    }
}

impl FieldHandler for ResponseTime {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.at = Some(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        self.format.write(out, self.at.unwrap_or_default());
    }
}

/// The render timestamp, i.e. the time the connection closed.
#[derive(Debug, Clone, Default)]
pub struct RecordTime {
    format: TimeFormat,
}

impl RecordTime {
    pub fn new(format: TimeFormat) -> Self {
        Self { format }
    }
}

impl FieldHandler for RecordTime {
    fn render(&self, out: &mut Record, at: Timestamp) {
        self.format.write(out, at);
    }
}

/// First request to latest request.
#[derive(Debug, Clone, Default)]
pub struct RequestDuration {
    first: Option<Timestamp>,
    last: Option<Timestamp>,
}

impl FieldHandler for RequestDuration {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.first.get_or_insert(obs.at);
        self.last = Some(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        push_span(out, self.first, self.last);
    }
}

/// Latest of open or request to latest response.
#[derive(Debug, Clone, Default)]
pub struct Latency {
    start: Option<Timestamp>,
    response: Option<Timestamp>,
}

impl FieldHandler for Latency {
    fn on_open(&mut self, obs: &Observation<'_>) {
        self.start = Some(obs.at);
    }

    fn on_request(&mut self, obs: &Observation<'_>) {
        self.start = Some(obs.at);
    }

    fn on_response(&mut self, obs: &Observation<'_>) {
        self.response = Some(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        push_span(out, self.start, self.response);
    }
}

/// Latest request preceding the first response, to that first response.
#[derive(Debug, Clone, Default)]
pub struct FirstByte {
    request: Option<Timestamp>,
    response: Option<Timestamp>,
}

impl FieldHandler for FirstByte {
    fn on_request(&mut self, obs: &Observation<'_>) {
        if self.response.is_none() {
            self.request = Some(obs.at);
        }
    }

    fn on_response(&mut self, obs: &Observation<'_>) {
        self.response.get_or_insert(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        push_span(out, self.request, self.response);
    }
}

/// First response to latest response.
#[derive(Debug, Clone, Default)]
pub struct ResponseDuration {
    first: Option<Timestamp>,
    last: Option<Timestamp>,
}

impl FieldHandler for ResponseDuration {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.first.get_or_insert(obs.at);
        self.last = Some(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        push_span(out, self.first, self.last);
    }
}

/// Idle time between the completed handshake and the first request.
#[derive(Debug, Clone, Default)]
pub struct RequestIdle {
    open: Option<Timestamp>,
    request: Option<Timestamp>,
}

impl FieldHandler for RequestIdle {
    fn on_open(&mut self, obs: &Observation<'_>) {
        self.open = Some(obs.at);
    }

    fn on_request(&mut self, obs: &Observation<'_>) {
        self.request.get_or_insert(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        push_span_or_zero(out, self.open, self.request);
    }
}

/// Idle time between the latest response and the render timestamp.
#[derive(Debug, Clone, Default)]
pub struct ResponseIdle {
    response: Option<Timestamp>,
}

impl FieldHandler for ResponseIdle {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.response = Some(obs.at);
    }

    fn render(&self, out: &mut Record, at: Timestamp) {
        push_span_or_zero(out, self.response, Some(at));
    }
}

/// Last open, request or response to the close.
#[derive(Debug, Clone, Default)]
pub struct CloseDelay {
    activity: Option<Timestamp>,
    closed: Option<Timestamp>,
}

impl FieldHandler for CloseDelay {
    fn on_open(&mut self, obs: &Observation<'_>) {
        self.activity = Some(obs.at);
    }

    fn on_request(&mut self, obs: &Observation<'_>) {
        self.activity = Some(obs.at);
    }

    fn on_response(&mut self, obs: &Observation<'_>) {
        self.activity = Some(obs.at);
    }

    fn on_close(&mut self, obs: &Observation<'_>) {
        self.closed = Some(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        push_span_or_zero(out, self.activity, self.closed);
    }
}

/// First connection attempt to the completed handshake.
#[derive(Debug, Clone, Default)]
pub struct SetupTime {
    opening: Option<Timestamp>,
    open: Option<Timestamp>,
}

impl FieldHandler for SetupTime {
    fn on_opening(&mut self, obs: &Observation<'_>) {
        self.opening.get_or_insert(obs.at);
    }

    fn on_open(&mut self, obs: &Observation<'_>) {
        self.open = Some(obs.at);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        push_span(out, self.opening, self.open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{from_timeval, ConnectionId};

    fn at(secs: i64, micros: u32) -> Observation<'static> {
        let id = ConnectionId::new(
            "10.0.0.1:40000".parse().unwrap(),
            "10.0.0.2:80".parse().unwrap(),
        );
        Observation::new(id, from_timeval(secs, micros), b"")
    }

    fn rendered_at(field: &impl FieldHandler, secs: i64) -> String {
        let mut out = Record::new();
        field.render(&mut out, from_timeval(secs, 0));
        String::from_utf8(out.into_bytes()).unwrap()
    }

    fn rendered(field: &impl FieldHandler) -> String {
        rendered_at(field, 1_000)
    }

    #[test]
    fn test_request_time_last_wins() {
        let mut field = RequestTime::new(TimeFormat::default());
        assert_eq!(rendered(&field), "1970-01-01 00:00:00");
        field.on_request(&at(1_700_000_000, 0));
        field.on_request(&at(1_700_000_060, 0));
        assert_eq!(rendered(&field), "2023-11-14 22:14:20");
    }

    #[test]
    fn test_response_time_custom_format() {
        let mut field = ResponseTime::new(TimeFormat::new("%s.%f"));
        field.on_response(&at(12, 500_000));
        assert_eq!(rendered(&field), "12.500000000");
    }

    #[test]
    fn test_record_time_uses_render_timestamp() {
        let field = RecordTime::new(TimeFormat::new("%H:%M:%S"));
        assert_eq!(rendered_at(&field, 3_661), "01:01:01");
    }

    #[test]
    fn test_request_duration() {
        let mut field = RequestDuration::default();
        assert_eq!(rendered(&field), "0.000000");
        field.on_request(&at(10, 0));
        assert_eq!(rendered(&field), "0.000000");
        field.on_request(&at(11, 0));
        field.on_request(&at(12, 250_000));
        assert_eq!(rendered(&field), "2.250000");
    }

    #[test]
    fn test_latency_anchors_on_open_or_request() {
        let mut field = Latency::default();
        field.on_open(&at(10, 0));
        assert_eq!(rendered(&field), "0.000000");
        field.on_response(&at(10, 500_000));
        assert_eq!(rendered(&field), "0.500000");

        field.on_request(&at(11, 0));
        field.on_response(&at(11, 100_000));
        assert_eq!(rendered(&field), "0.100000");
    }

    #[test]
    fn test_first_byte_keeps_first_response() {
        let mut field = FirstByte::default();
        field.on_request(&at(10, 0));
        field.on_request(&at(10, 200_000));
        field.on_response(&at(10, 300_000));
        field.on_request(&at(20, 0));
        field.on_response(&at(30, 0));
        assert_eq!(rendered(&field), "0.100000");
    }

    #[test]
    fn test_first_byte_without_response() {
        let mut field = FirstByte::default();
        field.on_request(&at(10, 0));
        assert_eq!(rendered(&field), "0.000000");
    }

    #[test]
    fn test_response_duration() {
        let mut field = ResponseDuration::default();
        field.on_response(&at(5, 0));
        field.on_response(&at(8, 0));
        assert_eq!(rendered(&field), "3.000000");
    }

    #[test]
    fn test_request_idle_needs_open_and_request() {
        let mut field = RequestIdle::default();
        field.on_request(&at(5, 0));
        assert_eq!(rendered(&field), "0");

        let mut field = RequestIdle::default();
        field.on_open(&at(4, 0));
        field.on_request(&at(5, 0));
        field.on_request(&at(9, 0));
        assert_eq!(rendered(&field), "1.000000");
    }

    #[test]
    fn test_response_idle_until_render() {
        let mut field = ResponseIdle::default();
        assert_eq!(rendered_at(&field, 100), "0");
        field.on_response(&at(90, 0));
        field.on_response(&at(95, 0));
        assert_eq!(rendered_at(&field, 100), "5.000000");
    }

    #[test]
    fn test_close_delay() {
        let mut field = CloseDelay::default();
        field.on_open(&at(1, 0));
        assert_eq!(rendered(&field), "0");
        field.on_request(&at(2, 0));
        field.on_response(&at(3, 0));
        field.on_close(&at(7, 0));
        assert_eq!(rendered(&field), "4.000000");
    }

    #[test]
    fn test_setup_time() {
        let mut field = SetupTime::default();
        field.on_opening(&at(1, 0));
        assert_eq!(rendered(&field), "0.000000");
        field.on_opening(&at(1, 500_000));
        field.on_open(&at(1, 750_000));
        assert_eq!(rendered(&field), "0.750000");
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut field = ResponseIdle::default();
        field.on_response(&at(1, 0));
        assert_eq!(rendered_at(&field, 3), rendered_at(&field, 3));
    }
}
