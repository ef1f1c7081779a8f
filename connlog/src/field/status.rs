use crate::event::{Observation, Timestamp};
use crate::field::{ConnectionStatus, FieldHandler};
use crate::record::Record;

/// Connection status as seen at close time.
#[derive(Debug, Clone, Default)]
pub struct Status {
    status: ConnectionStatus,
}

impl Status {
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    // A late handshake event never erases payload already seen.
    fn saw_handshake(&mut self) {
        if self.status == ConnectionStatus::Unknown {
            self.status = ConnectionStatus::Start;
        }
    }

    fn saw_payload(&mut self) {
        if matches!(
            self.status,
            ConnectionStatus::Unknown | ConnectionStatus::Start
        ) {
            self.status = ConnectionStatus::Continuing;
        }
    }
}

impl FieldHandler for Status {
    fn on_opening(&mut self, _obs: &Observation<'_>) {
        self.saw_handshake();
    }

    fn on_open(&mut self, _obs: &Observation<'_>) {
        self.saw_handshake();
    }

    fn on_request(&mut self, _obs: &Observation<'_>) {
        self.saw_payload();
    }

    fn on_response(&mut self, _obs: &Observation<'_>) {
        self.saw_payload();
    }

    fn on_close(&mut self, _obs: &Observation<'_>) {
        self.status = match self.status {
            ConnectionStatus::Start => ConnectionStatus::Unique,
            ConnectionStatus::Unknown => ConnectionStatus::Unknown,
            _ => ConnectionStatus::Last,
        };
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_display(self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{from_timeval, ConnectionId};

    fn obs(secs: i64) -> Observation<'static> {
        let id = ConnectionId::new(
            "10.0.0.1:1000".parse().unwrap(),
            "10.0.0.2:25".parse().unwrap(),
        );
        Observation::new(id, from_timeval(secs, 0), b"")
    }

    #[test]
    fn test_opening_then_close_is_unique() {
        let mut status = Status::default();
        status.on_opening(&obs(0));
        assert_eq!(status.status(), ConnectionStatus::Start);
        status.on_close(&obs(1));
        assert_eq!(status.status(), ConnectionStatus::Unique);
    }

    #[test]
    fn test_request_then_close_is_last() {
        let mut status = Status::default();
        status.on_opening(&obs(0));
        status.on_request(&obs(1));
        status.on_close(&obs(2));
        assert_eq!(status.status(), ConnectionStatus::Last);
    }

    #[test]
    fn test_mid_stream_connection_is_last() {
        let mut status = Status::default();
        status.on_response(&obs(1));
        assert_eq!(status.status(), ConnectionStatus::Continuing);
        status.on_close(&obs(2));
        assert_eq!(status.status(), ConnectionStatus::Last);
    }

    #[test]
    fn test_late_open_keeps_payload() {
        let mut status = Status::default();
        status.on_opening(&obs(0));
        status.on_request(&obs(1));
        status.on_open(&obs(2));
        assert_eq!(status.status(), ConnectionStatus::Continuing);
        status.on_close(&obs(3));
        assert_eq!(status.status(), ConnectionStatus::Last);
    }

    #[test]
    fn test_repeated_handshake_events() {
        let mut status = Status::default();
        status.on_opening(&obs(0));
        status.on_opening(&obs(1));
        status.on_open(&obs(2));
        status.on_close(&obs(3));
        assert_eq!(status.status(), ConnectionStatus::Unique);
    }

    #[test]
    fn test_close_alone_stays_unknown() {
        let mut status = Status::default();
        status.on_close(&obs(2));
        assert_eq!(status.status(), ConnectionStatus::Unknown);

        let mut out = Record::new();
        status.render(&mut out, from_timeval(2, 0));
        assert_eq!(out.as_bytes(), b"unknown");
    }

    #[test]
    fn test_render_continuing() {
        let mut status = Status::default();
        status.on_open(&obs(0));
        status.on_request(&obs(1));
        let mut out = Record::new();
        status.render(&mut out, from_timeval(1, 0));
        assert_eq!(out.as_bytes(), b"continue");
    }
}
