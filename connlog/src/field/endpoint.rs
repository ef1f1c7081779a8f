/// Address, port and close-originator fields
use crate::event::{Observation, Timestamp};
use crate::field::FieldHandler;
use crate::record::Record;
use std::net::{IpAddr, Ipv4Addr};

const NO_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Client address, latched on the first request.
#[derive(Debug, Clone, Default)]
pub struct SourceAddr {
    addr: Option<IpAddr>,
}

impl FieldHandler for SourceAddr {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.addr.get_or_insert(obs.id.client.ip());
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_display(self.addr.unwrap_or(NO_ADDR));
    }
}

/// Server address, latched on the first response.
#[derive(Debug, Clone, Default)]
pub struct DestAddr {
    addr: Option<IpAddr>,
}

impl FieldHandler for DestAddr {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.addr.get_or_insert(obs.id.server.ip());
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_display(self.addr.unwrap_or(NO_ADDR));
    }
}

/// Client port, latched on the first request.
#[derive(Debug, Clone, Default)]
pub struct SourcePort {
    port: Option<u16>,
}

impl FieldHandler for SourcePort {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.port.get_or_insert(obs.id.client.port());
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_display(self.port.unwrap_or_default());
    }
}

/// Server port, latched on the first response.
#[derive(Debug, Clone, Default)]
pub struct DestPort {
    port: Option<u16>,
}

impl FieldHandler for DestPort {
    fn on_response(&mut self, obs: &Observation<'_>) {
        self.port.get_or_insert(obs.id.server.port());
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_display(self.port.unwrap_or_default());
    }
}

/// Which endpoint sent the packet that terminated the connection.
///
/// The source of the terminating packet is compared with the client address
/// seen on requests and the server address seen on responses. Anything that
/// matches neither renders as `unknown`.
#[derive(Debug, Clone, Default)]
pub struct CloseOriginator {
    client: Option<IpAddr>,
    server: Option<IpAddr>,
    originator: Option<IpAddr>,
}

impl FieldHandler for CloseOriginator {
    fn on_request(&mut self, obs: &Observation<'_>) {
        self.client = Some(obs.id.client.ip());
    }

    fn on_response(&mut self, obs: &Observation<'_>) {
        self.server = Some(obs.id.server.ip());
    }

    fn on_close(&mut self, obs: &Observation<'_>) {
        self.originator = obs
            .packet_source()
            .filter(|ip| Some(*ip) == self.client || Some(*ip) == self.server);
    }

    fn render(&self, out: &mut Record, _at: Timestamp) {
        match self.originator {
            Some(ip) => out.push_display(ip),
            None => out.push_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{from_timeval, ConnectionId};

    fn id() -> ConnectionId {
        ConnectionId::new(
            "10.0.0.1:40000".parse().unwrap(),
            "10.0.0.2:443".parse().unwrap(),
        )
    }

    fn rendered(field: &impl FieldHandler) -> String {
        let mut out = Record::new();
        field.render(&mut out, from_timeval(0, 0));
        String::from_utf8(out.into_bytes()).unwrap()
    }

    fn ipv4_packet(src: [u8; 4]) -> Vec<u8> {
        let mut packet = vec![0u8; 20];
        packet[0] = 0x45;
        packet[12..16].copy_from_slice(&src);
        packet
    }

    #[test]
    fn test_defaults_before_any_event() {
        assert_eq!(rendered(&SourceAddr::default()), "0.0.0.0");
        assert_eq!(rendered(&DestAddr::default()), "0.0.0.0");
        assert_eq!(rendered(&SourcePort::default()), "0");
        assert_eq!(rendered(&DestPort::default()), "0");
        assert_eq!(rendered(&CloseOriginator::default()), "unknown");
    }

    #[test]
    fn test_source_fields_set_on_request_only() {
        let mut addr = SourceAddr::default();
        let mut port = SourcePort::default();
        let obs = Observation::new(id(), from_timeval(1, 0), b"x");

        addr.on_response(&obs);
        port.on_response(&obs);
        assert_eq!(rendered(&addr), "0.0.0.0");

        addr.on_request(&obs);
        port.on_request(&obs);
        assert_eq!(rendered(&addr), "10.0.0.1");
        assert_eq!(rendered(&port), "40000");
    }

    #[test]
    fn test_dest_fields_set_on_response() {
        let mut addr = DestAddr::default();
        let mut port = DestPort::default();
        let obs = Observation::new(id(), from_timeval(1, 0), b"x");
        addr.on_response(&obs);
        port.on_response(&obs);
        assert_eq!(rendered(&addr), "10.0.0.2");
        assert_eq!(rendered(&port), "443");
    }

    #[test]
    fn test_address_latch_never_overwritten() {
        let mut addr = SourceAddr::default();
        addr.on_request(&Observation::new(id(), from_timeval(1, 0), b""));

        let other = ConnectionId::new(
            "192.168.9.9:1".parse().unwrap(),
            "10.0.0.2:443".parse().unwrap(),
        );
        for _ in 0..3 {
            addr.on_request(&Observation::new(other, from_timeval(2, 0), b""));
        }
        assert_eq!(rendered(&addr), "10.0.0.1");
    }

    #[test]
    fn test_ipv6_rendering() {
        let v6 = ConnectionId::new(
            "[2001:db8::1]:5000".parse().unwrap(),
            "[2001:db8::2]:80".parse().unwrap(),
        );
        let mut addr = SourceAddr::default();
        addr.on_request(&Observation::new(v6, from_timeval(0, 0), b""));
        assert_eq!(rendered(&addr), "2001:db8::1");
    }

    #[test]
    fn test_close_originator_client() {
        let mut field = CloseOriginator::default();
        field.on_request(&Observation::new(id(), from_timeval(1, 0), b"GET"));
        field.on_response(&Observation::new(id(), from_timeval(2, 0), b"200"));
        let packet = ipv4_packet([10, 0, 0, 1]);
        field.on_close(&Observation::new(id(), from_timeval(3, 0), &packet));
        assert_eq!(rendered(&field), "10.0.0.1");
    }

    #[test]
    fn test_close_originator_server() {
        let mut field = CloseOriginator::default();
        field.on_request(&Observation::new(id(), from_timeval(1, 0), b"GET"));
        field.on_response(&Observation::new(id(), from_timeval(2, 0), b"200"));
        let packet = ipv4_packet([10, 0, 0, 2]);
        field.on_close(&Observation::new(id(), from_timeval(3, 0), &packet));
        assert_eq!(rendered(&field), "10.0.0.2");
    }

    #[test]
    fn test_close_originator_unmatched_or_unparsable() {
        let mut field = CloseOriginator::default();
        field.on_request(&Observation::new(id(), from_timeval(1, 0), b"GET"));
        let packet = ipv4_packet([172, 16, 0, 1]);
        field.on_close(&Observation::new(id(), from_timeval(3, 0), &packet));
        assert_eq!(rendered(&field), "unknown");

        field.on_close(&Observation::new(id(), from_timeval(3, 0), b""));
        assert_eq!(rendered(&field), "unknown");
    }

    #[test]
    fn test_close_originator_needs_observed_address() {
        let mut field = CloseOriginator::default();
        let packet = ipv4_packet([10, 0, 0, 2]);
        field.on_close(&Observation::new(id(), from_timeval(3, 0), &packet));
        assert_eq!(rendered(&field), "unknown");
    }
}
