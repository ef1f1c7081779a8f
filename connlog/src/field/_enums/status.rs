use strum_macros::{Display, EnumString, VariantNames};

/// Where a connection was in its life when it was logged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    /// Nothing identifying was observed.
    #[default]
    Unknown,
    /// The handshake was seen and no payload has followed yet.
    Start,
    /// Payload was exchanged on this connection.
    #[strum(serialize = "continue")]
    Continuing,
    /// Closed after payload was exchanged.
    Last,
    /// Opened and closed without any payload.
    Unique,
}
