//! Per-connection flows and the table that multiplexes events onto them.

mod connection;
mod state;
mod table;

pub use connection::Flow;
pub use state::FlowState;
pub use table::FlowTable;
