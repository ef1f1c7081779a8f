use crate::event::{ConnectionId, EventKind, Observation};
use crate::flow::{Flow, FlowState};
use crate::format::FormatProgram;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Live flows keyed by connection identity.
///
/// A flow is created by the first event seen for its identity and removed by
/// its close event, which hands it back to the caller for rendering.
#[derive(Debug)]
pub struct FlowTable {
    program: Arc<FormatProgram>,
    flows: HashMap<ConnectionId, Flow>,
}

impl FlowTable {
    pub fn new(program: Arc<FormatProgram>) -> Self {
        Self {
            program,
            flows: HashMap::new(),
        }
    }

    /// Route one event to the flow of `obs.id`, creating it if needed.
    ///
    /// Returns the evicted flow for close events and `None` otherwise.
    pub fn dispatch(&mut self, kind: EventKind, obs: &Observation<'_>) -> Option<Flow> {
        let program = &self.program;
        let flow = self.flows.entry(obs.id).or_insert_with(|| {
            debug!("new flow {}", obs.id);
            Flow::new(obs.id, program)
        });
        flow.observe(kind, obs);

        if kind == EventKind::Close {
            let closed = self.flows.remove(&obs.id);
            debug!("evicted flow {}, {} still open", obs.id, self.flows.len());
            closed
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.flows.contains_key(id)
    }

    pub fn state(&self, id: &ConnectionId) -> Option<FlowState> {
        self.flows.get(id).map(Flow::state)
    }

    /// Remove and return every flow that never saw a close.
    pub fn drain(&mut self) -> Vec<Flow> {
        self.flows.drain().map(|(_, flow)| flow).collect()
    }
}
