use crate::event::{ConnectionId, EventKind, Observation, Timestamp};
use crate::field::{render_fields, Field, FieldHandler};
use crate::flow::FlowState;
use crate::format::FormatProgram;
use crate::record::Record;

/// Runtime state of one connection.
///
/// Holds exactly one field per entry of the format program it was created
/// from, in program order.
#[derive(Debug, Clone)]
pub struct Flow {
    id: ConnectionId,
    fields: Vec<Field>,
    state: FlowState,
}

impl Flow {
    pub fn new(id: ConnectionId, program: &FormatProgram) -> Self {
        Self {
            id,
            fields: program.instantiate(),
            state: FlowState::Unknown,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Forward one event to every field in order and move the state tag.
    pub fn observe(&mut self, kind: EventKind, obs: &Observation<'_>) {
        for field in &mut self.fields {
            match kind {
                EventKind::Opening => field.on_opening(obs),
                EventKind::Open => field.on_open(obs),
                EventKind::Request => field.on_request(obs),
                EventKind::Response => field.on_response(obs),
                EventKind::Close => field.on_close(obs),
            }
        }
        self.state = kind.into();
    }

    /// Unsanitized record of the current field values.
    pub fn render(&self, at: Timestamp) -> Record {
        render_fields(&self.fields, at)
    }
}
