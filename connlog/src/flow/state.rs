use crate::event::EventKind;
use strum_macros::{Display, EnumString, VariantNames};

/// Latest lifecycle event seen by a flow.
///
/// The tag follows events as they arrive; it is never used to reject one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum FlowState {
    #[default]
    Unknown,
    Opening,
    Open,
    Request,
    Response,
    Close,
}

impl From<EventKind> for FlowState {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Opening => FlowState::Opening,
            EventKind::Open => FlowState::Open,
            EventKind::Request => FlowState::Request,
            EventKind::Response => FlowState::Response,
            EventKind::Close => FlowState::Close,
        }
    }
}
