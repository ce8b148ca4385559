pub mod form;
pub mod page;

pub use form::{FieldId, JogForm};
pub use page::JogPage;

use crate::models::{JogDirection, MoveKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsoluteSlot {
    First,
    Second,
}

impl AbsoluteSlot {
    pub fn field(self) -> FieldId {
        match self {
            AbsoluteSlot::First => FieldId::AbsoluteTarget1,
            AbsoluteSlot::Second => FieldId::AbsoluteTarget2,
        }
    }
}

/// Operator actions on the jog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JogEvent {
    AbsoluteMove(AbsoluteSlot),
    RelativeMove(JogDirection),
    JogPressed(JogDirection),
    Stop,
    ApplyParameters,
    SetField(FieldId, String),
    SetRepeat(MoveKind, bool),
}
