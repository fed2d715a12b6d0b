use crate::value::Value;

/// A captured-variable cell. While the originating stack slot is live the
/// cell is `Open` and reads go through the slot; closing copies the value
/// into the cell itself, which then owns it.
#[derive(Clone, Copy)]
pub enum ObjUpvalue {
    Open(usize),
    Closed(Value),
}

impl ObjUpvalue {
    /// Transition from `Open` to `Closed`, taking ownership of the value that
    /// was living in the stack slot.
    pub fn close(&mut self, value: Value) {
        *self = ObjUpvalue::Closed(value);
    }
}
