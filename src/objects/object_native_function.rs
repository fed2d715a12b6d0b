use crate::value::Value;

/// A native function receives the argument window of the call and returns the
/// single value that replaces it on the stack.
pub type NativeFn = fn(args: &[Value]) -> Value;

/// A host-provided callable installed into the globals table.
pub struct ObjNative {
    pub function: NativeFn,
}

impl ObjNative {
    pub fn new(function: NativeFn) -> ObjNative {
        ObjNative { function }
    }
}
