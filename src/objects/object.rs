use std::mem::size_of;

use crate::objects::object_closure::ObjClosure;
use crate::objects::object_function::ObjFunction;
use crate::objects::object_native_function::ObjNative;
use crate::objects::object_string::ObjString;
use crate::objects::object_upvalue::ObjUpvalue;

/// Stable handle to an object slot in the VM heap. Handles stay valid for as
/// long as the object is reachable; the collector recycles the slot after the
/// object becomes garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef(pub(crate) u32);

impl ObjRef {
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of heap object variants. Every consumer (marking, sweeping,
/// printing, calling) matches exhaustively on this.
pub enum Obj {
    String(ObjString),
    Function(ObjFunction),
    Native(ObjNative),
    Closure(ObjClosure),
    Upvalue(ObjUpvalue),
}

impl Obj {
    #[inline(always)]
    pub fn is_string(&self) -> bool {
        matches!(self, Obj::String(_))
    }

    /// Approximate footprint of this object, counting the owned side
    /// allocations behind the variant. Drives the collector's trigger
    /// heuristic; it does not need to be byte-exact.
    pub fn size_estimate(&self) -> usize {
        let payload = match self {
            Obj::String(string) => string.chars.capacity(),
            Obj::Function(function) => {
                function.name.capacity() + function.chunk.size_estimate()
            }
            Obj::Native(_) => 0,
            Obj::Closure(closure) => closure.upvalues.capacity() * size_of::<ObjRef>(),
            Obj::Upvalue(_) => 0,
        };
        size_of::<Obj>() + payload
    }
}
