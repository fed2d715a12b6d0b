use crate::objects::object::ObjRef;

/// A function paired with the captured-variable cells it closes over. The
/// upvalue list is filled in by the closure-creation instruction, one entry
/// per capture descriptor declared by the function.
pub struct ObjClosure {
    pub function: ObjRef,
    pub upvalues: Vec<ObjRef>,
}

impl ObjClosure {
    pub fn new(function: ObjRef) -> ObjClosure {
        ObjClosure {
            function,
            upvalues: Vec::new(),
        }
    }
}
