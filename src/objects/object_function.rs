use crate::chunk::Chunk;

/// A compiled function: its bytecode chunk, declared parameter count, and the
/// number of variables it captures from enclosing scopes. The top-level
/// script is a function with an empty name.
pub struct ObjFunction {
    pub arity: u8,
    pub upvalue_count: usize,
    pub chunk: Chunk,
    pub name: String,
}

impl ObjFunction {
    pub fn new(arity: u8, name: String) -> ObjFunction {
        ObjFunction {
            arity,
            upvalue_count: 0,
            chunk: Chunk::new(),
            name,
        }
    }

    /// The top-level script function.
    pub fn script() -> ObjFunction {
        ObjFunction::new(0, String::new())
    }
}
