//! Runtime for a small dynamically-typed scripting language: a stack-based
//! bytecode virtual machine with a stop-the-world mark-sweep garbage
//! collector.
//!
//! This crate is the execution back end only. A front end compiles source
//! text into an [`ObjFunction`] — bytecode chunk, source-line table, constant
//! pool, arity, and upvalue capture descriptors — and hands it to
//! [`Vm::interpret`]. The VM owns all runtime state: the value stack, the
//! call-frame stack, the heap arena, the string intern pool, and the globals
//! table. Dropping the [`Vm`] releases everything.
//!
//! The VM performs no bytecode validation; the front end guarantees
//! structural validity (known opcodes, in-range jump targets, in-range
//! constant, local, and upvalue indices). While a front end still holds heap
//! references that are not yet reachable from the VM (constants of a chunk
//! under construction), it declares them with [`Vm::push_root`] so a
//! collection cannot reclaim them.
//!
//! ```
//! use cinder::{InterpretResult, ObjFunction, OpCode, Value, Vm};
//!
//! let mut script = ObjFunction::script();
//! let one = script.chunk.add_constant(Value::Number(1.0)) as u8;
//! let two = script.chunk.add_constant(Value::Number(2.0)) as u8;
//! script.chunk.write_op(OpCode::Constant, 1);
//! script.chunk.write(one, 1);
//! script.chunk.write_op(OpCode::Constant, 1);
//! script.chunk.write(two, 1);
//! script.chunk.write_op(OpCode::Add, 1);
//! script.chunk.write_op(OpCode::Print, 1);
//! script.chunk.write_op(OpCode::Nil, 1);
//! script.chunk.write_op(OpCode::Return, 1);
//!
//! let mut vm = Vm::new();
//! assert_eq!(vm.interpret(script), InterpretResult::Ok);
//! ```

pub mod call_frame;
pub mod chunk;
pub mod debug;
pub mod gc;
pub mod natives;
pub mod objects;
pub mod table;
pub mod value;
pub mod vm;

pub use chunk::{Chunk, OpCode};
pub use objects::object::{Obj, ObjRef};
pub use objects::object_function::ObjFunction;
pub use objects::object_native_function::NativeFn;
pub use value::Value;
pub use vm::{InterpretResult, RuntimeError, Vm};
