use crate::chunk::{Chunk, OpCode};
use crate::objects::heap::Heap;
use crate::value::{format_value, Value};

pub fn disassemble_chunk(heap: &Heap, chunk: &Chunk, name: &str) {
    println!("== {} ==", name);

    let mut offset = 0;
    while offset < chunk.len() {
        offset = disassemble_instruction(heap, chunk, offset);
    }
}

pub fn disassemble_instruction(heap: &Heap, chunk: &Chunk, offset: usize) -> usize {
    print!("{:04} ", offset);
    if offset > 0 && chunk.lines[offset] == chunk.lines[offset - 1] {
        print!("   | ");
    } else {
        print!("{:4} ", chunk.lines[offset]);
    }

    let byte = chunk.code[offset];
    let op = match OpCode::from_byte(byte) {
        Some(op) => op,
        None => {
            println!("unknown opcode {}", byte);
            return offset + 1;
        }
    };

    match op {
        OpCode::Constant | OpCode::GetGlobal | OpCode::DefineGlobal | OpCode::SetGlobal => {
            constant_instruction(op, heap, chunk, offset)
        }
        OpCode::GetLocal
        | OpCode::SetLocal
        | OpCode::GetUpvalue
        | OpCode::SetUpvalue
        | OpCode::Call => byte_instruction(op, chunk, offset),
        OpCode::Jump | OpCode::JumpIfFalse | OpCode::JumpIfTrue => {
            jump_instruction(op, 1, chunk, offset)
        }
        OpCode::Loop => jump_instruction(op, -1, chunk, offset),
        OpCode::Closure => closure_instruction(heap, chunk, offset),
        _ => simple_instruction(op, offset),
    }
}

fn op_name(op: OpCode) -> String {
    format!("OP_{}", op)
}

fn simple_instruction(op: OpCode, offset: usize) -> usize {
    println!("{}", op_name(op));
    offset + 1
}

fn constant_instruction(op: OpCode, heap: &Heap, chunk: &Chunk, offset: usize) -> usize {
    let constant = chunk.code[offset + 1];
    println!(
        "{:<16} {:>4} '{}'",
        op_name(op),
        constant,
        format_value(chunk.constants[constant as usize], heap)
    );
    offset + 2
}

fn byte_instruction(op: OpCode, chunk: &Chunk, offset: usize) -> usize {
    let slot = chunk.code[offset + 1];
    println!("{:<16} {:>4}", op_name(op), slot);
    offset + 2
}

fn jump_instruction(op: OpCode, sign: i64, chunk: &Chunk, offset: usize) -> usize {
    let jump = ((chunk.code[offset + 1] as u16) << 8) | chunk.code[offset + 2] as u16;
    let target = offset as i64 + 3 + sign * jump as i64;
    println!("{:<16} {:>4} -> {}", op_name(op), offset, target);
    offset + 3
}

fn closure_instruction(heap: &Heap, chunk: &Chunk, offset: usize) -> usize {
    let mut offset = offset + 1;
    let constant = chunk.code[offset];
    offset += 1;
    println!(
        "{:<16} {:>4} {}",
        op_name(OpCode::Closure),
        constant,
        format_value(chunk.constants[constant as usize], heap)
    );

    // Each capture descriptor is an (is_local, index) byte pair.
    if let Value::Obj(function) = chunk.constants[constant as usize] {
        let upvalue_count = heap.as_function(function).upvalue_count;
        for _ in 0..upvalue_count {
            let is_local = chunk.code[offset];
            let index = chunk.code[offset + 1];
            println!(
                "{:04}    |                     {} {}",
                offset,
                if is_local != 0 { "local" } else { "upvalue" },
                index
            );
            offset += 2;
        }
    }

    offset
}
