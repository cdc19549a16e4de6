use thiserror::Error;

use crate::opcode::Opcode;

/// Everything that can go wrong while a single opcode is processed.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack overflow, there are already {0} nested calls!")]
    Overflow(usize),
    #[error("Stack underflow, there is no address to return to!")]
    Underflow,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MemoryError {
    #[error("The program is {len} bytes long, but at most {max} bytes fit into memory.")]
    OversizedProgram { len: usize, max: usize },
    #[error("Memory address {address:#06X} is out of bounds, memory is {len} bytes long.")]
    OutOfBounds { address: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputError {
    #[error("There is no key {0:#X}, only the keys 0x0 to 0xF exist.")]
    InvalidKey(u8),
}
