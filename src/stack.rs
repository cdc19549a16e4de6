use tinyvec::ArrayVec;

use crate::{definitions::cpu, StackError};

/// The stack is only used to store return addresses when subroutines are called. The original
/// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
/// `12` levels of nesting; modern implementations usually have more.
/// (here we are using `16`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    entries: ArrayVec<[u16; cpu::stack::SIZE]>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Will push the address onto the stack
    pub fn push(&mut self, address: u16) -> Result<(), StackError> {
        // try_push hands the value back if there is no room left
        match self.entries.try_push(address) {
            None => Ok(()),
            Some(_) => Err(StackError::Overflow(self.entries.len())),
        }
    }

    /// Will pop the last pushed address from the stack
    pub fn pop(&mut self) -> Result<u16, StackError> {
        self.entries.pop().ok_or(StackError::Underflow)
    }

    /// The stack pointer, this is the amount of addresses on the stack
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored addresses, the last entry is the top of the stack
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }
}
