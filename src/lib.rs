//! A chip8 virtual machine backend.
//!
//! The [`chip8::ChipSet`] holds the whole machine state and executes the opcodes, the
//! [`Chip8`] runner drives it on its own thread together with the 60Hz timers. Everything
//! that is not part of the machine itself (drawing, sound, key mapping, loading the rom from
//! somewhere) is left to the caller and plugged in through the traits in [`devices`].
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod input;
pub mod memory;
pub mod opcode;
pub mod random;
pub mod registers;
pub mod stack;
pub mod timer;
mod error;

mod runner;

// reexporting for convenience
pub use error::*;
pub use runner::*;
