//! The full implementation of the chip8 emulator, from the machine state to the opcodes.
mod chipset;
mod opcodes;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
