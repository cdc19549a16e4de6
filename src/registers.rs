//! The register file of the chip.
use crate::definitions::cpu;

/// `8-bit` data registers named `V0` to `VF`, the `16-bit` index register `I` and the program
/// counter.
///
/// The `VF` register doubles as a flag for some instructions. In an addition operation `VF` is
/// the carry flag, while in subtraction, it is the "no borrow" flag. In the draw instruction `VF`
/// is set upon pixel collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    general: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    index: u16,
    /// The program counter is a CPU register in the computer processor which has the address of
    /// the next instruction to be executed from memory.
    program_counter: usize,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            general: [0; cpu::register::SIZE],
            index: 0,
            program_counter: cpu::PROGRAM_COUNTER,
        }
    }
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Will return the value of the register `V{index}`.
    ///
    /// # Panics
    /// If the index is not in `0..16`.
    pub fn get(&self, index: usize) -> u8 {
        Self::check(index);
        self.general[index]
    }

    /// Will set the value of the register `V{index}`.
    ///
    /// # Panics
    /// If the index is not in `0..16`.
    pub fn set(&mut self, index: usize, value: u8) {
        Self::check(index);
        self.general[index] = value;
    }

    /// Will return the flag register `VF`
    pub fn flag(&self) -> u8 {
        self.general[cpu::register::LAST]
    }

    /// Will set the flag register `VF` to `1` if the condition holds, otherwise to `0`.
    pub fn set_flag(&mut self, cond: bool) {
        self.general[cpu::register::LAST] = cond as u8;
    }

    /// All the general purpose registers `V0` to `VF`
    pub fn general(&self) -> &[u8] {
        &self.general
    }

    /// All the general purpose registers `V0` to `VF`
    pub fn general_mut(&mut self) -> &mut [u8] {
        &mut self.general
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn set_index(&mut self, value: u16) {
        self.index = value;
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn set_program_counter(&mut self, value: usize) {
        self.program_counter = value;
    }

    /// Will set everything back to the power on state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    fn check(index: usize) {
        assert!(
            index < cpu::register::SIZE,
            "There is no register V{:X}, only V0 to VF exist.",
            index
        );
    }
}
