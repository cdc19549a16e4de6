//! The ram of the chip.
use std::ops::Range;

use crate::{
    definitions::{cpu, display::fontset, memory},
    opcode::{self, Opcode},
    MemoryError, OpcodeError,
};

/// - `0x000-0x04F` - Used for the built in `4x5` pixel font set (`0-F`)
/// - `0x050-0x1FF` - Chip 8 interpreter (unused)
/// - `0x200-0xFFF` - Program ROM and work RAM
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    ram: Box<[u8; memory::SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        // initialize all the memory with 0
        let mut ram = Box::new([0; memory::SIZE]);

        // load fonts
        ram[fontset::LOCATION..(fontset::LOCATION + fontset::FONTSET.len())]
            .copy_from_slice(&fontset::FONTSET);

        Self { ram }
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.ram.len()).finish()
    }
}

impl Memory {
    /// Will create a zeroed memory with the font set already in place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Will write the program into memory, starting at the program counter start.
    ///
    /// # Example
    /// ```rust
    /// # use chip::memory::Memory;
    /// # use chip::MemoryError;
    /// let mut memory = Memory::new();
    /// assert!(memory.load_program(&[0x00, 0xE0]).is_ok());
    /// assert_eq!(memory.read_byte(0x201), Ok(0xE0));
    ///
    /// let too_large = vec![0; 4096 - 512 + 1];
    /// assert_eq!(
    ///     memory.load_program(&too_large),
    ///     Err(MemoryError::OversizedProgram { len: 3585, max: 3584 })
    /// );
    /// ```
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MemoryError> {
        if program.len() > memory::MAX_PROGRAM_SIZE {
            return Err(MemoryError::OversizedProgram {
                len: program.len(),
                max: memory::MAX_PROGRAM_SIZE,
            });
        }

        // write the rom data into memory
        self.ram[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + program.len())]
            .copy_from_slice(program);
        Ok(())
    }

    pub fn read_byte(&self, address: usize) -> Result<u8, MemoryError> {
        self.ram
            .get(address)
            .copied()
            .ok_or_else(|| self.out_of_bounds(address))
    }

    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let error = self.out_of_bounds(address);
        let cell = self.ram.get_mut(address).ok_or(error)?;
        *cell = value;
        Ok(())
    }

    /// Will return `len` bytes starting at `address`.
    pub fn read_slice(&self, address: usize, len: usize) -> Result<&[u8], MemoryError> {
        let range = self.range(address, len)?;
        Ok(&self.ram[range])
    }

    /// Will copy the data into memory starting at `address`.
    pub fn write_slice(&mut self, address: usize, data: &[u8]) -> Result<(), MemoryError> {
        let range = self.range(address, data.len())?;
        self.ram[range].copy_from_slice(data);
        Ok(())
    }

    /// Will read the big endian opcode at the given pointer.
    pub fn fetch(&self, pointer: usize) -> Result<Opcode, OpcodeError> {
        opcode::build_opcode(&self.ram[..], pointer)
    }

    /// The size of the memory, it is never empty.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.ram.len()
    }

    /// The whole ram
    pub fn as_slice(&self) -> &[u8] {
        &self.ram[..]
    }

    fn range(&self, address: usize, len: usize) -> Result<Range<usize>, MemoryError> {
        let end = address
            .checked_add(len)
            .filter(|end| *end <= self.len())
            // report the first byte that is out of range
            .ok_or_else(|| self.out_of_bounds(address.max(self.len())))?;
        Ok(address..end)
    }

    fn out_of_bounds(&self, address: usize) -> MemoryError {
        MemoryError::OutOfBounds {
            address,
            len: self.len(),
        }
    }
}
