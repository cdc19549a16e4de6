//! Opcode abstractions, functionality and constants.
use std::fmt;

use crate::{definitions::memory, OpcodeError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a single byte
const BYTE_SIZE: u16 = 0x8;

/// the size of a single nibble
const NIBBLE_SIZE: u16 = BYTE_SIZE / 2;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = OpcodeError::MemoryInvalid { pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(Err(err), build_opcode(&SPLIT_OPCODE, pointer));
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    // controlling that there is no illegal access here
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// A decoded opcode.
///
/// All the fields are computed from the raw word on access, so two instructions built from the
/// same word always decode the same way.
///
/// ```rust
/// # use chip::opcode::Instruction;
/// let instruction = Instruction::new(0xD123);
/// assert_eq!(instruction.family(), 0xD);
/// assert_eq!(instruction.x(), 0x1);
/// assert_eq!(instruction.y(), 0x2);
/// assert_eq!(instruction.n(), 0x3);
/// assert_eq!(instruction.kk(), 0x23);
/// assert_eq!(instruction.nnn(), 0x123);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Instruction(Opcode);

impl Instruction {
    pub const fn new(opcode: Opcode) -> Self {
        Self(opcode)
    }

    /// The raw opcode
    pub const fn opcode(&self) -> Opcode {
        self.0
    }

    /// the opcode group `T` of the opcode type `TNNN`
    pub const fn family(&self) -> u8 {
        ((self.0 & OPCODE_MASK_F000) >> (3 * NIBBLE_SIZE)) as u8
    }

    /// the register index `X` of the opcode type `TXNN`
    pub const fn x(&self) -> usize {
        ((self.0 & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> BYTE_SIZE) as usize
    }

    /// the register index `Y` of the opcode type `TXYN`
    pub const fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self.0 & MASK) >> NIBBLE_SIZE) as usize
    }

    /// the constant `NN` of the opcode type `TXNN`
    pub const fn kk(&self) -> u8 {
        (self.0 & OPCODE_MASK_00FF) as u8
    }

    /// the constant `N` of the opcode type `TXYN`
    pub const fn n(&self) -> u8 {
        (self.0 & OPCODE_MASK_000F) as u8
    }

    /// the address `NNN` of the opcode type `TNNN`
    pub const fn nnn(&self) -> usize {
        (self.0 & OPCODE_MASK_0FFF) as usize
    }

    /// this is an opcode extractor for the opcode type `TXNN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `NN` is a constant
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// assert_eq!(Instruction::new(0x1EDA).xkk(), (0xE, 0xDA));
    /// ```
    pub const fn xkk(&self) -> (usize, u8) {
        (self.x(), self.kk())
    }

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    /// - `N` is a constant or an opcode subtype
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// assert_eq!(Instruction::new(0x1EDA).xyn(), (0xE, 0xD, 0xA));
    /// ```
    pub const fn xyn(&self) -> (usize, usize, u8) {
        (self.x(), self.y(), self.n())
    }
}

impl From<Opcode> for Instruction {
    fn from(opcode: Opcode) -> Self {
        Self::new(opcode)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

impl fmt::UpperHex for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will move the program counter to the next opcode
    Next,
    /// Will skip the next opcode
    Skip,
    /// Will simply move the program counter to the given location.
    ///
    /// There is no bounds check here, a location outside of the memory
    /// will stop the execution on the next fetch.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Will apply the step to the given program counter.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next.apply(0x200), 0x202);
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x200), 0x204);
    /// assert_eq!(ProgramCounterStep::Jump(0x123).apply(0x200), 0x123);
    /// ```
    #[inline]
    pub fn apply(&self, program_counter: usize) -> usize {
        match *self {
            ProgramCounterStep::Next => program_counter + memory::opcodes::SIZE,
            ProgramCounterStep::Skip => program_counter + 2 * memory::opcodes::SIZE,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the caller.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The display has changed and has to be redrawn.
    Draw,
    /// The execution has to wait for the next key press, the key
    /// then has to be stored into the given register.
    AwaitKey(usize),
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// the program counter is moved after every opcode.
///
/// Unknown encodings inside of a known opcode group are not an error, they are ignored and the
/// program counter simply moves on.
pub trait ChipOpcodes: ProgramCounter {
    /// will calculate the programs step by a single step
    fn calc(&mut self, instruction: Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let mut step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match instruction.family() {
            0x0 => self.zero(instruction).map(&mut step_op),
            0x1 => self.one(instruction),
            0x2 => self.two(instruction),
            0x3 => self.three(instruction),
            0x4 => self.four(instruction),
            0x5 => self.five(instruction),
            0x6 => self.six(instruction),
            0x7 => self.seven(instruction),
            0x8 => self.eight(instruction),
            0x9 => self.nine(instruction),
            0xA => self.a(instruction),
            0xB => self.b(instruction),
            0xC => self.c(instruction),
            0xD => self.d(instruction).map(&mut step_op),
            0xE => self.e(instruction),
            0xF => self.f(instruction).map(&mut step_op),
            _ => Err(OpcodeError::InvalidOpcode(instruction.opcode()).into()),
        }?;

        self.step(step);
        Ok(operation)
    }

    /// A multiuse opcode base for type `0NNN`
    ///
    /// - `0NNN` - Call     -                       - Calls machine code routine at address `NNN`. (ignored)
    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn zero(
        &mut self,
        instruction: Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn one(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn two(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn three(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn four(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn five(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn six(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn seven(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYT` (T is a sub obcode)
    ///
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `1` when `VX > VY`, and to `0` otherwise.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `1` when `VY > VX`, and to `0` otherwise.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn eight(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn nine(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn a(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn b(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte and `NN`.
    fn c(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen.
    fn d(
        &mut self,
        instruction: Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// A multiuse opcode base for type `EXTT` (T is a sub opcode)
    ///
    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn e(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// A multiuse opcode base for type `FXTT` (T is a sub opcode)
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`. (Blocking Operation. All instruction halted until next key event)
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the sprite for the character in `VX`.
    /// - `FX33` - BCD      - `246 / 100 => 2` `246 / 10 => 24 % 10 => 4` `246 % 10 => 6` - Stores the binary-coded decimal representation of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`, `I` ends up behind the last written byte.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) from memory starting at address `I`, `I` ends up behind the last read byte.
    fn f(
        &mut self,
        instruction: Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}
