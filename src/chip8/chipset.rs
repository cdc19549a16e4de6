use std::{thread, time::Instant};

use crate::{
    definitions::memory as mem,
    devices::{DisplayCommands, FrameBuffer, SoundCommands},
    input::Input,
    memory::Memory,
    opcode::{ChipOpcodes, Instruction, Operation, ProgramCounter, ProgramCounterStep},
    random::{RandomSource, RngSource},
    registers::Registers,
    stack::Stack,
    timer::Timers,
    Config, MemoryError, ProcessError, StopReason,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instance of the
/// Chip8 CPU.
///
/// Only the timers and the input are shared with other threads, everything
/// else is owned and mutated by the chipset alone.
pub struct ChipSet {
    pub(super) registers: Registers,
    pub(super) memory: Memory,
    pub(super) stack: Stack,
    /// The current content of the screen, it is replaced by a fresh one on a clear.
    pub(super) frame: FrameBuffer,
    /// Delay and sound timer, counted down at 60 hertz by the runner.
    pub(super) timers: Timers,
    /// The keyboard state and the stop request.
    pub(super) input: Input,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RandomSource>,
    /// Gets the frame after every change.
    pub(super) display: Box<dyn DisplayCommands>,
}

impl ChipSet {
    /// will create a new chipset object with empty memory (fonts excluded)
    pub fn new<D>(display: D) -> Self
    where
        D: DisplayCommands + 'static,
    {
        Self::with_parts(display, Registers::new(), Memory::new(), Stack::new())
    }

    /// will create a new chipset object from the given parts
    pub fn with_parts<D>(display: D, registers: Registers, memory: Memory, stack: Stack) -> Self
    where
        D: DisplayCommands + 'static,
    {
        Self {
            registers,
            memory,
            stack,
            frame: FrameBuffer::new(),
            timers: Timers::default(),
            input: Input::new(),
            rng: Box::new(RngSource::default()),
            display: Box::new(display),
        }
    }

    /// Will replace the random number generator
    pub fn with_random<R>(mut self, rng: R) -> Self
    where
        R: RandomSource + 'static,
    {
        self.rng = Box::new(rng);
        self
    }

    /// Will set the receiver of the tone start and stop events
    pub fn with_sound<S>(self, sound: S) -> Self
    where
        S: SoundCommands + 'static,
    {
        self.timers.set_sound_commands(sound);
        self
    }

    /// Will write the program into memory
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MemoryError> {
        self.memory.load_program(program)
    }

    /// will advance the program by a single step
    pub fn next(&mut self) -> Result<Operation, ProcessError> {
        let pc = self.registers.program_counter();
        let instruction = Instruction::new(self.memory.fetch(pc)?);
        log::trace!("{:#06X}: {}", pc, instruction);

        let operation = self.calc(instruction)?;

        if matches!(operation, Operation::Draw) {
            /* draw the screen */
            self.display.display(&self.frame);
        }
        Ok(operation)
    }

    /// Will run the program until it stops, either because a stop was requested,
    /// the program counter left the memory or an opcode failed.
    ///
    /// This blocks the current thread, a pending key press wait included.
    pub fn run(&mut self, config: &Config) -> StopReason {
        loop {
            if self.input.is_stop_requested() {
                return StopReason::Requested;
            }

            let pc = self.registers.program_counter();
            // a full opcode has to fit
            if pc + 1 >= mem::SIZE {
                log::info!("program counter {:#06X} left the memory", pc);
                return StopReason::ProgramCounterOutOfRange { pc };
            }

            let start = Instant::now();
            match self.next() {
                Ok(Operation::AwaitKey(register)) => {
                    log::debug!("waiting for a key press");
                    match self.input.wait_for_key() {
                        Some(key) => {
                            log::debug!("got key {:#X}", key);
                            self.registers.set(register, key);
                        }
                        None => return StopReason::Requested,
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    log::error!("stopping at {:#06X}: {}", pc, err);
                    return StopReason::Fault(err);
                }
            }

            if let Some(interval) = config.cpu_interval {
                // make sure there the system will at most wait the interval
                thread::sleep(interval.saturating_sub(start.elapsed()));
            }
        }
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Will return the current display configuration
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    /// will return the sound timer
    pub fn sound_timer(&self) -> u8 {
        self.timers.sound()
    }

    /// will return the delay timer
    pub fn delay_timer(&self) -> u8 {
        self.timers.delay()
    }
}

impl ProgramCounter for ChipSet {
    fn step(&mut self, step: ProgramCounterStep) {
        let pc = step.apply(self.registers.program_counter());
        self.registers.set_program_counter(pc);
    }
}
