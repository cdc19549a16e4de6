use crate::{
    definitions::{display, memory},
    devices::FrameBuffer,
    opcode::{ChipOpcodes, Instruction, Operation, ProgramCounterStep},
    ProcessError,
};

use super::ChipSet;

/// Unknown encodings inside of a known opcode group are skipped.
fn unsupported(instruction: Instruction) -> ProgramCounterStep {
    log::warn!("ignoring the unsupported opcode {}", instruction);
    ProgramCounterStep::Next
}

impl ChipOpcodes for ChipSet {
    fn zero(
        &mut self,
        instruction: Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match instruction.opcode() {
            0x00E0 => {
                // 00E0
                // clear display
                self.frame = FrameBuffer::new();
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            0x00EE => {
                // 00EE
                // Return from sub routine => pop from stack
                let pc = self.stack.pop()?;
                log::debug!("returning to {:#06X}", pc);
                Ok((ProgramCounterStep::Jump(pc as usize), Operation::None))
            }
            _ => Ok((unsupported(instruction), Operation::None)),
        }
    }

    fn one(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        // Jumps to address NNN.
        Ok(ProgramCounterStep::Jump(instruction.nnn()))
    }

    fn two(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN
        // and stores the location of the opcode after the call on the stack.
        // The program counter is always inside of the memory here, so it fits.
        let next = self.registers.program_counter() + memory::opcodes::SIZE;
        self.stack.push(next as u16)?;
        log::debug!("calling {:#06X}", instruction.nnn());
        Ok(ProgramCounterStep::Jump(instruction.nnn()))
    }

    fn three(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        // Skips the next instruction if VX equals NN.
        let (x, nn) = instruction.xkk();
        Ok(ProgramCounterStep::cond(self.registers.get(x) == nn))
    }

    fn four(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        // Skips the next instruction if VX doesn't equal NN.
        let (x, nn) = instruction.xkk();
        Ok(ProgramCounterStep::cond(self.registers.get(x) != nn))
    }

    fn five(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        // Skips the next instruction if VX equals VY.
        match instruction.xyn() {
            (x, y, 0) => Ok(ProgramCounterStep::cond(
                self.registers.get(x) == self.registers.get(y),
            )),
            _ => Ok(unsupported(instruction)),
        }
    }

    fn six(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        // Sets VX to NN.
        let (x, nn) = instruction.xkk();
        self.registers.set(x, nn);
        Ok(ProgramCounterStep::Next)
    }

    fn seven(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // Adds NN to VX. (Carry flag is not changed)
        let (x, nn) = instruction.xkk();
        // let VX overflow, but ignore carry
        self.registers.set(x, self.registers.get(x).wrapping_add(nn));
        Ok(ProgramCounterStep::Next)
    }

    fn eight(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        let (x, y, n) = instruction.xyn();
        let vx = self.registers.get(x);
        let vy = self.registers.get(y);
        // the flag is written after the result, so that it wins if x is VF
        match n {
            0x0 => {
                // 8XY0
                // Sets VX to the value of VY.
                self.registers.set(x, vy);
            }
            0x1 => {
                // 8XY1
                // Sets VX to VX or VY. (Bitwise OR operation)
                self.registers.set(x, vx | vy);
            }
            0x2 => {
                // 8XY2
                // Sets VX to VX and VY. (Bitwise AND operation)
                self.registers.set(x, vx & vy);
            }
            0x3 => {
                // 8XY3
                // Sets VX to VX xor VY.
                self.registers.set(x, vx ^ vy);
            }
            0x4 => {
                // 8XY4
                // Adds VY to VX. VF is set to 1 when there's a carry, and to 0 when there isn't.
                let (res, carry) = vx.overflowing_add(vy);
                self.registers.set(x, res);
                self.registers.set_flag(carry);
            }
            0x5 => {
                // 8XY5
                // VY is subtracted from VX. VF is set to 1 when VX is bigger then VY.
                self.registers.set(x, vx.wrapping_sub(vy));
                self.registers.set_flag(vx > vy);
            }
            0x6 => {
                // 8XY6
                // Stores the least significant bit of VX in VF and then shifts VX to the right
                // by 1.
                self.registers.set(x, vx >> 1);
                self.registers.set_flag(vx & 1 == 1);
            }
            0x7 => {
                // 8XY7
                // Sets VX to VY minus VX. VF is set to 1 when VY is bigger then VX.
                self.registers.set(x, vy.wrapping_sub(vx));
                self.registers.set_flag(vy > vx);
            }
            0xE => {
                // 8XYE
                // Stores the most significant bit of VX in VF and then shifts VX to the left by 1.
                const SHIFT_SIGNIFICANT: u8 = 7;
                const AND_SIGNIFICANT: u8 = 1 << SHIFT_SIGNIFICANT;
                self.registers.set(x, vx << 1);
                self.registers
                    .set_flag((vx & AND_SIGNIFICANT) >> SHIFT_SIGNIFICANT == 1);
            }
            _ => return Ok(unsupported(instruction)),
        }
        Ok(ProgramCounterStep::Next)
    }

    fn nine(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        // Skips the next instruction if VX doesn't equal VY.
        match instruction.xyn() {
            (x, y, 0) => Ok(ProgramCounterStep::cond(
                self.registers.get(x) != self.registers.get(y),
            )),
            _ => Ok(unsupported(instruction)),
        }
    }

    fn a(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        // Sets I to the address NNN.
        self.registers.set_index(instruction.nnn() as u16);
        Ok(ProgramCounterStep::Next)
    }

    fn b(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // Jumps to the address NNN plus V0.
        let v0 = self.registers.get(0) as usize;
        Ok(ProgramCounterStep::Jump(v0 + instruction.nnn()))
    }

    fn c(&mut self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // Sets VX to the result of a bitwise and operation on a random number (Typically: 0 to 255)
        // and NN.
        let (x, nn) = instruction.xkk();
        self.registers.set(x, self.rng.next_byte() & nn);
        Ok(ProgramCounterStep::Next)
    }

    fn d(
        &mut self,
        instruction: Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // Draws a sprite at coordinate (VX, VY) that has a width of 8 pixels and a height of N
        // pixels. Both the columns and the rows wrap around the screen.
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        const BYTE: usize = 8;

        let (reg_x, reg_y, n) = instruction.xyn();

        let coorx = self.registers.get(reg_x) as usize;
        let coory = self.registers.get(reg_y) as usize;
        let index = self.registers.index() as usize;

        let sprite = self.memory.read_slice(index, n as usize)?;
        let mut collision = false;

        for (i, row) in sprite.iter().enumerate() {
            let y = (coory + i) % display::HEIGHT;

            // the most significant bit is the left most pixel
            for j in 0..BYTE {
                let mask: u8 = 0x80 >> j;
                if row & mask == 0 {
                    continue;
                }

                let x = (coorx + j) % display::WIDTH;
                // a set pixel that is flipped turns off
                collision |= self.frame.toggle(x, y);
            }
        }

        self.registers.set_flag(collision);

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn e(&self, instruction: Instruction) -> Result<ProgramCounterStep, ProcessError> {
        let (x, nn) = instruction.xkk();
        let key = self.registers.get(x);
        let step = match nn {
            0x9E => {
                // EX9E
                // Skips the next instruction if the key stored in VX is pressed.
                ProgramCounterStep::cond(self.input.is_pressed(key))
            }
            0xA1 => {
                // EXA1
                // Skips the next instruction if the key stored in VX isn't pressed.
                ProgramCounterStep::cond(!self.input.is_pressed(key))
            }
            _ => unsupported(instruction),
        };
        Ok(step)
    }

    fn f(
        &mut self,
        instruction: Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let (x, nn) = instruction.xkk();
        let mut op = Operation::None;
        match nn {
            0x07 => {
                // FX07
                // Sets VX to the value of the delay timer.
                self.registers.set(x, self.timers.delay());
            }
            0x0A => {
                // FX0A
                // A key press is awaited, and then stored in VX. (Blocking Operation. All
                // instruction halted until next key event). The waiting is done by the caller.
                op = Operation::AwaitKey(x);
            }
            0x15 => {
                // FX15
                // Sets the delay timer to VX.
                self.timers.set_delay(self.registers.get(x));
            }
            0x18 => {
                // FX18
                // Sets the sound timer to VX.
                self.timers.set_sound(self.registers.get(x));
            }
            0x1E => {
                // FX1E
                // Adds VX to I. VF is not affected.
                let xi = self.registers.get(x) as u16;
                self.registers
                    .set_index(self.registers.index().wrapping_add(xi));
            }
            0x29 => {
                // FX29
                // Sets I to the location of the sprite for the character in VX. Characters 0-F (in
                // hexadecimal) are represented by a 4x5 font.
                let val = self.registers.get(x) as usize;
                if val > 0xF {
                    log::warn!("there is no font sprite for {:#X}", val);
                }
                let location = display::fontset::LOCATION + display::fontset::GLYPH_SIZE * val;
                self.registers.set_index(location as u16);
            }
            0x33 => {
                // FX33
                // Stores the binary-coded decimal representation of VX, with the most significant
                // of three digits at the address in I, the middle digit at I plus 1, and the least
                // significant digit at I plus 2.
                let i = self.registers.index() as usize;
                let r = self.registers.get(x);

                // 246u8 / 100 => 2, 246u8 / 10 => 24 % 10 => 4, 246u8 % 10 => 6
                self.memory.write_slice(i, &[r / 100, r / 10 % 10, r % 10])?;
            }
            0x55 => {
                // FX55
                // Stores V0 to VX (including VX) in memory starting at address I. I ends up
                // right behind the last written value.
                let index = self.registers.index();
                self.memory
                    .write_slice(index as usize, &self.registers.general()[..=x])?;
                self.registers.set_index(index.wrapping_add(x as u16 + 1));
            }
            0x65 => {
                // FX65
                // Fills V0 to VX (including VX) with values from memory starting at address I.
                // I ends up right behind the last read value.
                let index = self.registers.index();
                let data = self.memory.read_slice(index as usize, x + 1)?;
                self.registers.general_mut()[..=x].copy_from_slice(data);
                self.registers.set_index(index.wrapping_add(x as u16 + 1));
            }
            _ => {
                return Ok((unsupported(instruction), op));
            }
        }
        Ok((ProgramCounterStep::Next, op))
    }
}
