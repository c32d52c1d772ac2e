//! The decode-execute engine.

use machine_core::{InterruptLine, Memory, PortBus};

use crate::error::StepError;
use crate::ops::{self, Input, Outcome};
use crate::registers::{InterruptMode, Registers};
use crate::table::{Class, Instruction, InstructionTable};
use crate::tracer::Tracer;

/// What one `step` call executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub cycles: u32,
    pub mnemonic: &'static str,
}

/// A Z80 core. The memory, port bus and interrupt lines are borrowed
/// per step, so one bus implementation can serve several chips.
pub struct Z80 {
    regs: Registers,
    table: InstructionTable,
    tracer: Option<Box<dyn Tracer>>,
    instructions_executed: u64,
    cycles_elapsed: u64,
}

impl Z80 {
    #[must_use]
    pub fn new() -> Self {
        let mut regs = Registers::default();
        regs.reset(0x0000);

        Self {
            regs,
            table: InstructionTable::new(),
            tracer: None,
            instructions_executed: 0,
            cycles_elapsed: 0,
        }
    }

    /// Architectural reset, entering execution at `pc`. Counters and
    /// any installed tracer survive.
    pub fn reset(&mut self, pc: u16) {
        log::debug!("reset, pc={pc:04X}");
        self.regs.reset(pc);
    }

    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.regs
    }

    pub const fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer>) {
        self.tracer = Some(tracer);
    }

    pub fn take_tracer(&mut self) -> Option<Box<dyn Tracer>> {
        self.tracer.take()
    }

    /// Instructions retired since power-on. Prefix fetches count as
    /// part of their instruction, not separately.
    #[must_use]
    pub const fn instructions_executed(&self) -> u64 {
        self.instructions_executed
    }

    /// Clock cycles elapsed since power-on.
    #[must_use]
    pub const fn cycles_elapsed(&self) -> u64 {
        self.cycles_elapsed
    }

    /// Execute one instruction (or one prefix fetch, or one halted
    /// cycle) and return its cost.
    ///
    /// # Errors
    ///
    /// [`StepError::UnimplementedOpcode`] if the fetched encoding has no
    /// table entry. The machine should be considered stopped.
    pub fn step(
        &mut self,
        mem: &mut dyn Memory,
        ports: &mut dyn PortBus,
        interrupts: &mut InterruptLine,
    ) -> Result<Step, StepError> {
        if self.regs.halted {
            return Ok(self.halted_step(mem, ports, interrupts));
        }

        let pc = self.regs.pc;
        let prefix = self.regs.opcode_prefix;
        self.regs.opcode_prefix = 0;

        let mut buf = [0u8; 3];
        let instruction = if prefix > 0xFF {
            // Two-byte prefix already consumed: PC sits on the
            // displacement, with the deciding opcode after it.
            mem.read_block(pc, &mut buf[..2]);
            let index = prefix << 8 | u32::from(buf[1]);
            *self
                .table
                .lookup(index)
                .ok_or(StepError::UnimplementedOpcode { index })?
        } else {
            let index = prefix << 8 | u32::from(mem.read(pc));
            let instruction = *self
                .table
                .lookup(index)
                .ok_or(StepError::UnimplementedOpcode { index })?;
            mem.read_block(pc, &mut buf[..usize::from(instruction.length)]);
            instruction
        };
        let data = &buf[..usize::from(instruction.length)];

        if let Some(tracer) = self.tracer.as_deref_mut() {
            tracer.before(&instruction, data, &self.regs);
        }

        // R increments once per M1 cycle; the prefix descriptors skip
        // it here and their instruction accounts for both fetches.
        if instruction.class != Class::Prefix {
            self.regs.inc_r(if instruction.opcode > 0xFF { 2 } else { 1 });
        }

        let mut input = Input {
            opcode: instruction.opcode,
            data,
            regs: &mut self.regs,
            mem,
            ports,
        };
        let outcome = (instruction.action)(&mut input);

        let cycles = match outcome {
            Outcome::Advance(extra) => {
                self.regs.pc =
                    self.regs.pc.wrapping_add(u16::from(instruction.length));
                instruction.cycles + extra
            }
            Outcome::Jumped(extra) => instruction.cycles + extra,
        };

        self.instructions_executed += 1;
        self.cycles_elapsed += u64::from(cycles);

        if instruction.class != Class::Prefix && self.regs.opcode_prefix == 0 {
            self.handle_interrupts(mem, interrupts);
        }

        if instruction.class != Class::EnableInterrupts
            && instruction.class != Class::Prefix
        {
            self.regs.skip_interrupt = false;
        }

        if let Some(tracer) = self.tracer.as_deref_mut() {
            tracer.after(&instruction, data, &self.regs);
        }

        Ok(Step {
            cycles,
            mnemonic: instruction.mnemonic,
        })
    }

    /// A halted processor fetches NOPs until an interrupt wakes it.
    fn halted_step(
        &mut self,
        mem: &mut dyn Memory,
        ports: &mut dyn PortBus,
        interrupts: &mut InterruptLine,
    ) -> Step {
        self.handle_interrupts(mem, interrupts);
        self.regs.inc_r(1);

        let data = [0u8];
        let mut input = Input {
            opcode: 0,
            data: &data,
            regs: &mut self.regs,
            mem,
            ports,
        };
        let _ = ops::nop(&mut input);

        self.instructions_executed += 1;
        self.cycles_elapsed += 4;

        Step {
            cycles: 4,
            mnemonic: "NOP",
        }
    }

    fn handle_interrupts(&mut self, mem: &mut dyn Memory, interrupts: &mut InterruptLine) {
        // Post-EI holdoff: ignore exactly one sample, so the
        // instruction after EI always runs before a handler is entered.
        if self.regs.skip_interrupt {
            self.regs.skip_interrupt = false;
            return;
        }

        if interrupts.nmi {
            interrupts.nmi = false;
            log::trace!("nmi taken, pc={:04X}", self.regs.pc);
            self.regs.halted = false;
            self.push_pc(mem);
            self.regs.iff2 = self.regs.iff1;
            self.regs.iff1 = false;
            self.regs.pc = 0x0066;
            self.regs.wz = 0x0066;
        }

        if interrupts.int && self.regs.iff1 {
            interrupts.int = false;
            log::trace!(
                "int taken, pc={:04X} mode={:?}",
                self.regs.pc,
                self.regs.im
            );
            self.regs.halted = false;
            self.regs.iff1 = false;
            self.regs.iff2 = false;
            let data = interrupts.data.take();

            match self.regs.im {
                InterruptMode::Mode0 => self.mode0_dispatch(mem, data),
                InterruptMode::Mode1 => {
                    self.push_pc(mem);
                    self.regs.pc = 0x0038;
                    self.regs.wz = 0x0038;
                }
                InterruptMode::Mode2 => {
                    self.push_pc(mem);
                    let vector = u16::from(self.regs.i) << 8
                        | u16::from(data.unwrap_or(0xFF));
                    let lo = mem.read(vector);
                    let hi = mem.read(vector.wrapping_add(1));
                    self.regs.pc = u16::from(hi) << 8 | u16::from(lo);
                    self.regs.wz = self.regs.pc;
                }
            }
        }
    }

    /// Mode 0 executes the opcode supplied on the bus. RST and CALL are
    /// the encodings interrupting hardware actually supplies; anything
    /// else is ignored.
    fn mode0_dispatch(&mut self, mem: &mut dyn Memory, data: Option<u8>) {
        let Some(opcode) = data else { return };
        let Some(class) = self.table.lookup(u32::from(opcode)).map(|i| i.class) else {
            return;
        };

        match class {
            Class::Restart => {
                self.push_pc(mem);
                self.regs.pc = u16::from(opcode & 0x38);
                self.regs.wz = self.regs.pc;
            }
            Class::Call => {
                let lo = mem.read(self.regs.pc.wrapping_add(1));
                let hi = mem.read(self.regs.pc.wrapping_add(2));
                self.push_pc(mem);
                self.regs.pc = u16::from(hi) << 8 | u16::from(lo);
                self.regs.wz = self.regs.pc;
            }
            _ => {}
        }
    }

    fn push_pc(&mut self, mem: &mut dyn Memory) {
        let pc = self.regs.pc;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        mem.write(self.regs.sp, (pc >> 8) as u8);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        mem.write(self.regs.sp, pc as u8);
    }

    /// Direct table access, mainly for disassembly-style tooling built
    /// on top of the core.
    #[must_use]
    pub fn instruction(&self, index: u32) -> Option<&Instruction> {
        self.table.lookup(index)
    }
}

impl Default for Z80 {
    fn default() -> Self {
        Self::new()
    }
}
