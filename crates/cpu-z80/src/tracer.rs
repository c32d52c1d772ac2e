use crate::registers::Registers;
use crate::table::Instruction;

/// Observation hooks around each executed instruction.
///
/// `before` runs after the fetch, with the registers still in their
/// pre-execution state; `after` runs once the instruction has completed
/// and PC points at the next one. `data` is the raw operand block as
/// fetched from memory.
pub trait Tracer {
    fn before(&mut self, instruction: &Instruction, data: &[u8], regs: &Registers);

    fn after(&mut self, instruction: &Instruction, data: &[u8], regs: &Registers);
}
