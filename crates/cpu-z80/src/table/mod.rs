//! The instruction table.
//!
//! Every executable encoding, documented or not, is a registered
//! [`Instruction`] descriptor keyed by its flattened index: the prefix
//! bytes shifted into the high bits with the final opcode byte in the
//! low eight (`0x00DB` for `IN A, (n)` under no prefix, `0xDD21` for
//! `LD IX, nn`, `0xDDCB06` for the RLC row of `DD CB d 06`). Lookup of
//! an index with no descriptor is how unimplemented encodings surface.
//!
//! Storage is one dense 256-slot bank per opcode space, selected by the
//! prefix bits of the index, so lookup stays a constant-time array read
//! without materialising the full flattened range.

mod base;
mod cb;
mod ed;
mod indexed;
mod indexed_cb;

use std::collections::BTreeMap;

use crate::ops::{Input, Outcome};

pub type Action = fn(&mut Input<'_>) -> Outcome;

/// Execution class, decided once at registration. The engine and the
/// mode-0 interrupt dispatcher branch on this instead of re-parsing
/// mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Normal,
    /// CB/DD/ED/FD (and DD CB / FD CB) prefix fetches.
    Prefix,
    /// EI: keeps the post-EI interrupt holdoff flag alive.
    EnableInterrupts,
    /// RST n: mode-0 interrupt dispatch recognises these on the bus.
    Restart,
    /// CALL and CALL cc: likewise recognised by mode-0 dispatch.
    Call,
}

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub mnemonic: &'static str,
    /// Flattened (prefix, opcode) index.
    pub opcode: u32,
    /// Total encoded bytes from the final opcode byte onwards (the
    /// amount PC auto-advances and the operand block length).
    pub length: u8,
    /// Base clock cycles. Prefixed entries exclude the 4-cycle prefix
    /// fetch, which the engine accounts for on the prefix descriptor.
    pub cycles: u32,
    pub class: Class,
    pub action: Action,
}

type Bank = [Option<Instruction>; 256];

pub struct InstructionTable {
    base: Box<Bank>,
    cb: Box<Bank>,
    dd: Box<Bank>,
    ed: Box<Bank>,
    fd: Box<Bank>,
    ddcb: Box<Bank>,
    fdcb: Box<Bank>,
}

impl InstructionTable {
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Builder::default();

        base::register(&mut builder);
        cb::register(&mut builder);
        ed::register(&mut builder);
        indexed::register(&mut builder, 0xDD00);
        indexed::register(&mut builder, 0xFD00);
        indexed_cb::register(&mut builder, 0x00DD_CB00);
        indexed_cb::register(&mut builder, 0x00FD_CB00);

        builder.build()
    }

    #[must_use]
    pub fn lookup(&self, index: u32) -> Option<&Instruction> {
        let bank = match index >> 8 {
            0x00 => &self.base,
            0xCB => &self.cb,
            0xDD => &self.dd,
            0xED => &self.ed,
            0xFD => &self.fd,
            0xDDCB => &self.ddcb,
            0xFDCB => &self.fdcb,
            _ => return None,
        };
        bank[(index & 0xFF) as usize].as_ref()
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_bank() -> Box<Bank> {
    Box::new([None; 256])
}

#[derive(Default)]
pub(crate) struct Builder {
    entries: BTreeMap<u32, Instruction>,
}

impl Builder {
    pub(crate) fn op(
        &mut self,
        opcode: u32,
        mnemonic: &'static str,
        length: u8,
        cycles: u32,
        action: Action,
    ) {
        self.classified(opcode, mnemonic, length, cycles, Class::Normal, action);
    }

    pub(crate) fn classified(
        &mut self,
        opcode: u32,
        mnemonic: &'static str,
        length: u8,
        cycles: u32,
        class: Class,
        action: Action,
    ) {
        let previous = self.entries.insert(
            opcode,
            Instruction {
                mnemonic,
                opcode,
                length,
                cycles,
                class,
                action,
            },
        );
        assert!(previous.is_none(), "duplicate registration: {opcode:06X}");
    }

    fn build(self) -> InstructionTable {
        let mut table = InstructionTable {
            base: empty_bank(),
            cb: empty_bank(),
            dd: empty_bank(),
            ed: empty_bank(),
            fd: empty_bank(),
            ddcb: empty_bank(),
            fdcb: empty_bank(),
        };

        for (index, instruction) in self.entries {
            debug_assert_eq!(index, instruction.opcode);
            let bank = match index >> 8 {
                0x00 => &mut table.base,
                0xCB => &mut table.cb,
                0xDD => &mut table.dd,
                0xED => &mut table.ed,
                0xFD => &mut table.fd,
                0xDDCB => &mut table.ddcb,
                0xFDCB => &mut table.fdcb,
                _ => unreachable!("registration outside a known space: {index:06X}"),
            };
            bank[(index & 0xFF) as usize] = Some(instruction);
        }

        table
    }
}
