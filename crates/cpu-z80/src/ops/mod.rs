//! Instruction actions.
//!
//! Each action is one small transformation over (operand bytes, register
//! state, buses). Actions shared across the unprefixed and DD/FD spaces
//! decode their register fields from the opcode and consult the prefix
//! bits to pick HL, IX or IY, so one routine covers all three spaces.

mod arith;
mod bits;
mod block;
mod control;
mod load;

pub(crate) use arith::*;
pub(crate) use bits::*;
pub(crate) use block::*;
pub(crate) use control::*;
pub(crate) use load::*;

use machine_core::{Memory, PortBus};

use crate::flags::{CF, PF, SF, ZF};
use crate::registers::Registers;

/// How the engine should account for a completed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Auto-advance PC by the descriptor length; the value is extra
    /// clock cycles beyond the base count.
    Advance(u32),
    /// The action repositioned PC itself; the value is extra cycles.
    Jumped(u32),
}

/// Everything an action may touch.
pub struct Input<'a> {
    /// Flattened (prefix, opcode) index of the descriptor being executed.
    pub opcode: u32,
    /// Operand block read by the engine. For one-byte-prefixed and
    /// unprefixed entries `data[0]` is the opcode byte itself; for
    /// DDCB/FDCB entries `data[0]` is the displacement and `data[1]`
    /// the suffix opcode.
    pub data: &'a [u8],
    pub regs: &'a mut Registers,
    pub mem: &'a mut dyn Memory,
    pub ports: &'a mut dyn PortBus,
}

impl Input<'_> {
    /// Low opcode byte of this descriptor.
    pub(crate) const fn op(&self) -> u8 {
        self.opcode as u8
    }

    /// One-byte prefix of this descriptor (0xDD, 0xFD or 0 for none).
    pub(crate) const fn prefix(&self) -> u8 {
        match self.opcode >> 8 {
            0xDD => 0xDD,
            0xFD => 0xFD,
            _ => 0,
        }
    }

    /// HL, or the index register selected by the prefix.
    pub(crate) const fn index_reg(&self) -> u16 {
        match self.prefix() {
            0xDD => self.regs.ix,
            0xFD => self.regs.iy,
            _ => self.regs.hl(),
        }
    }

    /// Set HL or the prefix-selected index register.
    pub(crate) const fn set_index_reg(&mut self, value: u16) {
        match self.prefix() {
            0xDD => self.regs.ix = value,
            0xFD => self.regs.iy = value,
            _ => self.regs.set_hl(value),
        }
    }

    /// Effective address of the memory operand: HL, or IX/IY plus the
    /// displacement at `data[1]`. Latches MEMPTR for the indexed forms.
    pub(crate) fn eff_addr(&mut self) -> u16 {
        match self.prefix() {
            0 => self.regs.hl(),
            _ => {
                let d = self.data[1] as i8;
                let addr = self.index_reg().wrapping_add(d as u16);
                self.regs.wz = addr;
                addr
            }
        }
    }

    /// Get register by 3-bit encoding, honouring the undocumented
    /// IXH/IXL/IYH/IYL substitution under a DD/FD prefix.
    pub(crate) fn reg8(&self, code: u8) -> u8 {
        match code & 7 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => (self.index_reg() >> 8) as u8,
            5 => self.index_reg() as u8,
            7 => self.regs.a,
            _ => 0, // (HL) - routed to the memory forms at registration
        }
    }

    /// Set register by 3-bit encoding with IXH/IXL/IYH/IYL substitution.
    pub(crate) fn set_reg8(&mut self, code: u8, value: u8) {
        match code & 7 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => {
                let idx = self.index_reg();
                self.set_index_reg((idx & 0x00FF) | (u16::from(value) << 8));
            }
            5 => {
                let idx = self.index_reg();
                self.set_index_reg((idx & 0xFF00) | u16::from(value));
            }
            7 => self.regs.a = value,
            _ => {}
        }
    }

    /// Get register by 3-bit encoding, always the real H/L. Used by the
    /// (IX+d) forms, where the register operand is never substituted.
    pub(crate) const fn reg8_plain(&self, code: u8) -> u8 {
        match code & 7 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            7 => self.regs.a,
            _ => 0,
        }
    }

    /// Set register by 3-bit encoding, always the real H/L.
    pub(crate) const fn set_reg8_plain(&mut self, code: u8, value: u8) {
        match code & 7 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            7 => self.regs.a = value,
            _ => {}
        }
    }

    /// Get register pair by 2-bit encoding (BC/DE/HL-or-index/SP).
    pub(crate) const fn pair(&self, code: u8) -> u16 {
        match code & 3 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.index_reg(),
            _ => self.regs.sp,
        }
    }

    /// Set register pair by 2-bit encoding.
    pub(crate) const fn set_pair(&mut self, code: u8, value: u16) {
        match code & 3 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.set_index_reg(value),
            _ => self.regs.sp = value,
        }
    }

    /// Get register pair for PUSH/POP (AF instead of SP).
    pub(crate) const fn pair_af(&self, code: u8) -> u16 {
        match code & 3 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.index_reg(),
            _ => self.regs.af(),
        }
    }

    /// Set register pair for PUSH/POP.
    pub(crate) const fn set_pair_af(&mut self, code: u8, value: u16) {
        match code & 3 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.set_index_reg(value),
            _ => self.regs.set_af(value),
        }
    }

    /// Evaluate a 3-bit condition code.
    pub(crate) const fn condition(&self, code: u8) -> bool {
        let f = self.regs.f;
        match code & 7 {
            0 => f & ZF == 0, // NZ
            1 => f & ZF != 0, // Z
            2 => f & CF == 0, // NC
            3 => f & CF != 0, // C
            4 => f & PF == 0, // PO
            5 => f & PF != 0, // PE
            6 => f & SF == 0, // P
            _ => f & SF != 0, // M
        }
    }

    /// 16-bit immediate operand at `data[1..=2]`, little-endian.
    pub(crate) fn imm16(&self) -> u16 {
        u16::from(self.data[1]) | (u16::from(self.data[2]) << 8)
    }

    /// Push a 16-bit value, high byte first at successively
    /// decremented SP.
    pub(crate) fn push16(&mut self, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.mem.write(self.regs.sp, (value >> 8) as u8);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.mem.write(self.regs.sp, value as u8);
    }

    /// Pop a 16-bit value, low byte first at successively incremented SP.
    pub(crate) fn pop16(&mut self) -> u16 {
        let lo = self.mem.read(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = self.mem.read(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from(hi) << 8 | u16::from(lo)
    }

    /// Read a little-endian word from memory.
    pub(crate) fn read16(&mut self, address: u16) -> u16 {
        let lo = self.mem.read(address);
        let hi = self.mem.read(address.wrapping_add(1));
        u16::from(hi) << 8 | u16::from(lo)
    }

    /// Write a little-endian word to memory.
    pub(crate) fn write16(&mut self, address: u16, value: u16) {
        self.mem.write(address, value as u8);
        self.mem.write(address.wrapping_add(1), (value >> 8) as u8);
    }
}
