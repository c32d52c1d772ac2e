//! CB-space rotates, shifts and bit tests, plus the DDCB/FDCB forms.
//!
//! The DDCB/FDCB actions take the displacement from `data[0]` and the
//! suffix opcode from `data[1]`. All of them operate on memory at
//! IX/IY+d; the forms whose register column is not 6 additionally copy
//! the result into that register.

use crate::alu::{self, AluResult};
use crate::flags::{CF, HF, PF, SF, XF, YF, ZF};

use super::{Input, Outcome};

fn rotate(kind: u8, value: u8, carry: bool) -> AluResult {
    match kind & 7 {
        0 => alu::rlc8(value),
        1 => alu::rrc8(value),
        2 => alu::rl8(value, carry),
        3 => alu::rr8(value, carry),
        4 => alu::sla8(value),
        5 => alu::sra8(value),
        6 => alu::sll8(value),
        _ => alu::srl8(value),
    }
}

/// BIT flags. S is set only for BIT 7 with the bit set; X/Y come from
/// `source`, which differs between the register, (HL) and (IX+d) forms.
fn bit_flags(f: u8, value: u8, bit: u8, source: u8) -> u8 {
    let tested = value & (1 << bit);
    let mut flags = (f & CF) | HF | (source & (XF | YF));
    if tested == 0 {
        flags |= ZF | PF;
    }
    if bit == 7 && tested != 0 {
        flags |= SF;
    }
    flags
}

pub(crate) fn rot_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let carry = input.regs.f & CF != 0;
    let result = rotate(op >> 3, input.reg8_plain(op & 7), carry);
    input.set_reg8_plain(op & 7, result.value);
    input.regs.set_flags(result.flags);
    Outcome::Advance(0)
}

pub(crate) fn rot_addr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.regs.hl();
    let carry = input.regs.f & CF != 0;
    let result = rotate(op >> 3, input.mem.read(address), carry);
    input.mem.write(address, result.value);
    input.regs.set_flags(result.flags);
    Outcome::Advance(0)
}

pub(crate) fn bit_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.reg8_plain(op & 7);
    let flags = bit_flags(input.regs.f, value, (op >> 3) & 7, value);
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

/// BIT n, (HL). X/Y leak from the high byte of MEMPTR.
pub(crate) fn bit_addr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.mem.read(input.regs.hl());
    let source = (input.regs.wz >> 8) as u8;
    let flags = bit_flags(input.regs.f, value, (op >> 3) & 7, source);
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn res_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.reg8_plain(op & 7) & !(1 << ((op >> 3) & 7));
    input.set_reg8_plain(op & 7, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn set_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.reg8_plain(op & 7) | 1 << ((op >> 3) & 7);
    input.set_reg8_plain(op & 7, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn res_addr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.regs.hl();
    let value = input.mem.read(address) & !(1 << ((op >> 3) & 7));
    input.mem.write(address, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn set_addr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.regs.hl();
    let value = input.mem.read(address) | 1 << ((op >> 3) & 7);
    input.mem.write(address, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

/// IX/IY plus the displacement in `data[0]`, latched into MEMPTR.
fn indexed_addr(input: &mut Input<'_>) -> u16 {
    let base = match input.opcode >> 16 {
        0xDD => input.regs.ix,
        _ => input.regs.iy,
    };
    let d = input.data[0] as i8;
    let address = base.wrapping_add(d as u16);
    input.regs.wz = address;
    address
}

pub(crate) fn idx_rot(input: &mut Input<'_>) -> Outcome {
    let op = input.data[1];
    let address = indexed_addr(input);
    let carry = input.regs.f & CF != 0;
    let result = rotate(op >> 3, input.mem.read(address), carry);
    input.mem.write(address, result.value);
    if op & 7 != 6 {
        input.set_reg8_plain(op & 7, result.value);
    }
    input.regs.set_flags(result.flags);
    Outcome::Advance(0)
}

pub(crate) fn idx_bit(input: &mut Input<'_>) -> Outcome {
    let op = input.data[1];
    let address = indexed_addr(input);
    let value = input.mem.read(address);
    let source = (address >> 8) as u8;
    let flags = bit_flags(input.regs.f, value, (op >> 3) & 7, source);
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn idx_res(input: &mut Input<'_>) -> Outcome {
    let op = input.data[1];
    let address = indexed_addr(input);
    let value = input.mem.read(address) & !(1 << ((op >> 3) & 7));
    input.mem.write(address, value);
    if op & 7 != 6 {
        input.set_reg8_plain(op & 7, value);
    }
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn idx_set(input: &mut Input<'_>) -> Outcome {
    let op = input.data[1];
    let address = indexed_addr(input);
    let value = input.mem.read(address) | 1 << ((op >> 3) & 7);
    input.mem.write(address, value);
    if op & 7 != 6 {
        input.set_reg8_plain(op & 7, value);
    }
    input.regs.reset_q();
    Outcome::Advance(0)
}
