//! 8-bit and 16-bit arithmetic, DAA, and the carry-flag instructions.

use crate::alu;
use crate::flags::{CF, HF, NF, PF, SF, XF, YF, ZF};

use super::{Input, Outcome};

fn apply_alu(input: &mut Input<'_>, operation: u8, value: u8) {
    let a = input.regs.a;
    let carry = input.regs.f & CF != 0;
    let result = match operation & 7 {
        0 => alu::add8(a, value, false),
        1 => alu::add8(a, value, carry),
        2 => alu::sub8(a, value, false),
        3 => alu::sub8(a, value, carry),
        4 => alu::and8(a, value),
        5 => alu::xor8(a, value),
        6 => alu::or8(a, value),
        _ => alu::cp8(a, value),
    };
    input.regs.a = result.value;
    input.regs.set_flags(result.flags);
}

pub(crate) fn alu_a_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.reg8(op & 7);
    apply_alu(input, (op >> 3) & 7, value);
    Outcome::Advance(0)
}

pub(crate) fn alu_a_addr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.eff_addr();
    let value = input.mem.read(address);
    apply_alu(input, (op >> 3) & 7, value);
    Outcome::Advance(0)
}

pub(crate) fn alu_a_n(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.data[1];
    apply_alu(input, (op >> 3) & 7, value);
    Outcome::Advance(0)
}

pub(crate) fn inc_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let code = (op >> 3) & 7;
    let result = alu::inc8(input.reg8(code));
    input.set_reg8(code, result.value);
    let flags = (input.regs.f & CF) | result.flags;
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn dec_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let code = (op >> 3) & 7;
    let result = alu::dec8(input.reg8(code));
    input.set_reg8(code, result.value);
    let flags = (input.regs.f & CF) | result.flags;
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn inc_addr(input: &mut Input<'_>) -> Outcome {
    let address = input.eff_addr();
    let result = alu::inc8(input.mem.read(address));
    input.mem.write(address, result.value);
    let flags = (input.regs.f & CF) | result.flags;
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn dec_addr(input: &mut Input<'_>) -> Outcome {
    let address = input.eff_addr();
    let result = alu::dec8(input.mem.read(address));
    input.mem.write(address, result.value);
    let flags = (input.regs.f & CF) | result.flags;
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn inc_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let code = (op >> 4) & 3;
    let value = input.pair(code).wrapping_add(1);
    input.set_pair(code, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn dec_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let code = (op >> 4) & 3;
    let value = input.pair(code).wrapping_sub(1);
    input.set_pair(code, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn add_hl_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let lhs = input.index_reg();
    let rhs = input.pair((op >> 4) & 3);
    input.regs.wz = lhs.wrapping_add(1);
    let (value, partial) = alu::add16(lhs, rhs);
    input.set_index_reg(value);
    let flags = (input.regs.f & (SF | ZF | PF)) | partial;
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn adc_hl_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let lhs = input.regs.hl();
    let rhs = input.pair((op >> 4) & 3);
    let carry = input.regs.f & CF != 0;
    input.regs.wz = lhs.wrapping_add(1);
    let (value, flags) = alu::adc16(lhs, rhs, carry);
    input.regs.set_hl(value);
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn sbc_hl_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let lhs = input.regs.hl();
    let rhs = input.pair((op >> 4) & 3);
    let carry = input.regs.f & CF != 0;
    input.regs.wz = lhs.wrapping_add(1);
    let (value, flags) = alu::sbc16(lhs, rhs, carry);
    input.regs.set_hl(value);
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn daa(input: &mut Input<'_>) -> Outcome {
    let result = alu::daa(input.regs.a, input.regs.f);
    input.regs.a = result.value;
    input.regs.set_flags(result.flags);
    Outcome::Advance(0)
}

pub(crate) fn cpl(input: &mut Input<'_>) -> Outcome {
    input.regs.a = !input.regs.a;
    let flags = (input.regs.f & (SF | ZF | PF | CF))
        | HF
        | NF
        | (input.regs.a & (XF | YF));
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn neg(input: &mut Input<'_>) -> Outcome {
    let result = alu::sub8(0, input.regs.a, false);
    input.regs.a = result.value;
    input.regs.set_flags(result.flags);
    Outcome::Advance(0)
}

/// SCF. The undocumented X/Y bits come from `(Q ^ F) | A`, matching
/// hardware measurements on NMOS parts.
pub(crate) fn scf(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    let flags = (r.f & (SF | ZF | PF)) | CF | (((r.q ^ r.f) | r.a) & (XF | YF));
    r.set_flags(flags);
    Outcome::Advance(0)
}

/// CCF. Carry inverts, the old carry moves into HF, X/Y as for SCF.
pub(crate) fn ccf(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    let mut flags = (r.f & (SF | ZF | PF)) | (((r.q ^ r.f) | r.a) & (XF | YF));
    if r.f & CF != 0 {
        flags |= HF;
    } else {
        flags |= CF;
    }
    r.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn rlca(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    let carry = r.a >> 7;
    r.a = r.a << 1 | carry;
    let flags = (r.f & (SF | ZF | PF)) | (r.a & (XF | YF)) | carry;
    r.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn rrca(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    let carry = r.a & 1;
    r.a = r.a >> 1 | carry << 7;
    let flags = (r.f & (SF | ZF | PF)) | (r.a & (XF | YF)) | carry;
    r.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn rla(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    let carry = r.a >> 7;
    r.a = r.a << 1 | (r.f & CF);
    let flags = (r.f & (SF | ZF | PF)) | (r.a & (XF | YF)) | carry;
    r.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn rra(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    let carry = r.a & 1;
    r.a = r.a >> 1 | (r.f & CF) << 7;
    let flags = (r.f & (SF | ZF | PF)) | (r.a & (XF | YF)) | carry;
    r.set_flags(flags);
    Outcome::Advance(0)
}

/// RRD: low nibble of (HL) into low nibble of A, the rest rotating right
/// through the memory byte.
pub(crate) fn rrd(input: &mut Input<'_>) -> Outcome {
    let address = input.regs.hl();
    let value = input.mem.read(address);
    let a = input.regs.a;
    input.regs.a = (a & 0xF0) | (value & 0x0F);
    input.mem.write(address, (a & 0x0F) << 4 | value >> 4);
    let flags = crate::flags::sz53p(input.regs.a) | (input.regs.f & CF);
    input.regs.set_flags(flags);
    input.regs.wz = address.wrapping_add(1);
    Outcome::Advance(0)
}

/// RLD: the rotating-left counterpart of RRD.
pub(crate) fn rld(input: &mut Input<'_>) -> Outcome {
    let address = input.regs.hl();
    let value = input.mem.read(address);
    let a = input.regs.a;
    input.regs.a = (a & 0xF0) | (value >> 4);
    input.mem.write(address, value << 4 | (a & 0x0F));
    let flags = crate::flags::sz53p(input.regs.a) | (input.regs.f & CF);
    input.regs.set_flags(flags);
    input.regs.wz = address.wrapping_add(1);
    Outcome::Advance(0)
}
