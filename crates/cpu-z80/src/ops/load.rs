//! 8/16-bit loads, exchanges, and stack transfers.

use crate::flags::{CF, PF, sz53};

use super::{Input, Outcome};

pub(crate) fn nop(input: &mut Input<'_>) -> Outcome {
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_r_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.reg8(op & 7);
    input.set_reg8((op >> 3) & 7, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_r_n(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.data[1];
    input.set_reg8((op >> 3) & 7, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_r_addr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.eff_addr();
    let value = input.mem.read(address);
    input.set_reg8_plain((op >> 3) & 7, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_addr_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.eff_addr();
    let value = input.reg8_plain(op & 7);
    input.mem.write(address, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_addr_n(input: &mut Input<'_>) -> Outcome {
    let address = input.eff_addr();
    let value = if input.prefix() == 0 {
        input.data[1]
    } else {
        input.data[2]
    };
    input.mem.write(address, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_a_bc(input: &mut Input<'_>) -> Outcome {
    let address = input.regs.bc();
    input.regs.a = input.mem.read(address);
    input.regs.wz = address.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_a_de(input: &mut Input<'_>) -> Outcome {
    let address = input.regs.de();
    input.regs.a = input.mem.read(address);
    input.regs.wz = address.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_bc_a(input: &mut Input<'_>) -> Outcome {
    let address = input.regs.bc();
    input.mem.write(address, input.regs.a);
    input.regs.wz =
        u16::from(input.regs.a) << 8 | (address.wrapping_add(1) & 0x00FF);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_de_a(input: &mut Input<'_>) -> Outcome {
    let address = input.regs.de();
    input.mem.write(address, input.regs.a);
    input.regs.wz =
        u16::from(input.regs.a) << 8 | (address.wrapping_add(1) & 0x00FF);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_a_imm_addr(input: &mut Input<'_>) -> Outcome {
    let address = input.imm16();
    input.regs.a = input.mem.read(address);
    input.regs.wz = address.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_imm_addr_a(input: &mut Input<'_>) -> Outcome {
    let address = input.imm16();
    input.mem.write(address, input.regs.a);
    input.regs.wz =
        u16::from(input.regs.a) << 8 | (address.wrapping_add(1) & 0x00FF);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_rr_nn(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.imm16();
    input.set_pair((op >> 4) & 3, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_imm_addr_hl(input: &mut Input<'_>) -> Outcome {
    let address = input.imm16();
    let value = input.index_reg();
    input.write16(address, value);
    input.regs.wz = address.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_hl_imm_addr(input: &mut Input<'_>) -> Outcome {
    let address = input.imm16();
    let value = input.read16(address);
    input.set_index_reg(value);
    input.regs.wz = address.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_imm_addr_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.imm16();
    let value = input.pair((op >> 4) & 3);
    input.write16(address, value);
    input.regs.wz = address.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_rr_imm_addr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let address = input.imm16();
    let value = input.read16(address);
    input.set_pair((op >> 4) & 3, value);
    input.regs.wz = address.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_sp_hl(input: &mut Input<'_>) -> Outcome {
    input.regs.sp = input.index_reg();
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_i_a(input: &mut Input<'_>) -> Outcome {
    input.regs.i = input.regs.a;
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ld_r_reg_a(input: &mut Input<'_>) -> Outcome {
    input.regs.r = input.regs.a;
    input.regs.reset_q();
    Outcome::Advance(0)
}

/// LD A, I and LD A, R. Copies IFF2 into PF, which BIOS code uses to
/// recover the interrupt state.
pub(crate) fn ld_a_ir(input: &mut Input<'_>) -> Outcome {
    let value = if input.op() & 0x08 == 0 {
        input.regs.i
    } else {
        input.regs.r
    };
    input.regs.a = value;
    let mut flags = sz53(value) | (input.regs.f & CF);
    if input.regs.iff2 {
        flags |= PF;
    }
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn ex_af(input: &mut Input<'_>) -> Outcome {
    core::mem::swap(&mut input.regs.a, &mut input.regs.a_alt);
    core::mem::swap(&mut input.regs.f, &mut input.regs.f_alt);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn exx(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    core::mem::swap(&mut r.b, &mut r.b_alt);
    core::mem::swap(&mut r.c, &mut r.c_alt);
    core::mem::swap(&mut r.d, &mut r.d_alt);
    core::mem::swap(&mut r.e, &mut r.e_alt);
    core::mem::swap(&mut r.h, &mut r.h_alt);
    core::mem::swap(&mut r.l, &mut r.l_alt);
    r.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ex_de_hl(input: &mut Input<'_>) -> Outcome {
    let r = &mut *input.regs;
    core::mem::swap(&mut r.d, &mut r.h);
    core::mem::swap(&mut r.e, &mut r.l);
    r.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn ex_sp_hl(input: &mut Input<'_>) -> Outcome {
    let sp = input.regs.sp;
    let from_stack = input.read16(sp);
    let value = input.index_reg();
    input.write16(sp, value);
    input.set_index_reg(from_stack);
    input.regs.wz = from_stack;
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn push_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.pair_af((op >> 4) & 3);
    input.push16(value);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn pop_rr(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.pop16();
    input.set_pair_af((op >> 4) & 3, value);
    input.regs.reset_q();
    Outcome::Advance(0)
}
