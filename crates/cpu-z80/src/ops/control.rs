//! Jumps, calls, returns, single I/O, and interrupt-state instructions.

use crate::alu;
use crate::flags::CF;
use crate::registers::InterruptMode;

use super::{Input, Outcome};

pub(crate) fn jp_nn(input: &mut Input<'_>) -> Outcome {
    let target = input.imm16();
    input.regs.wz = target;
    input.regs.pc = target;
    input.regs.reset_q();
    Outcome::Jumped(0)
}

pub(crate) fn jp_cc_nn(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let target = input.imm16();
    input.regs.wz = target;
    input.regs.reset_q();
    if input.condition((op >> 3) & 7) {
        input.regs.pc = target;
        return Outcome::Jumped(0);
    }
    Outcome::Advance(0)
}

pub(crate) fn jp_hl(input: &mut Input<'_>) -> Outcome {
    input.regs.pc = input.index_reg();
    input.regs.reset_q();
    Outcome::Jumped(0)
}

pub(crate) fn jr_e(input: &mut Input<'_>) -> Outcome {
    let offset = input.data[1] as i8 as u16;
    let target = input.regs.pc.wrapping_add(2).wrapping_add(offset);
    input.regs.wz = target;
    input.regs.pc = input.regs.pc.wrapping_add(offset);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn jr_cc_e(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    input.regs.reset_q();
    // The four JR forms share the NZ/Z/NC/C condition encodings.
    if input.condition((op >> 3) & 3) {
        let offset = input.data[1] as i8 as u16;
        input.regs.wz = input.regs.pc.wrapping_add(2).wrapping_add(offset);
        input.regs.pc = input.regs.pc.wrapping_add(offset);
        return Outcome::Advance(5);
    }
    Outcome::Advance(0)
}

pub(crate) fn djnz(input: &mut Input<'_>) -> Outcome {
    input.regs.b = input.regs.b.wrapping_sub(1);
    input.regs.reset_q();
    if input.regs.b != 0 {
        let offset = input.data[1] as i8 as u16;
        input.regs.wz = input.regs.pc.wrapping_add(2).wrapping_add(offset);
        input.regs.pc = input.regs.pc.wrapping_add(offset);
        return Outcome::Advance(5);
    }
    Outcome::Advance(0)
}

pub(crate) fn call_nn(input: &mut Input<'_>) -> Outcome {
    let target = input.imm16();
    let ret = input.regs.pc.wrapping_add(3);
    input.push16(ret);
    input.regs.wz = target;
    input.regs.pc = target;
    input.regs.reset_q();
    Outcome::Jumped(0)
}

pub(crate) fn call_cc_nn(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let target = input.imm16();
    input.regs.wz = target;
    input.regs.reset_q();
    if input.condition((op >> 3) & 7) {
        let ret = input.regs.pc.wrapping_add(3);
        input.push16(ret);
        input.regs.pc = target;
        return Outcome::Jumped(7);
    }
    Outcome::Advance(0)
}

pub(crate) fn ret(input: &mut Input<'_>) -> Outcome {
    let target = input.pop16();
    input.regs.wz = target;
    input.regs.pc = target;
    input.regs.reset_q();
    Outcome::Jumped(0)
}

pub(crate) fn ret_cc(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    input.regs.reset_q();
    if input.condition((op >> 3) & 7) {
        let target = input.pop16();
        input.regs.wz = target;
        input.regs.pc = target;
        return Outcome::Jumped(6);
    }
    Outcome::Advance(0)
}

/// RETN and RETI. Both restore IFF1 from IFF2, unblocking maskable
/// interrupts after a non-maskable handler.
pub(crate) fn retn(input: &mut Input<'_>) -> Outcome {
    let target = input.pop16();
    input.regs.wz = target;
    input.regs.pc = target;
    input.regs.iff1 = input.regs.iff2;
    input.regs.reset_q();
    Outcome::Jumped(0)
}

pub(crate) fn rst(input: &mut Input<'_>) -> Outcome {
    let target = u16::from(input.op() & 0x38);
    let ret = input.regs.pc.wrapping_add(1);
    input.push16(ret);
    input.regs.wz = target;
    input.regs.pc = target;
    input.regs.reset_q();
    Outcome::Jumped(0)
}

pub(crate) fn in_a_n(input: &mut Input<'_>) -> Outcome {
    let port = input.data[1];
    let full = u16::from(input.regs.a) << 8 | u16::from(port);
    input.regs.a = input.ports.read(port);
    input.regs.wz = full.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn in_r_c(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let value = input.ports.read(input.regs.c);
    let code = (op >> 3) & 7;
    // ED70 is IN (C): flags only, the value is discarded.
    if code != 6 {
        input.set_reg8_plain(code, value);
    }
    input.regs.wz = input.regs.bc().wrapping_add(1);
    let flags = alu::in_flags(value, input.regs.f & CF);
    input.regs.set_flags(flags);
    Outcome::Advance(0)
}

pub(crate) fn out_n_a(input: &mut Input<'_>) -> Outcome {
    let port = input.data[1];
    let a = input.regs.a;
    input.ports.write(port, a);
    let full = u16::from(a) << 8 | u16::from(port);
    input.regs.record_paging_write(full, a);
    input.regs.wz =
        u16::from(a) << 8 | u16::from(port.wrapping_add(1));
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn out_c_r(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    let code = (op >> 3) & 7;
    // ED71 is OUT (C), 0.
    let value = if code == 6 { 0 } else { input.reg8_plain(code) };
    input.ports.write(input.regs.c, value);
    let bc = input.regs.bc();
    input.regs.record_paging_write(bc, value);
    input.regs.wz = bc.wrapping_add(1);
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn di(input: &mut Input<'_>) -> Outcome {
    input.regs.iff1 = false;
    input.regs.iff2 = false;
    input.regs.reset_q();
    Outcome::Advance(0)
}

/// EI. Interrupts are enabled but held off until after the next
/// instruction, so a handler can end with EI; RET without re-entering.
pub(crate) fn ei(input: &mut Input<'_>) -> Outcome {
    input.regs.iff1 = true;
    input.regs.iff2 = true;
    input.regs.skip_interrupt = true;
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn im(input: &mut Input<'_>) -> Outcome {
    let op = input.op();
    input.regs.im = match (op >> 3) & 3 {
        2 => InterruptMode::Mode1,
        3 => InterruptMode::Mode2,
        _ => InterruptMode::Mode0,
    };
    input.regs.reset_q();
    Outcome::Advance(0)
}

pub(crate) fn halt(input: &mut Input<'_>) -> Outcome {
    input.regs.halted = true;
    input.regs.reset_q();
    Outcome::Advance(0)
}

/// Latches a prefix for the next step. A one-byte-prefix descriptor
/// stores its low byte; the DDCB/FDCB descriptors store the full pair
/// so the next step reads a displacement and suffix opcode.
pub(crate) fn prefix(input: &mut Input<'_>) -> Outcome {
    input.regs.opcode_prefix = if input.opcode > 0xFF && input.op() == 0xCB {
        input.opcode
    } else {
        u32::from(input.op())
    };
    Outcome::Advance(0)
}
