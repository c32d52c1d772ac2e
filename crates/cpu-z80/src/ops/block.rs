//! Block transfer, search and I/O instructions (LDIR, CPIR, INIR, ...).
//!
//! A repeating form that has not terminated rewinds PC over its two-byte
//! encoding and reports five extra cycles; the engine then re-fetches the
//! same instruction, so each iteration is one `step` call and interrupts
//! are sampled between iterations.

use crate::flags::{CF, HF, NF, PF, SF, XF, YF, ZF, parity, sz53};

use super::{Input, Outcome};

/// One LDI/LDD iteration. `dir` is 1 or 0xFFFF (minus one).
fn transfer(input: &mut Input<'_>, dir: u16) {
    let hl = input.regs.hl();
    let de = input.regs.de();
    let value = input.mem.read(hl);
    input.mem.write(de, value);
    input.regs.set_hl(hl.wrapping_add(dir));
    input.regs.set_de(de.wrapping_add(dir));
    let bc = input.regs.bc().wrapping_sub(1);
    input.regs.set_bc(bc);

    // X/Y come from bits 3 and 1 of (value just moved) + A.
    let n = value.wrapping_add(input.regs.a);
    let mut flags = input.regs.f & (SF | ZF | CF);
    if bc != 0 {
        flags |= PF;
    }
    flags |= n & XF;
    if n & 0x02 != 0 {
        flags |= YF;
    }
    input.regs.set_flags(flags);
}

/// Rewind PC over the prefix and opcode so the next step re-executes
/// this instruction, and latch MEMPTR to the in-progress value.
fn repeat(input: &mut Input<'_>) -> Outcome {
    input.regs.wz = input.regs.pc.wrapping_add(1);
    input.regs.pc = input.regs.pc.wrapping_sub(2);
    Outcome::Advance(5)
}

pub(crate) fn ldi(input: &mut Input<'_>) -> Outcome {
    transfer(input, 1);
    Outcome::Advance(0)
}

pub(crate) fn ldd(input: &mut Input<'_>) -> Outcome {
    transfer(input, 0xFFFF);
    Outcome::Advance(0)
}

pub(crate) fn ldir(input: &mut Input<'_>) -> Outcome {
    transfer(input, 1);
    if input.regs.bc() != 0 {
        return repeat(input);
    }
    Outcome::Advance(0)
}

pub(crate) fn lddr(input: &mut Input<'_>) -> Outcome {
    transfer(input, 0xFFFF);
    if input.regs.bc() != 0 {
        return repeat(input);
    }
    Outcome::Advance(0)
}

/// One CPI/CPD iteration; returns the comparison difference.
fn compare(input: &mut Input<'_>, dir: u16) -> u8 {
    let hl = input.regs.hl();
    let value = input.mem.read(hl);
    let a = input.regs.a;
    let diff = a.wrapping_sub(value);
    let half = a & 0x0F < value & 0x0F;
    // X/Y from A - value - H, not from the plain difference.
    let n = diff.wrapping_sub(u8::from(half));
    input.regs.set_hl(hl.wrapping_add(dir));
    let bc = input.regs.bc().wrapping_sub(1);
    input.regs.set_bc(bc);

    let mut flags = (input.regs.f & CF) | NF | (diff & SF);
    if bc != 0 {
        flags |= PF;
    }
    if diff == 0 {
        flags |= ZF;
    }
    if half {
        flags |= HF;
    }
    flags |= n & XF;
    if n & 0x02 != 0 {
        flags |= YF;
    }
    input.regs.set_flags(flags);
    diff
}

pub(crate) fn cpi(input: &mut Input<'_>) -> Outcome {
    compare(input, 1);
    input.regs.wz = input.regs.wz.wrapping_add(1);
    Outcome::Advance(0)
}

pub(crate) fn cpd(input: &mut Input<'_>) -> Outcome {
    compare(input, 0xFFFF);
    input.regs.wz = input.regs.wz.wrapping_sub(1);
    Outcome::Advance(0)
}

pub(crate) fn cpir(input: &mut Input<'_>) -> Outcome {
    let diff = compare(input, 1);
    if input.regs.bc() != 0 && diff != 0 {
        return repeat(input);
    }
    input.regs.wz = input.regs.wz.wrapping_add(1);
    Outcome::Advance(0)
}

pub(crate) fn cpdr(input: &mut Input<'_>) -> Outcome {
    let diff = compare(input, 0xFFFF);
    if input.regs.bc() != 0 && diff != 0 {
        return repeat(input);
    }
    input.regs.wz = input.regs.wz.wrapping_sub(1);
    Outcome::Advance(0)
}

/// One INI/IND iteration.
fn input_transfer(input: &mut Input<'_>, dir: u16) {
    // MEMPTR is BC before B is decremented, +/- 1.
    input.regs.wz = input.regs.bc().wrapping_add(dir);
    let value = input.ports.read(input.regs.c);
    let hl = input.regs.hl();
    input.mem.write(hl, value);
    input.regs.set_hl(hl.wrapping_add(dir));
    input.regs.b = input.regs.b.wrapping_sub(1);

    let k = u16::from(value) + u16::from(input.regs.c.wrapping_add(dir as u8));
    io_block_flags(input, value, k);
}

/// One OUTI/OUTD iteration.
fn output_transfer(input: &mut Input<'_>, dir: u16) {
    let hl = input.regs.hl();
    let value = input.mem.read(hl);
    input.regs.set_hl(hl.wrapping_add(dir));
    input.regs.b = input.regs.b.wrapping_sub(1);
    input.ports.write(input.regs.c, value);
    // MEMPTR is BC after B is decremented, +/- 1.
    input.regs.wz = input.regs.bc().wrapping_add(dir);

    let k = u16::from(value) + u16::from(input.regs.l);
    io_block_flags(input, value, k);
}

fn io_block_flags(input: &mut Input<'_>, value: u8, k: u16) {
    let b = input.regs.b;
    let mut flags = sz53(b);
    if value & 0x80 != 0 {
        flags |= NF;
    }
    if k > 0xFF {
        flags |= HF | CF;
    }
    if parity((k as u8 & 7) ^ b) {
        flags |= PF;
    }
    input.regs.set_flags(flags);
}

pub(crate) fn ini(input: &mut Input<'_>) -> Outcome {
    input_transfer(input, 1);
    Outcome::Advance(0)
}

pub(crate) fn ind(input: &mut Input<'_>) -> Outcome {
    input_transfer(input, 0xFFFF);
    Outcome::Advance(0)
}

pub(crate) fn inir(input: &mut Input<'_>) -> Outcome {
    input_transfer(input, 1);
    if input.regs.b != 0 {
        input.regs.pc = input.regs.pc.wrapping_sub(2);
        return Outcome::Advance(5);
    }
    Outcome::Advance(0)
}

pub(crate) fn indr(input: &mut Input<'_>) -> Outcome {
    input_transfer(input, 0xFFFF);
    if input.regs.b != 0 {
        input.regs.pc = input.regs.pc.wrapping_sub(2);
        return Outcome::Advance(5);
    }
    Outcome::Advance(0)
}

pub(crate) fn outi(input: &mut Input<'_>) -> Outcome {
    output_transfer(input, 1);
    Outcome::Advance(0)
}

pub(crate) fn outd(input: &mut Input<'_>) -> Outcome {
    output_transfer(input, 0xFFFF);
    Outcome::Advance(0)
}

pub(crate) fn otir(input: &mut Input<'_>) -> Outcome {
    output_transfer(input, 1);
    if input.regs.b != 0 {
        input.regs.pc = input.regs.pc.wrapping_sub(2);
        return Outcome::Advance(5);
    }
    Outcome::Advance(0)
}

pub(crate) fn otdr(input: &mut Input<'_>) -> Outcome {
    output_transfer(input, 0xFFFF);
    if input.regs.b != 0 {
        input.regs.pc = input.regs.pc.wrapping_sub(2);
        return Outcome::Advance(5);
    }
    Outcome::Advance(0)
}
