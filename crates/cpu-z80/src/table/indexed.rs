//! DD and FD opcode spaces.
//!
//! The two spaces are one registration parameterised by the prefix and
//! a name set. Entries re-use the shared actions: the prefix bits of the
//! flattened opcode steer register selection at execution time, so
//! `LD IX, nn` runs the same action as `LD HL, nn`.
//!
//! The undocumented rows substituting IXH/IXL for H/L are registered
//! under their base-form names; only the (IX+d) and whole-register forms
//! get index-specific mnemonics. Encodings where the prefix is plainly
//! ignored by the hardware (for example DD 04) are left unregistered and
//! fetch as unimplemented.

use crate::ops;

use super::{Builder, Class, base};

struct Names {
    add_rr: [&'static str; 4],
    ld_rr_nn: &'static str,
    ld_addr_rr: &'static str,
    ld_rr_addr: &'static str,
    inc_rr: &'static str,
    dec_rr: &'static str,
    inc_high: &'static str,
    dec_high: &'static str,
    ld_high_n: &'static str,
    inc_low: &'static str,
    dec_low: &'static str,
    ld_low_n: &'static str,
    inc_at: &'static str,
    dec_at: &'static str,
    ld_at_n: &'static str,
    ld_r_at: [&'static str; 8],
    ld_at_r: [&'static str; 8],
    alu_at: [&'static str; 8],
    prefix_cb: &'static str,
    pop: &'static str,
    ex_sp: &'static str,
    push: &'static str,
    jp: &'static str,
    ld_sp: &'static str,
}

const IX: Names = Names {
    add_rr: ["ADD IX, BC", "ADD IX, DE", "ADD IX, IX", "ADD IX, SP"],
    ld_rr_nn: "LD IX, nn",
    ld_addr_rr: "LD (nn), IX",
    ld_rr_addr: "LD IX, (nn)",
    inc_rr: "INC IX",
    dec_rr: "DEC IX",
    inc_high: "INC IXH",
    dec_high: "DEC IXH",
    ld_high_n: "LD IXH, n",
    inc_low: "INC IXL",
    dec_low: "DEC IXL",
    ld_low_n: "LD IXL, n",
    inc_at: "INC (IX+d)",
    dec_at: "DEC (IX+d)",
    ld_at_n: "LD (IX+d), n",
    ld_r_at: [
        "LD B, (IX+d)", "LD C, (IX+d)", "LD D, (IX+d)", "LD E, (IX+d)",
        "LD H, (IX+d)", "LD L, (IX+d)", "", "LD A, (IX+d)",
    ],
    ld_at_r: [
        "LD (IX+d), B", "LD (IX+d), C", "LD (IX+d), D", "LD (IX+d), E",
        "LD (IX+d), H", "LD (IX+d), L", "", "LD (IX+d), A",
    ],
    alu_at: [
        "ADD A, (IX+d)", "ADC A, (IX+d)", "SUB (IX+d)", "SBC A, (IX+d)",
        "AND (IX+d)", "XOR (IX+d)", "OR (IX+d)", "CP (IX+d)",
    ],
    prefix_cb: "PREFIX DD CB",
    pop: "POP IX",
    ex_sp: "EX (SP), IX",
    push: "PUSH IX",
    jp: "JP (IX)",
    ld_sp: "LD SP, IX",
};

const IY: Names = Names {
    add_rr: ["ADD IY, BC", "ADD IY, DE", "ADD IY, IY", "ADD IY, SP"],
    ld_rr_nn: "LD IY, nn",
    ld_addr_rr: "LD (nn), IY",
    ld_rr_addr: "LD IY, (nn)",
    inc_rr: "INC IY",
    dec_rr: "DEC IY",
    inc_high: "INC IYH",
    dec_high: "DEC IYH",
    ld_high_n: "LD IYH, n",
    inc_low: "INC IYL",
    dec_low: "DEC IYL",
    ld_low_n: "LD IYL, n",
    inc_at: "INC (IY+d)",
    dec_at: "DEC (IY+d)",
    ld_at_n: "LD (IY+d), n",
    ld_r_at: [
        "LD B, (IY+d)", "LD C, (IY+d)", "LD D, (IY+d)", "LD E, (IY+d)",
        "LD H, (IY+d)", "LD L, (IY+d)", "", "LD A, (IY+d)",
    ],
    ld_at_r: [
        "LD (IY+d), B", "LD (IY+d), C", "LD (IY+d), D", "LD (IY+d), E",
        "LD (IY+d), H", "LD (IY+d), L", "", "LD (IY+d), A",
    ],
    alu_at: [
        "ADD A, (IY+d)", "ADC A, (IY+d)", "SUB (IY+d)", "SBC A, (IY+d)",
        "AND (IY+d)", "XOR (IY+d)", "OR (IY+d)", "CP (IY+d)",
    ],
    prefix_cb: "PREFIX FD CB",
    pop: "POP IY",
    ex_sp: "EX (SP), IY",
    push: "PUSH IY",
    jp: "JP (IY)",
    ld_sp: "LD SP, IY",
};

pub(super) fn register(b: &mut Builder, prefix: u32) {
    let names = if prefix == 0xDD00 { &IX } else { &IY };

    for rp in 0..4u32 {
        b.op(prefix | 0x09 | (rp << 4), names.add_rr[rp as usize], 1, 11, ops::add_hl_rr);
    }

    b.op(prefix | 0x21, names.ld_rr_nn, 3, 10, ops::ld_rr_nn);
    b.op(prefix | 0x22, names.ld_addr_rr, 3, 16, ops::ld_imm_addr_hl);
    b.op(prefix | 0x23, names.inc_rr, 1, 6, ops::inc_rr);
    b.op(prefix | 0x24, names.inc_high, 1, 4, ops::inc_r);
    b.op(prefix | 0x25, names.dec_high, 1, 4, ops::dec_r);
    b.op(prefix | 0x26, names.ld_high_n, 2, 7, ops::ld_r_n);
    b.op(prefix | 0x2A, names.ld_rr_addr, 3, 16, ops::ld_hl_imm_addr);
    b.op(prefix | 0x2B, names.dec_rr, 1, 6, ops::dec_rr);
    b.op(prefix | 0x2C, names.inc_low, 1, 4, ops::inc_r);
    b.op(prefix | 0x2D, names.dec_low, 1, 4, ops::dec_r);
    b.op(prefix | 0x2E, names.ld_low_n, 2, 7, ops::ld_r_n);
    b.op(prefix | 0x34, names.inc_at, 2, 19, ops::inc_addr);
    b.op(prefix | 0x35, names.dec_at, 2, 19, ops::dec_addr);
    b.op(prefix | 0x36, names.ld_at_n, 3, 15, ops::ld_addr_n);

    for op in 0x40..=0x7Fu32 {
        if op == 0x76 {
            continue;
        }
        if op & 7 == 6 {
            let row = ((op >> 3) & 7) as usize;
            b.op(prefix | op, names.ld_r_at[row], 2, 15, ops::ld_r_addr);
        } else if op & 0x38 == 0x30 {
            b.op(prefix | op, names.ld_at_r[(op & 7) as usize], 2, 15, ops::ld_addr_r);
        } else {
            b.op(prefix | op, base::LD_R_R[(op - 0x40) as usize], 1, 4, ops::ld_r_r);
        }
    }
    b.op(prefix | 0x76, "HALT", 1, 4, ops::halt);

    for op in 0x80..=0xBFu32 {
        if op & 7 == 6 {
            let row = ((op >> 3) & 7) as usize;
            b.op(prefix | op, names.alu_at[row], 2, 15, ops::alu_a_addr);
        } else {
            b.op(prefix | op, base::ALU_A_R[(op - 0x80) as usize], 1, 4, ops::alu_a_r);
        }
    }

    b.classified(prefix | 0xCB, names.prefix_cb, 1, 4, Class::Prefix, ops::prefix);
    b.classified(prefix | 0xDD, "PREFIX DD", 1, 4, Class::Prefix, ops::prefix);
    b.classified(prefix | 0xED, "PREFIX ED", 1, 4, Class::Prefix, ops::prefix);
    b.classified(prefix | 0xFD, "PREFIX FD", 1, 4, Class::Prefix, ops::prefix);

    b.op(prefix | 0xE1, names.pop, 1, 10, ops::pop_rr);
    b.op(prefix | 0xE3, names.ex_sp, 1, 19, ops::ex_sp_hl);
    b.op(prefix | 0xE5, names.push, 1, 11, ops::push_rr);
    b.op(prefix | 0xE9, names.jp, 1, 4, ops::jp_hl);
    b.op(prefix | 0xF9, names.ld_sp, 1, 6, ops::ld_sp_hl);
}
