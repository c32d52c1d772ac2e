//! ED opcode space. NEG, RETN and the interrupt-mode setters occupy
//! every undocumented mirror slot; the remaining holes are genuinely
//! unregistered and fetch as unimplemented.

use crate::ops;

use super::Builder;

const IN_R_C: [&str; 8] = [
    "IN B, (C)", "IN C, (C)", "IN D, (C)", "IN E, (C)",
    "IN H, (C)", "IN L, (C)", "IN (C)", "IN A, (C)",
];
const OUT_C_R: [&str; 8] = [
    "OUT (C), B", "OUT (C), C", "OUT (C), D", "OUT (C), E",
    "OUT (C), H", "OUT (C), L", "OUT (C), 0", "OUT (C), A",
];
const SBC_HL_RR: [&str; 4] = ["SBC HL, BC", "SBC HL, DE", "SBC HL, HL", "SBC HL, SP"];
const ADC_HL_RR: [&str; 4] = ["ADC HL, BC", "ADC HL, DE", "ADC HL, HL", "ADC HL, SP"];
const LD_ADDR_RR: [&str; 4] = ["LD (nn), BC", "LD (nn), DE", "LD (nn), HL", "LD (nn), SP"];
const LD_RR_ADDR: [&str; 4] = ["LD BC, (nn)", "LD DE, (nn)", "LD HL, (nn)", "LD SP, (nn)"];
const IM_M: [&str; 4] = ["IM 0", "IM 0", "IM 1", "IM 2"];

pub(super) fn register(b: &mut Builder) {
    for r in 0..8u32 {
        let i = r as usize;
        b.op(0xED40 | (r << 3), IN_R_C[i], 1, 8, ops::in_r_c);
        b.op(0xED41 | (r << 3), OUT_C_R[i], 1, 8, ops::out_c_r);
        b.op(0xED44 | (r << 3), "NEG", 1, 4, ops::neg);
        b.op(0xED46 | (r << 3), IM_M[(r & 3) as usize], 1, 4, ops::im);
    }

    for rp in 0..4u32 {
        let i = rp as usize;
        b.op(0xED42 | (rp << 4), SBC_HL_RR[i], 1, 11, ops::sbc_hl_rr);
        b.op(0xED43 | (rp << 4), LD_ADDR_RR[i], 3, 16, ops::ld_imm_addr_rr);
        b.op(0xED4A | (rp << 4), ADC_HL_RR[i], 1, 11, ops::adc_hl_rr);
        b.op(0xED4B | (rp << 4), LD_RR_ADDR[i], 3, 16, ops::ld_rr_imm_addr);
        b.op(0xED45 | (rp << 4), "RETN", 1, 10, ops::retn);
        b.op(0xED4D | (rp << 4), "RETI", 1, 10, ops::retn);
    }

    b.op(0xED47, "LD I, A", 1, 5, ops::ld_i_a);
    b.op(0xED4F, "LD R, A", 1, 5, ops::ld_r_reg_a);
    b.op(0xED57, "LD A, I", 1, 5, ops::ld_a_ir);
    b.op(0xED5F, "LD A, R", 1, 5, ops::ld_a_ir);
    b.op(0xED67, "RRD", 1, 14, ops::rrd);
    b.op(0xED6F, "RLD", 1, 14, ops::rld);

    b.op(0xEDA0, "LDI", 1, 12, ops::ldi);
    b.op(0xEDA1, "CPI", 1, 12, ops::cpi);
    b.op(0xEDA2, "INI", 1, 12, ops::ini);
    b.op(0xEDA3, "OUTI", 1, 12, ops::outi);
    b.op(0xEDA8, "LDD", 1, 12, ops::ldd);
    b.op(0xEDA9, "CPD", 1, 12, ops::cpd);
    b.op(0xEDAA, "IND", 1, 12, ops::ind);
    b.op(0xEDAB, "OUTD", 1, 12, ops::outd);
    b.op(0xEDB0, "LDIR", 1, 12, ops::ldir);
    b.op(0xEDB1, "CPIR", 1, 12, ops::cpir);
    b.op(0xEDB2, "INIR", 1, 12, ops::inir);
    b.op(0xEDB3, "OTIR", 1, 12, ops::otir);
    b.op(0xEDB8, "LDDR", 1, 12, ops::lddr);
    b.op(0xEDB9, "CPDR", 1, 12, ops::cpdr);
    b.op(0xEDBA, "INDR", 1, 12, ops::indr);
    b.op(0xEDBB, "OTDR", 1, 12, ops::otdr);
}
