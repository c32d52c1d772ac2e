//! Unprefixed opcode space. All 256 encodings are registered.

use crate::ops;

use super::{Builder, Class};

const LD_RR_NN: [&str; 4] = ["LD BC, nn", "LD DE, nn", "LD HL, nn", "LD SP, nn"];
const INC_RR: [&str; 4] = ["INC BC", "INC DE", "INC HL", "INC SP"];
const DEC_RR: [&str; 4] = ["DEC BC", "DEC DE", "DEC HL", "DEC SP"];
const ADD_HL_RR: [&str; 4] = ["ADD HL, BC", "ADD HL, DE", "ADD HL, HL", "ADD HL, SP"];
const PUSH_RR: [&str; 4] = ["PUSH BC", "PUSH DE", "PUSH HL", "PUSH AF"];
const POP_RR: [&str; 4] = ["POP BC", "POP DE", "POP HL", "POP AF"];

const INC_R: [&str; 8] = [
    "INC B", "INC C", "INC D", "INC E", "INC H", "INC L", "INC (HL)", "INC A",
];
const DEC_R: [&str; 8] = [
    "DEC B", "DEC C", "DEC D", "DEC E", "DEC H", "DEC L", "DEC (HL)", "DEC A",
];
const LD_R_N: [&str; 8] = [
    "LD B, n", "LD C, n", "LD D, n", "LD E, n", "LD H, n", "LD L, n",
    "LD (HL), n", "LD A, n",
];

#[rustfmt::skip]
pub(super) const LD_R_R: [&str; 64] = [
    "LD B, B", "LD B, C", "LD B, D", "LD B, E", "LD B, H", "LD B, L", "LD B, (HL)", "LD B, A",
    "LD C, B", "LD C, C", "LD C, D", "LD C, E", "LD C, H", "LD C, L", "LD C, (HL)", "LD C, A",
    "LD D, B", "LD D, C", "LD D, D", "LD D, E", "LD D, H", "LD D, L", "LD D, (HL)", "LD D, A",
    "LD E, B", "LD E, C", "LD E, D", "LD E, E", "LD E, H", "LD E, L", "LD E, (HL)", "LD E, A",
    "LD H, B", "LD H, C", "LD H, D", "LD H, E", "LD H, H", "LD H, L", "LD H, (HL)", "LD H, A",
    "LD L, B", "LD L, C", "LD L, D", "LD L, E", "LD L, H", "LD L, L", "LD L, (HL)", "LD L, A",
    "LD (HL), B", "LD (HL), C", "LD (HL), D", "LD (HL), E", "LD (HL), H", "LD (HL), L", "HALT", "LD (HL), A",
    "LD A, B", "LD A, C", "LD A, D", "LD A, E", "LD A, H", "LD A, L", "LD A, (HL)", "LD A, A",
];

#[rustfmt::skip]
pub(super) const ALU_A_R: [&str; 64] = [
    "ADD A, B", "ADD A, C", "ADD A, D", "ADD A, E", "ADD A, H", "ADD A, L", "ADD A, (HL)", "ADD A, A",
    "ADC A, B", "ADC A, C", "ADC A, D", "ADC A, E", "ADC A, H", "ADC A, L", "ADC A, (HL)", "ADC A, A",
    "SUB B", "SUB C", "SUB D", "SUB E", "SUB H", "SUB L", "SUB (HL)", "SUB A",
    "SBC A, B", "SBC A, C", "SBC A, D", "SBC A, E", "SBC A, H", "SBC A, L", "SBC A, (HL)", "SBC A, A",
    "AND B", "AND C", "AND D", "AND E", "AND H", "AND L", "AND (HL)", "AND A",
    "XOR B", "XOR C", "XOR D", "XOR E", "XOR H", "XOR L", "XOR (HL)", "XOR A",
    "OR B", "OR C", "OR D", "OR E", "OR H", "OR L", "OR (HL)", "OR A",
    "CP B", "CP C", "CP D", "CP E", "CP H", "CP L", "CP (HL)", "CP A",
];

const ALU_A_N: [&str; 8] = [
    "ADD A, n", "ADC A, n", "SUB n", "SBC A, n", "AND n", "XOR n", "OR n", "CP n",
];

const JR_CC: [&str; 4] = ["JR NZ, e", "JR Z, e", "JR NC, e", "JR C, e"];
const RET_CC: [&str; 8] = [
    "RET NZ", "RET Z", "RET NC", "RET C", "RET PO", "RET PE", "RET P", "RET M",
];
const JP_CC: [&str; 8] = [
    "JP NZ, nn", "JP Z, nn", "JP NC, nn", "JP C, nn",
    "JP PO, nn", "JP PE, nn", "JP P, nn", "JP M, nn",
];
const CALL_CC: [&str; 8] = [
    "CALL NZ, nn", "CALL Z, nn", "CALL NC, nn", "CALL C, nn",
    "CALL PO, nn", "CALL PE, nn", "CALL P, nn", "CALL M, nn",
];
const RST: [&str; 8] = [
    "RST 0x00", "RST 0x08", "RST 0x10", "RST 0x18",
    "RST 0x20", "RST 0x28", "RST 0x30", "RST 0x38",
];

pub(super) fn register(b: &mut Builder) {
    b.op(0x00, "NOP", 1, 4, ops::nop);
    b.op(0x02, "LD (BC), A", 1, 7, ops::ld_bc_a);
    b.op(0x07, "RLCA", 1, 4, ops::rlca);
    b.op(0x08, "EX AF, AF'", 1, 4, ops::ex_af);
    b.op(0x0A, "LD A, (BC)", 1, 7, ops::ld_a_bc);
    b.op(0x0F, "RRCA", 1, 4, ops::rrca);
    b.op(0x10, "DJNZ e", 2, 8, ops::djnz);
    b.op(0x12, "LD (DE), A", 1, 7, ops::ld_de_a);
    b.op(0x17, "RLA", 1, 4, ops::rla);
    b.op(0x18, "JR e", 2, 12, ops::jr_e);
    b.op(0x1A, "LD A, (DE)", 1, 7, ops::ld_a_de);
    b.op(0x1F, "RRA", 1, 4, ops::rra);
    b.op(0x22, "LD (nn), HL", 3, 16, ops::ld_imm_addr_hl);
    b.op(0x27, "DAA", 1, 4, ops::daa);
    b.op(0x2A, "LD HL, (nn)", 3, 16, ops::ld_hl_imm_addr);
    b.op(0x2F, "CPL", 1, 4, ops::cpl);
    b.op(0x32, "LD (nn), A", 3, 13, ops::ld_imm_addr_a);
    b.op(0x37, "SCF", 1, 4, ops::scf);
    b.op(0x3A, "LD A, (nn)", 3, 13, ops::ld_a_imm_addr);
    b.op(0x3F, "CCF", 1, 4, ops::ccf);

    for rp in 0..4u32 {
        let i = rp as usize;
        b.op(0x01 | (rp << 4), LD_RR_NN[i], 3, 10, ops::ld_rr_nn);
        b.op(0x03 | (rp << 4), INC_RR[i], 1, 6, ops::inc_rr);
        b.op(0x09 | (rp << 4), ADD_HL_RR[i], 1, 11, ops::add_hl_rr);
        b.op(0x0B | (rp << 4), DEC_RR[i], 1, 6, ops::dec_rr);
        b.op(0xC1 | (rp << 4), POP_RR[i], 1, 10, ops::pop_rr);
        b.op(0xC5 | (rp << 4), PUSH_RR[i], 1, 11, ops::push_rr);
    }

    for r in 0..8u32 {
        if r == 6 {
            continue;
        }
        let i = r as usize;
        b.op(0x04 | (r << 3), INC_R[i], 1, 4, ops::inc_r);
        b.op(0x05 | (r << 3), DEC_R[i], 1, 4, ops::dec_r);
        b.op(0x06 | (r << 3), LD_R_N[i], 2, 7, ops::ld_r_n);
    }
    b.op(0x34, INC_R[6], 1, 11, ops::inc_addr);
    b.op(0x35, DEC_R[6], 1, 11, ops::dec_addr);
    b.op(0x36, LD_R_N[6], 2, 10, ops::ld_addr_n);

    for cc in 0..4u32 {
        b.op(0x20 | (cc << 3), JR_CC[cc as usize], 2, 7, ops::jr_cc_e);
    }

    for op in 0x40..=0x7Fu32 {
        if op == 0x76 {
            continue;
        }
        let mnemonic = LD_R_R[(op - 0x40) as usize];
        if op & 7 == 6 {
            b.op(op, mnemonic, 1, 7, ops::ld_r_addr);
        } else if op & 0x38 == 0x30 {
            b.op(op, mnemonic, 1, 7, ops::ld_addr_r);
        } else {
            b.op(op, mnemonic, 1, 4, ops::ld_r_r);
        }
    }
    b.op(0x76, "HALT", 1, 4, ops::halt);

    for op in 0x80..=0xBFu32 {
        let mnemonic = ALU_A_R[(op - 0x80) as usize];
        if op & 7 == 6 {
            b.op(op, mnemonic, 1, 7, ops::alu_a_addr);
        } else {
            b.op(op, mnemonic, 1, 4, ops::alu_a_r);
        }
    }

    for cc in 0..8u32 {
        let i = cc as usize;
        b.op(0xC0 | (cc << 3), RET_CC[i], 1, 5, ops::ret_cc);
        b.op(0xC2 | (cc << 3), JP_CC[i], 3, 10, ops::jp_cc_nn);
        b.classified(0xC4 | (cc << 3), CALL_CC[i], 3, 10, Class::Call, ops::call_cc_nn);
        b.op(0xC6 | (cc << 3), ALU_A_N[i], 2, 7, ops::alu_a_n);
        b.classified(0xC7 | (cc << 3), RST[i], 1, 11, Class::Restart, ops::rst);
    }

    b.op(0xC3, "JP nn", 3, 10, ops::jp_nn);
    b.op(0xC9, "RET", 1, 10, ops::ret);
    b.classified(0xCB, "PREFIX CB", 1, 4, Class::Prefix, ops::prefix);
    b.classified(0xCD, "CALL nn", 3, 17, Class::Call, ops::call_nn);
    b.op(0xD3, "OUT (n), A", 2, 11, ops::out_n_a);
    b.op(0xD9, "EXX", 1, 4, ops::exx);
    b.op(0xDB, "IN A, (n)", 2, 11, ops::in_a_n);
    b.classified(0xDD, "PREFIX DD", 1, 4, Class::Prefix, ops::prefix);
    b.op(0xE3, "EX (SP), HL", 1, 19, ops::ex_sp_hl);
    b.op(0xE9, "JP (HL)", 1, 4, ops::jp_hl);
    b.op(0xEB, "EX DE, HL", 1, 4, ops::ex_de_hl);
    b.classified(0xED, "PREFIX ED", 1, 4, Class::Prefix, ops::prefix);
    b.op(0xF3, "DI", 1, 4, ops::di);
    b.op(0xF9, "LD SP, HL", 1, 6, ops::ld_sp_hl);
    b.classified(0xFB, "EI", 1, 4, Class::EnableInterrupts, ops::ei);
    b.classified(0xFD, "PREFIX FD", 1, 4, Class::Prefix, ops::prefix);
}
