//! Unit tests for individual instructions, run through the full
//! fetch-decode-execute path.

use cpu_z80::flags::{CF, HF, NF, PF, SF, XF, YF, ZF};
use cpu_z80::{Step, StepError, Z80};
use machine_core::{FlatMemory, InterruptLine, Ports};

struct Machine {
    cpu: Z80,
    mem: FlatMemory,
    ports: Ports,
    int: InterruptLine,
}

impl Machine {
    fn with_program(program: &[u8]) -> Self {
        let mut mem = FlatMemory::new();
        mem.load(0x0000, program);
        Self {
            cpu: Z80::new(),
            mem,
            ports: Ports::new(),
            int: InterruptLine::new(),
        }
    }

    fn step(&mut self) -> Step {
        self.cpu
            .step(&mut self.mem, &mut self.ports, &mut self.int)
            .expect("step failed")
    }

    fn try_step(&mut self) -> Result<Step, StepError> {
        self.cpu.step(&mut self.mem, &mut self.ports, &mut self.int)
    }

    /// Step until HALT executes, with a safety cap.
    fn run_until_halt(&mut self) {
        for _ in 0..10_000 {
            if self.cpu.registers().halted {
                return;
            }
            self.step();
        }
        panic!("program never halted");
    }
}

#[test]
fn nop_advances_pc_only() {
    let mut m = Machine::with_program(&[0x00]);
    let step = m.step();
    assert_eq!(step.cycles, 4);
    assert_eq!(step.mnemonic, "NOP");
    assert_eq!(m.cpu.registers().pc, 0x0001);
}

#[test]
fn ld_immediate_forms() {
    let mut m = Machine::with_program(&[
        0x3E, 0x42, // LD A, 0x42
        0x01, 0x34, 0x12, // LD BC, 0x1234
        0x76,
    ]);
    assert_eq!(m.step().cycles, 7);
    assert_eq!(m.step().cycles, 10);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x42);
    assert_eq!(m.cpu.registers().bc(), 0x1234);
}

#[test]
fn add_detects_overflow_and_half_carry() {
    let mut m = Machine::with_program(&[0x3E, 0x7F, 0xC6, 0x01, 0x76]);
    m.run_until_halt();
    let r = m.cpu.registers();
    assert_eq!(r.a, 0x80);
    assert_eq!(r.f, SF | HF | PF);
}

#[test]
fn sub_sets_n_and_borrow() {
    let mut m = Machine::with_program(&[0x3E, 0x10, 0xD6, 0x20, 0x76]);
    m.run_until_halt();
    let r = m.cpu.registers();
    assert_eq!(r.a, 0xF0);
    assert_eq!(r.f & (NF | CF | SF), NF | CF | SF);
}

#[test]
fn cp_takes_xy_from_operand() {
    let mut m = Machine::with_program(&[0xAF, 0xFE, 0x28, 0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().f & (XF | YF), XF | YF);
    assert_eq!(m.cpu.registers().a, 0x00);
}

#[test]
fn daa_adjusts_bcd_addition() {
    // 0x15 + 0x27 = 0x3C, DAA corrects to 0x42.
    let mut m = Machine::with_program(&[0x3E, 0x15, 0xC6, 0x27, 0x27, 0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x42);
    assert_eq!(m.cpu.registers().f & CF, 0);
}

#[test]
fn inc_preserves_carry() {
    let mut m = Machine::with_program(&[0x3E, 0xFF, 0x37, 0x3C, 0x76]);
    m.run_until_halt();
    let r = m.cpu.registers();
    assert_eq!(r.a, 0x00);
    assert_eq!(r.f & (ZF | HF | CF | NF), ZF | HF | CF);
}

#[test]
fn hl_indirect_read_modify_write() {
    let mut m = Machine::with_program(&[
        0x21, 0x00, 0x40, // LD HL, 0x4000
        0x36, 0x99, // LD (HL), 0x99
        0x34, // INC (HL)
        0x7E, // LD A, (HL)
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.mem.peek(0x4000), 0x9A);
    assert_eq!(m.cpu.registers().a, 0x9A);
}

#[test]
fn djnz_loops_until_b_zero() {
    let mut m = Machine::with_program(&[
        0x06, 0x03, // LD B, 3
        0x10, 0xFE, // DJNZ -2 (to itself)
        0x76,
    ]);
    m.step();
    assert_eq!(m.step().cycles, 13); // taken
    assert_eq!(m.step().cycles, 13); // taken
    assert_eq!(m.step().cycles, 8); // falls through
    assert_eq!(m.cpu.registers().b, 0);
    assert_eq!(m.cpu.registers().pc, 0x0004);
}

#[test]
fn jr_conditional_timing() {
    let mut m = Machine::with_program(&[
        0xAF, // XOR A (sets Z)
        0x20, 0x10, // JR NZ - not taken
        0x28, 0x00, // JR Z, 0 - taken
        0x76,
    ]);
    m.step();
    assert_eq!(m.step().cycles, 7);
    assert_eq!(m.step().cycles, 12);
    assert_eq!(m.cpu.registers().pc, 0x0005);
}

#[test]
fn call_and_ret_roundtrip() {
    let mut m = Machine::with_program(&[0xCD, 0x10, 0x00, 0x76]);
    m.mem.load(0x0010, &[0xC9]); // RET
    let call = m.step();
    assert_eq!(call.cycles, 17);
    assert_eq!(m.cpu.registers().pc, 0x0010);
    assert_eq!(m.cpu.registers().sp, 0xFFFD);
    assert_eq!(m.mem.peek(0xFFFD), 0x03);
    assert_eq!(m.mem.peek(0xFFFE), 0x00);
    let ret = m.step();
    assert_eq!(ret.cycles, 10);
    assert_eq!(m.cpu.registers().pc, 0x0003);
    assert_eq!(m.cpu.registers().sp, 0xFFFF);
}

#[test]
fn conditional_call_timing_differs() {
    let mut m = Machine::with_program(&[
        0xAF, // XOR A
        0xC4, 0x20, 0x00, // CALL NZ - not taken
        0xCC, 0x20, 0x00, // CALL Z - taken
    ]);
    m.mem.load(0x0020, &[0x76]);
    m.step();
    assert_eq!(m.step().cycles, 10);
    assert_eq!(m.step().cycles, 17);
    assert_eq!(m.cpu.registers().pc, 0x0020);
}

#[test]
fn rst_jumps_to_fixed_target() {
    let mut m = Machine::with_program(&[0xCF]); // RST 0x08
    m.mem.load(0x0008, &[0x76]);
    let step = m.step();
    assert_eq!(step.cycles, 11);
    assert_eq!(m.cpu.registers().pc, 0x0008);
    assert_eq!(m.mem.peek(0xFFFD), 0x01);
}

#[test]
fn exchange_instructions_swap_banks() {
    let mut m = Machine::with_program(&[
        0x3E, 0x11, // LD A, 0x11
        0x01, 0x22, 0x33, // LD BC
        0x08, // EX AF, AF'
        0xD9, // EXX
        0x3E, 0x44, 0x01, 0x55, 0x66, // new values
        0x08, 0xD9, // swap back
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x11);
    assert_eq!(m.cpu.registers().bc(), 0x2233);
    assert_eq!(m.cpu.registers().a_alt, 0x44);
    assert_eq!(m.cpu.registers().b_alt, 0x55);
}

#[test]
fn ldir_copies_block_and_clears_pv() {
    let mut m = Machine::with_program(&[0xED, 0xB0, 0x76]);
    m.mem.load(0x4000, &[0xAA, 0xBB, 0xCC]);
    let r = m.cpu.registers_mut();
    r.set_hl(0x4000);
    r.set_de(0x5000);
    r.set_bc(0x0003);

    // Each repeat is one prefix step plus one LDIR step.
    assert_eq!(m.step().mnemonic, "PREFIX ED");
    assert_eq!(m.step().cycles, 17); // repeating
    m.step();
    assert_eq!(m.step().cycles, 17);
    m.step();
    assert_eq!(m.step().cycles, 12); // terminal

    let r = m.cpu.registers();
    assert_eq!(m.mem.peek(0x5000), 0xAA);
    assert_eq!(m.mem.peek(0x5001), 0xBB);
    assert_eq!(m.mem.peek(0x5002), 0xCC);
    assert_eq!(r.bc(), 0);
    assert_eq!(r.hl(), 0x4003);
    assert_eq!(r.de(), 0x5003);
    assert_eq!(r.f & PF, 0);
    assert_eq!(r.pc, 0x0002);
}

#[test]
fn lddr_copies_downward() {
    let mut m = Machine::with_program(&[0xED, 0xB8, 0x76]);
    m.mem.load(0x4000, &[0x01, 0x02]);
    let r = m.cpu.registers_mut();
    r.set_hl(0x4001);
    r.set_de(0x5001);
    r.set_bc(0x0002);
    m.run_until_halt();
    assert_eq!(m.mem.peek(0x5000), 0x01);
    assert_eq!(m.mem.peek(0x5001), 0x02);
    assert_eq!(m.cpu.registers().hl(), 0x3FFF);
}

#[test]
fn cpir_stops_on_match() {
    let mut m = Machine::with_program(&[0xED, 0xB1, 0x76]);
    m.mem.load(0x4000, &[0x01, 0x02, 0x03]);
    let r = m.cpu.registers_mut();
    r.a = 0x02;
    r.set_hl(0x4000);
    r.set_bc(0x0004);
    m.run_until_halt();
    let r = m.cpu.registers();
    assert_eq!(r.hl(), 0x4002);
    assert_eq!(r.bc(), 0x0002);
    assert_eq!(r.f & ZF, ZF);
    assert_eq!(r.f & PF, PF); // BC still nonzero
}

#[test]
fn indexed_store_latches_memptr() {
    let mut m = Machine::with_program(&[
        0xDD, 0x21, 0x00, 0x20, // LD IX, 0x2000
        0xDD, 0x36, 0x05, 0x42, // LD (IX+5), 0x42
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.mem.peek(0x2005), 0x42);
    assert_eq!(m.cpu.registers().wz, 0x2005);
}

#[test]
fn indexed_negative_displacement() {
    let mut m = Machine::with_program(&[
        0xDD, 0x21, 0x05, 0x20, // LD IX, 0x2005
        0xDD, 0x7E, 0xFB, // LD A, (IX-5)
        0x76,
    ]);
    m.mem.load(0x2000, &[0x99]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x99);
}

#[test]
fn undocumented_index_register_halves() {
    let mut m = Machine::with_program(&[
        0xDD, 0x21, 0x34, 0x12, // LD IX, 0x1234
        0xDD, 0x7C, // LD A, IXH
        0xDD, 0x85, // ADD A, IXL
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x12 + 0x34);
}

#[test]
fn indexed_cycle_counts_include_prefix_step() {
    let mut m = Machine::with_program(&[
        0xDD, 0x21, 0x00, 0x20, // LD IX, nn: 4 + 10
        0xDD, 0x34, 0x01, // INC (IX+1): 4 + 19
    ]);
    assert_eq!(m.step().cycles + m.step().cycles, 14);
    assert_eq!(m.step().cycles + m.step().cycles, 23);
}

#[test]
fn ddcb_rotate_stores_back_to_register() {
    let mut m = Machine::with_program(&[
        0xDD, 0x21, 0x00, 0x20, // LD IX, 0x2000
        0x37, // SCF
        0xDD, 0xCB, 0x02, 0x10, // RL (IX+2) -> B
        0x76,
    ]);
    m.mem.load(0x2002, &[0x40]);
    m.run_until_halt();
    // 0x40 << 1 | carry = 0x81
    assert_eq!(m.mem.peek(0x2002), 0x81);
    assert_eq!(m.cpu.registers().b, 0x81);
}

#[test]
fn ddcb_bit_takes_xy_from_address_high_byte() {
    let mut m = Machine::with_program(&[
        0xDD, 0x21, 0x00, 0x28, // LD IX, 0x2800
        0xDD, 0xCB, 0x01, 0x7E, // BIT 7, (IX+1)
        0x76,
    ]);
    m.mem.load(0x2801, &[0x80]);
    m.run_until_halt();
    let f = m.cpu.registers().f;
    assert_eq!(f & SF, SF);
    assert_eq!(f & ZF, 0);
    // address high byte 0x28 supplies X and Y
    assert_eq!(f & (XF | YF), (XF | YF) & 0x28);
}

#[test]
fn ddcb_timing() {
    let mut m = Machine::with_program(&[
        0xDD, 0xCB, 0x00, 0x06, // RLC (IX+0): 23 total
        0xDD, 0xCB, 0x00, 0x46, // BIT 0, (IX+0): 20 total
    ]);
    let total: u32 = (0..3).map(|_| m.step().cycles).sum();
    assert_eq!(total, 23);
    let total: u32 = (0..3).map(|_| m.step().cycles).sum();
    assert_eq!(total, 20);
}

#[test]
fn scf_xy_follow_q_and_a() {
    // LD A is flag-neutral, so Q is 0 and (Q ^ F) | A exposes A's bits.
    let mut m = Machine::with_program(&[0x3E, 0xFF, 0x37, 0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().f & (XF | YF), XF | YF);

    // XOR A writes the flags (Q = F) and zeroes A, so X/Y clear.
    let mut m = Machine::with_program(&[0xAF, 0x37, 0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().f & (XF | YF), 0);
    assert_eq!(m.cpu.registers().f & CF, CF);
}

#[test]
fn ccf_moves_carry_to_half() {
    let mut m = Machine::with_program(&[0xAF, 0x37, 0x3F, 0x76]);
    m.run_until_halt();
    let f = m.cpu.registers().f;
    assert_eq!(f & CF, 0);
    assert_eq!(f & HF, HF);
}

#[test]
fn bit_hl_leaks_memptr_high_byte() {
    let mut m = Machine::with_program(&[
        0x3A, 0xFF, 0x27, // LD A, (0x27FF): MEMPTR = 0x2800
        0x21, 0x00, 0x40, // LD HL, 0x4000
        0xCB, 0x66, // BIT 4, (HL)
        0x76,
    ]);
    m.mem.load(0x4000, &[0x10]);
    m.run_until_halt();
    let f = m.cpu.registers().f;
    assert_eq!(f & ZF, 0);
    assert_eq!(f & (XF | YF), (XF | YF) & 0x28);
}

#[test]
fn cb_rotates_and_sll() {
    let mut m = Machine::with_program(&[
        0x06, 0x81, // LD B, 0x81
        0xCB, 0x00, // RLC B -> 0x03, carry
        0x3E, 0x40, // LD A, 0x40
        0xCB, 0x37, // SLL A -> 0x81 (bit 0 forced)
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().b, 0x03);
    assert_eq!(m.cpu.registers().a, 0x81);
}

#[test]
fn sbc_hl_and_adc_hl() {
    let mut m = Machine::with_program(&[
        0x21, 0x00, 0x10, // LD HL, 0x1000
        0x01, 0x01, 0x00, // LD BC, 1
        0xAF, // XOR A (clear carry)
        0xED, 0x42, // SBC HL, BC
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().hl(), 0x0FFF);
    assert_eq!(m.cpu.registers().f & NF, NF);
}

#[test]
fn ed_ld_nn_bc_writes_little_endian() {
    let mut m = Machine::with_program(&[
        0x01, 0x34, 0x12, // LD BC, 0x1234
        0xED, 0x43, 0x00, 0x40, // LD (0x4000), BC
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.mem.peek(0x4000), 0x34);
    assert_eq!(m.mem.peek(0x4001), 0x12);
    assert_eq!(m.cpu.registers().wz, 0x4001);
}

#[test]
fn rrd_swaps_nibbles_through_a() {
    let mut m = Machine::with_program(&[
        0x3E, 0x84, // LD A, 0x84
        0x21, 0x00, 0x40, // LD HL, 0x4000
        0xED, 0x67, // RRD
        0x76,
    ]);
    m.mem.load(0x4000, &[0x20]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x80);
    assert_eq!(m.mem.peek(0x4000), 0x42);
}

#[test]
fn neg_negates_accumulator() {
    let mut m = Machine::with_program(&[0x3E, 0x01, 0xED, 0x44, 0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0xFF);
    assert_eq!(m.cpu.registers().f & (NF | CF), NF | CF);
}

#[test]
fn in_and_out_immediate_ports() {
    let mut m = Machine::with_program(&[
        0xDB, 0xFE, // IN A, (0xFE)
        0xD3, 0x10, // OUT (0x10), A
        0x76,
    ]);
    m.ports.set(0xFE, 0x5A);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x5A);
    assert_eq!(m.ports.get(0x10), 0x5A);
}

#[test]
fn in_r_c_sets_flags() {
    let mut m = Machine::with_program(&[
        0x01, 0xFE, 0x00, // LD BC, 0x00FE
        0xED, 0x40, // IN B, (C)
        0x76,
    ]);
    m.ports.set(0xFE, 0x80);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().b, 0x80);
    assert_eq!(m.cpu.registers().f & (SF | ZF | NF), SF);
}

#[test]
fn out_c_a_records_paging_latch() {
    let mut m = Machine::with_program(&[
        0x01, 0xFD, 0x7F, // LD BC, 0x7FFD
        0x3E, 0x17, // LD A, 0x17
        0xED, 0x79, // OUT (C), A
        0x76,
    ]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().last_7ffd, 0x17);
    assert_eq!(m.cpu.registers().last_1ffd, 0x00);
}

#[test]
fn ini_writes_memory_and_decrements_b() {
    let mut m = Machine::with_program(&[
        0x01, 0x30, 0x02, // LD BC, 0x0230
        0x21, 0x00, 0x40, // LD HL, 0x4000
        0xED, 0xA2, // INI
        0x76,
    ]);
    m.ports.set(0x30, 0x7E);
    m.run_until_halt();
    assert_eq!(m.mem.peek(0x4000), 0x7E);
    assert_eq!(m.cpu.registers().b, 0x01);
    assert_eq!(m.cpu.registers().hl(), 0x4001);
}

#[test]
fn ld_a_i_copies_iff2_into_pv() {
    let mut m = Machine::with_program(&[0xED, 0x57, 0x76]);
    m.cpu.registers_mut().i = 0x3F;
    m.cpu.registers_mut().iff2 = true;
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x3F);
    assert_eq!(m.cpu.registers().f & PF, PF);
}

#[test]
fn ld_a_r_sees_fetch_increments() {
    // R starts at 0; ED 5F is two fetches, incremented before the
    // action reads R.
    let mut m = Machine::with_program(&[0xED, 0x5F, 0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().a, 0x02);
}

#[test]
fn refresh_register_counts_fetches() {
    let mut m = Machine::with_program(&[
        0x00, // NOP: +1
        0xDD, 0x21, 0x00, 0x20, // LD IX, nn: +2
        0xCB, 0x00, // RLC B: +2
        0x76,
    ]);
    m.cpu.registers_mut().r = 0x80; // bit 7 must survive
    m.run_until_halt();
    // +1 NOP, +2 DD, +2 CB, +1 HALT
    assert_eq!(m.cpu.registers().r, 0x86);
}

#[test]
fn unregistered_ed_encoding_is_fatal() {
    let mut m = Machine::with_program(&[0xED, 0x00]);
    assert_eq!(m.step().mnemonic, "PREFIX ED");
    assert_eq!(
        m.try_step(),
        Err(StepError::UnimplementedOpcode { index: 0xED00 })
    );
}

#[test]
fn unregistered_dd_encoding_is_fatal() {
    let mut m = Machine::with_program(&[0xDD, 0x00]);
    m.step();
    assert_eq!(
        m.try_step(),
        Err(StepError::UnimplementedOpcode { index: 0xDD00 })
    );
}

#[test]
fn halt_burns_nops_without_advancing() {
    let mut m = Machine::with_program(&[0x76]);
    m.step();
    let pc = m.cpu.registers().pc;
    let nop = m.step();
    assert_eq!(nop.mnemonic, "NOP");
    assert_eq!(nop.cycles, 4);
    m.step();
    assert_eq!(m.cpu.registers().pc, pc);
    assert!(m.cpu.registers().halted);
}

#[test]
fn counters_accumulate() {
    let mut m = Machine::with_program(&[0x00, 0x3E, 0x01, 0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.instructions_executed(), 3);
    assert_eq!(m.cpu.cycles_elapsed(), 4 + 7 + 4);
}

#[test]
fn jp_and_jp_hl() {
    let mut m = Machine::with_program(&[
        0xC3, 0x10, 0x00, // JP 0x0010
    ]);
    m.mem.load(0x0010, &[0x21, 0x20, 0x00, 0xE9]); // LD HL, 0x0020; JP (HL)
    m.mem.load(0x0020, &[0x76]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().pc, 0x0021);
    assert_eq!(m.cpu.registers().wz, 0x0010); // JP (HL) leaves MEMPTR alone
}

#[test]
fn ex_sp_hl_swaps_with_stack_top() {
    let mut m = Machine::with_program(&[
        0x21, 0x34, 0x12, // LD HL, 0x1234
        0x31, 0x00, 0x80, // LD SP, 0x8000
        0xE3, // EX (SP), HL
        0x76,
    ]);
    m.mem.load(0x8000, &[0x78, 0x56]);
    m.run_until_halt();
    assert_eq!(m.cpu.registers().hl(), 0x5678);
    assert_eq!(m.mem.peek(0x8000), 0x34);
    assert_eq!(m.mem.peek(0x8001), 0x12);
}
