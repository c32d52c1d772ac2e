//! Interrupt controller behaviour: the three maskable modes, NMI, the
//! EI holdoff, and HALT wakeup.

use cpu_z80::{InterruptMode, Z80};
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

    fn step(&mut self) {
        self.cpu
            .step(&mut self.mem, &mut self.ports, &mut self.int)
            .expect("step failed");
    }
}

#[test]
fn mode1_jumps_to_0038_and_pushes_pc() {
    let mut m = Machine::with_program(&[]);
    m.mem.load(0x1234, &[0x00]); // NOP
    {
        let r = m.cpu.registers_mut();
        r.pc = 0x1234;
        r.sp = 0x8000;
        r.iff1 = true;
        r.iff2 = true;
        r.im = InterruptMode::Mode1;
    }
    m.int.raise_int(0x00);
    m.step(); // NOP executes, then the interrupt is taken

    let r = m.cpu.registers();
    assert_eq!(r.pc, 0x0038);
    assert_eq!(r.sp, 0x7FFE);
    assert_eq!(m.mem.peek(0x7FFE), 0x35);
    assert_eq!(m.mem.peek(0x7FFF), 0x12);
    assert!(!r.iff1);
    assert!(!r.iff2);
}

#[test]
fn int_ignored_while_disabled() {
    let mut m = Machine::with_program(&[0x00, 0x00]);
    m.cpu.registers_mut().im = InterruptMode::Mode1;
    m.int.raise_int(0x00);
    m.step();
    m.step();
    assert_eq!(m.cpu.registers().pc, 0x0002);
    assert!(m.int.int); // still pending
}

#[test]
fn ei_delays_acceptance_by_one_instruction() {
    let mut m = Machine::with_program(&[
        0xFB, // EI
        0x00, // NOP
    ]);
    m.cpu.registers_mut().im = InterruptMode::Mode1;
    m.int.raise_int(0x00);

    m.step(); // EI: interrupt must not be taken yet
    assert_eq!(m.cpu.registers().pc, 0x0001);
    assert!(m.int.int);

    m.step(); // NOP: taken at its boundary
    assert_eq!(m.cpu.registers().pc, 0x0038);
}

#[test]
fn mode2_fetches_vector_from_table() {
    let mut m = Machine::with_program(&[0x00]);
    m.mem.load(0x3F02, &[0x78, 0x56]); // vector entry -> 0x5678
    {
        let r = m.cpu.registers_mut();
        r.i = 0x3F;
        r.iff1 = true;
        r.iff2 = true;
        r.im = InterruptMode::Mode2;
    }
    m.int.raise_int(0x02);
    m.step();
    assert_eq!(m.cpu.registers().pc, 0x5678);
    assert_eq!(m.cpu.registers().wz, 0x5678);
}

#[test]
fn mode0_executes_rst_from_bus() {
    let mut m = Machine::with_program(&[0x00]);
    {
        let r = m.cpu.registers_mut();
        r.iff1 = true;
        r.iff2 = true;
        r.im = InterruptMode::Mode0;
    }
    m.int.raise_int(0xDF); // RST 0x18
    m.step();
    assert_eq!(m.cpu.registers().pc, 0x0018);
}

#[test]
fn mode0_executes_call_from_bus() {
    // After the NOP retires PC is 1; the bus-supplied CALL takes its
    // operand from PC+1 and PC+2.
    let mut m = Machine::with_program(&[0x00, 0x00, 0x00, 0x40]);
    {
        let r = m.cpu.registers_mut();
        r.iff1 = true;
        r.iff2 = true;
        r.im = InterruptMode::Mode0;
    }
    m.int.raise_int(0xCD); // CALL nn
    m.step();
    assert_eq!(m.cpu.registers().pc, 0x4000);
}

#[test]
fn nmi_saves_iff1_and_jumps_to_0066() {
    let mut m = Machine::with_program(&[0x00]);
    {
        let r = m.cpu.registers_mut();
        r.sp = 0x8000;
        r.iff1 = true;
        r.iff2 = true;
    }
    m.int.raise_nmi();
    m.step();

    let r = m.cpu.registers();
    assert_eq!(r.pc, 0x0066);
    assert!(!r.iff1);
    assert!(r.iff2); // old IFF1 preserved
    assert_eq!(r.sp, 0x7FFE);
}

#[test]
fn nmi_fires_even_with_interrupts_disabled() {
    let mut m = Machine::with_program(&[0x00]);
    m.int.raise_nmi();
    m.step();
    assert_eq!(m.cpu.registers().pc, 0x0066);
}

#[test]
fn retn_restores_iff1_from_iff2() {
    let mut m = Machine::with_program(&[0xED, 0x45]); // RETN
    {
        let r = m.cpu.registers_mut();
        r.sp = 0x8000;
        r.iff1 = false;
        r.iff2 = true;
    }
    m.mem.load(0x8000, &[0x00, 0x90]); // return to 0x9000
    m.step();
    m.step();
    let r = m.cpu.registers();
    assert_eq!(r.pc, 0x9000);
    assert!(r.iff1);
}

#[test]
fn halt_wakes_on_interrupt() {
    let mut m = Machine::with_program(&[0x76]); // HALT
    m.mem.load(0x0038, &[0x00]);
    {
        let r = m.cpu.registers_mut();
        r.iff1 = true;
        r.iff2 = true;
        r.im = InterruptMode::Mode1;
    }
    m.step(); // HALT
    m.step(); // halted NOP
    assert!(m.cpu.registers().halted);

    m.int.raise_int(0x00);
    m.step(); // wake + dispatch
    assert!(!m.cpu.registers().halted);
    assert_eq!(m.cpu.registers().pc, 0x0038);
    // return address is the byte after HALT
    assert_eq!(m.mem.peek(0xFFFD), 0x01);
}

#[test]
fn interrupt_not_sampled_between_prefix_and_opcode() {
    let mut m = Machine::with_program(&[
        0xDD, 0x21, 0x00, 0x20, // LD IX, nn
    ]);
    {
        let r = m.cpu.registers_mut();
        r.iff1 = true;
        r.iff2 = true;
        r.im = InterruptMode::Mode1;
    }
    m.int.raise_int(0x00);
    m.step(); // prefix fetch: interrupt must stay pending
    assert!(m.int.int);
    assert_ne!(m.cpu.registers().pc, 0x0038);
    m.step(); // full instruction completes, then dispatch
    assert_eq!(m.cpu.registers().pc, 0x0038);
    assert_eq!(m.cpu.registers().ix, 0x2000);
}
