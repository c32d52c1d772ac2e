//! Instruction-stepped Z80 CPU emulator.
//!
//! Each call to [`Z80::step`] executes one instruction (or one prefix
//! fetch) against caller-supplied memory and port buses, and returns the
//! clock cycles consumed plus the mnemonic of what ran. Flag semantics
//! cover the undocumented behaviour real software depends on: X/Y flag
//! leakage, the MEMPTR latch, and the Q register feeding SCF/CCF.

pub mod alu;
mod cpu;
mod error;
pub mod flags;
mod ops;
mod registers;
mod table;
mod tracer;

pub use cpu::{Step, Z80};
pub use error::StepError;
pub use ops::{Input, Outcome};
pub use registers::{InterruptMode, Registers};
pub use table::{Action, Class, Instruction, InstructionTable};
pub use tracer::Tracer;
