//! Collaborator contracts for CPU cores.
//!
//! The CPU core itself owns no memory and no peripherals. RAM, I/O ports
//! and the interrupt line are all reached through the traits and types
//! here, so paging, contention and device behaviour stay on the
//! motherboard side.

mod interrupt;
mod memory;
mod ports;

pub use interrupt::InterruptLine;
pub use memory::{FlatMemory, Memory};
pub use ports::{PortBus, Ports};
