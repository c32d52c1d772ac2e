//! I/O port bus interface.

/// 8-bit-addressed I/O port read/write.
///
/// The CPU forwards port data unchanged; decoding the upper address
/// lines and reacting to paging-control ports is motherboard policy.
pub trait PortBus {
    /// Read a byte from the given port.
    fn read(&mut self, port: u8) -> u8;

    /// Write a byte to the given port.
    fn write(&mut self, port: u8, value: u8);
}

/// Hook invoked after every port write.
pub type WriteHook = Box<dyn FnMut(u8, u8)>;

/// Simple 256-latch port bank.
///
/// Each port remembers the last byte written to it and returns it on
/// read. An optional hook fires after every write so a paging
/// collaborator can react to paging-control ports without the CPU core
/// knowing anything about them.
pub struct Ports {
    latches: [u8; 256],
    on_write: Option<WriteHook>,
}

impl Default for Ports {
    fn default() -> Self {
        Self {
            latches: [0; 256],
            on_write: None,
        }
    }
}

impl Ports {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the post-write hook.
    pub fn set_write_hook(&mut self, hook: WriteHook) {
        self.on_write = Some(hook);
    }

    /// Preload a port latch (for tests and snapshot restore).
    pub fn set(&mut self, port: u8, value: u8) {
        self.latches[port as usize] = value;
    }

    /// Current latch value without triggering the hook.
    #[must_use]
    pub fn get(&self, port: u8) -> u8 {
        self.latches[port as usize]
    }
}

impl PortBus for Ports {
    fn read(&mut self, port: u8) -> u8 {
        self.latches[port as usize]
    }

    fn write(&mut self, port: u8, value: u8) {
        self.latches[port as usize] = value;

        if let Some(hook) = self.on_write.as_mut() {
            hook(port, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn write_then_read_returns_latch() {
        let mut ports = Ports::new();
        ports.write(0xFE, 0x18);

        assert_eq!(ports.read(0xFE), 0x18);
        assert_eq!(ports.get(0xFE), 0x18);
    }

    #[test]
    fn hook_fires_after_write() {
        let seen = Rc::new(Cell::new((0u8, 0u8)));
        let inner = Rc::clone(&seen);

        let mut ports = Ports::new();
        ports.set_write_hook(Box::new(move |port, value| {
            inner.set((port, value));
        }));
        ports.write(0xFD, 0x07);

        assert_eq!(seen.get(), (0xFD, 0x07));
    }
}
