//! Memory bus interface.

/// Byte-addressable memory over a 16-bit address space.
///
/// The CPU reads whatever byte the bus currently exposes at an address;
/// bank and ROM switching triggered by port writes is entirely the
/// implementor's business.
pub trait Memory {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Fill `buf` with consecutive bytes starting at `address`.
    ///
    /// Wraps at the 64KB boundary, which operand fetches near 0xFFFF
    /// rely on.
    fn read_block(&mut self, address: u16, buf: &mut [u8]) {
        for (offset, slot) in buf.iter_mut().enumerate() {
            *slot = self.read(address.wrapping_add(offset as u16));
        }
    }
}

/// Flat 64KB RAM with no paging.
///
/// Reference implementation used by the test suites; real machines plug
/// in a banked memory instead.
pub struct FlatMemory {
    ram: Box<[u8; 0x1_0000]>,
}

impl FlatMemory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 0x1_0000]),
        }
    }

    /// Copy `data` into memory starting at `address`.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        for (offset, &byte) in data.iter().enumerate() {
            self.ram[address.wrapping_add(offset as u16) as usize] = byte;
        }
    }

    /// Read without the `&mut` the bus trait requires (for assertions).
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[address as usize]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory for FlatMemory {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[address as usize] = value;
    }
}
