//! Interrupt line state.

/// The two interrupt request signals plus the data byte an interrupting
/// device places on the bus.
///
/// Devices set the fields; the CPU core clears them as it services each
/// request. The data byte feeds interrupt modes 0 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterruptLine {
    /// Non-maskable interrupt pending.
    pub nmi: bool,
    /// Maskable interrupt pending.
    pub int: bool,
    /// Byte supplied by the interrupting device, if any.
    pub data: Option<u8>,
}

impl InterruptLine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert the maskable interrupt with a data byte on the bus.
    pub fn raise_int(&mut self, data: u8) {
        self.int = true;
        self.data = Some(data);
    }

    /// Assert the non-maskable interrupt.
    pub fn raise_nmi(&mut self) {
        self.nmi = true;
    }
}
