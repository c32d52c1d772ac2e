//! Z80 register file and control latches.

/// Interrupt mode selected by the IM instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterruptMode {
    #[default]
    Mode0,
    Mode1,
    Mode2,
}

/// Complete CPU-visible state: registers, flags and control latches.
///
/// Register pairs are views over the 8-bit halves, so pair access and
/// byte access can never disagree. The F register is the only flag
/// representation; individual bits come from the masks in [`crate::flags`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    // Main registers
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,

    // Shadow bank
    pub a_alt: u8,
    pub f_alt: u8,
    pub b_alt: u8,
    pub c_alt: u8,
    pub d_alt: u8,
    pub e_alt: u8,
    pub h_alt: u8,
    pub l_alt: u8,

    // Index registers
    pub ix: u16,
    pub iy: u16,

    // Other registers
    pub sp: u16,
    pub pc: u16,
    /// Interrupt vector high byte.
    pub i: u8,
    /// Memory refresh counter. Bit 7 is preserved across increments;
    /// bits 0-6 wrap modulo 128.
    pub r: u8,

    /// WZ/MEMPTR - internal address latch. Not programmer-visible, but
    /// its high byte leaks into the undocumented flags of BIT n,(HL).
    pub wz: u16,
    /// Flags written by the previous instruction, or 0 if it left them
    /// alone. SCF/CCF derive their undocumented bits from this.
    pub q: u8,

    // Interrupt state
    pub iff1: bool,
    pub iff2: bool,
    pub im: InterruptMode,

    /// One-shot set by EI: skip the interrupt check after exactly the
    /// next instruction.
    pub skip_interrupt: bool,
    /// Pending opcode prefix. 0 = none; 0xCB/0xDD/0xED/0xFD = one-byte
    /// prefix consumed; 0xDDCB/0xFDCB = two-byte prefix awaiting a
    /// displacement + opcode pair.
    pub opcode_prefix: u32,

    pub halted: bool,

    /// Last byte written to port 0x7FFD (128K paging). Raw record for
    /// the paging collaborator; the core attaches no meaning to it.
    pub last_7ffd: u8,
    /// Last byte written to port 0x1FFD (+3 paging).
    pub last_1ffd: u8,
}

impl Registers {
    /// Get AF register pair.
    #[must_use]
    pub const fn af(&self) -> u16 {
        (self.a as u16) << 8 | self.f as u16
    }

    /// Get BC register pair.
    #[must_use]
    pub const fn bc(&self) -> u16 {
        (self.b as u16) << 8 | self.c as u16
    }

    /// Get DE register pair.
    #[must_use]
    pub const fn de(&self) -> u16 {
        (self.d as u16) << 8 | self.e as u16
    }

    /// Get HL register pair.
    #[must_use]
    pub const fn hl(&self) -> u16 {
        (self.h as u16) << 8 | self.l as u16
    }

    /// Set AF register pair.
    pub const fn set_af(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        self.f = value as u8;
    }

    /// Set BC register pair.
    pub const fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    /// Set DE register pair.
    pub const fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    /// Set HL register pair.
    pub const fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    /// Get the shadow AF pair.
    #[must_use]
    pub const fn af_alt(&self) -> u16 {
        (self.a_alt as u16) << 8 | self.f_alt as u16
    }

    /// Record flags computed by an instruction. Also latches Q, which
    /// SCF/CCF consult on the following instruction.
    pub const fn set_flags(&mut self, flags: u8) {
        self.f = flags;
        self.q = flags;
    }

    /// Record that an instruction left the flags untouched.
    pub const fn reset_q(&mut self) {
        self.q = 0;
    }

    /// Increment R by `count`, preserving bit 7 and wrapping bits 0-6.
    pub const fn inc_r(&mut self, count: u8) {
        self.r = (self.r & 0x80) | (self.r.wrapping_add(count) & 0x7F);
    }

    /// Capture writes to the Spectrum memory-paging ports so a memory
    /// collaborator can inspect the last value sent to each.
    pub const fn record_paging_write(&mut self, address: u16, value: u8) {
        match address {
            0x7FFD => self.last_7ffd = value,
            0x1FFD => self.last_1ffd = value,
            _ => {}
        }
    }

    /// Architectural power-on/reset state, entering execution at `pc`.
    pub fn reset(&mut self, pc: u16) {
        let (last_7ffd, last_1ffd) = (self.last_7ffd, self.last_1ffd);

        *self = Self {
            a: 0xFF,
            f: 0xFF,
            a_alt: 0xFF,
            f_alt: 0xFF,
            sp: 0xFFFF,
            pc,
            // Paging latches survive reset; clearing them is the paging
            // collaborator's call.
            last_7ffd,
            last_1ffd,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reset_applies_power_on_values() {
        let mut regs = Registers {
            b: 0x12,
            ix: 0x4455,
            iff1: true,
            halted: true,
            ..Registers::default()
        };
        regs.reset(0x8000);

        assert_eq!(regs.a, 0xFF);
        assert_eq!(regs.f, 0xFF);
        assert_eq!(regs.a_alt, 0xFF);
        assert_eq!(regs.f_alt, 0xFF);
        assert_eq!(regs.b, 0x00);
        assert_eq!(regs.ix, 0x0000);
        assert_eq!(regs.sp, 0xFFFF);
        assert_eq!(regs.pc, 0x8000);
        assert_eq!(regs.im, InterruptMode::Mode0);
        assert!(!regs.iff1);
        assert!(!regs.iff2);
        assert!(!regs.halted);
        assert_eq!(regs.opcode_prefix, 0);
        assert_eq!(regs.wz, 0);
        assert_eq!(regs.q, 0);
    }

    #[test]
    fn r_increment_preserves_top_bit() {
        let mut regs = Registers {
            r: 0x7F,
            ..Registers::default()
        };
        regs.inc_r(1);
        assert_eq!(regs.r, 0x00);

        regs.r = 0xFF;
        regs.inc_r(1);
        assert_eq!(regs.r, 0x80);

        regs.r = 0x7E;
        regs.inc_r(2);
        assert_eq!(regs.r, 0x00);
    }

    proptest! {
        #[test]
        fn pair_write_round_trips(value in any::<u16>()) {
            let mut regs = Registers::default();

            regs.set_bc(value);
            prop_assert_eq!(regs.b, (value >> 8) as u8);
            prop_assert_eq!(regs.c, value as u8);
            prop_assert_eq!(regs.bc(), value);

            regs.set_af(value);
            prop_assert_eq!(regs.af(), value);

            regs.set_de(value);
            regs.set_hl(value);
            prop_assert_eq!(regs.de(), value);
            prop_assert_eq!(regs.hl(), value);
        }

        #[test]
        fn r_low_bits_wrap_modulo_128(start in any::<u8>(), count in 1u8..8) {
            let mut regs = Registers { r: start, ..Registers::default() };
            regs.inc_r(count);

            prop_assert_eq!(regs.r & 0x80, start & 0x80);
            prop_assert_eq!(regs.r & 0x7F, start.wrapping_add(count) & 0x7F);
        }
    }
}
