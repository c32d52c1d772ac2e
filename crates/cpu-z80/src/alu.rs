//! ALU helpers shared by the instruction actions.
//!
//! Every helper returns the result value together with the complete
//! flags byte its instruction family computes; callers merge in any
//! bits their opcode leaves unaffected (usually just Carry).

use crate::flags::{CF, HF, NF, PF, SF, XF, YF, ZF, sz53, sz53p};

/// Result of an ALU operation with flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    pub value: u8,
    pub flags: u8,
}

/// Add two bytes with optional carry in.
#[must_use]
pub fn add8(a: u8, b: u8, carry: bool) -> AluResult {
    let c = u8::from(carry);
    let wide = u16::from(a) + u16::from(b) + u16::from(c);
    let value = wide as u8;

    let mut flags = sz53(value);
    if (a & 0x0F) + (b & 0x0F) + c > 0x0F {
        flags |= HF;
    }
    // Overflow: operands share a sign the result does not
    if (a ^ b) & 0x80 == 0 && (a ^ value) & 0x80 != 0 {
        flags |= PF;
    }
    if wide > 0xFF {
        flags |= CF;
    }

    AluResult { value, flags }
}

/// Subtract two bytes with optional borrow in.
#[must_use]
pub fn sub8(a: u8, b: u8, carry: bool) -> AluResult {
    let c = u8::from(carry);
    let value = a.wrapping_sub(b).wrapping_sub(c);

    let mut flags = NF | sz53(value);
    if (a & 0x0F) < (b & 0x0F) + c {
        flags |= HF;
    }
    if (a ^ b) & 0x80 != 0 && (b ^ value) & 0x80 == 0 {
        flags |= PF;
    }
    if u16::from(a) < u16::from(b) + u16::from(c) {
        flags |= CF;
    }

    AluResult { value, flags }
}

/// AND operation. H is always set.
#[must_use]
pub fn and8(a: u8, b: u8) -> AluResult {
    let value = a & b;
    AluResult {
        value,
        flags: sz53p(value) | HF,
    }
}

/// OR operation.
#[must_use]
pub fn or8(a: u8, b: u8) -> AluResult {
    let value = a | b;
    AluResult {
        value,
        flags: sz53p(value),
    }
}

/// XOR operation.
#[must_use]
pub fn xor8(a: u8, b: u8) -> AluResult {
    let value = a ^ b;
    AluResult {
        value,
        flags: sz53p(value),
    }
}

/// Compare: subtract without storing, but X/Y mirror the operand
/// rather than the result.
#[must_use]
pub fn cp8(a: u8, b: u8) -> AluResult {
    let mut result = sub8(a, b, false);
    result.flags = (result.flags & !(YF | XF)) | (b & (YF | XF));
    result.value = a;
    result
}

/// Increment byte. Carry is not part of the contract.
#[must_use]
pub fn inc8(a: u8) -> AluResult {
    let value = a.wrapping_add(1);

    let mut flags = sz53(value);
    if a & 0x0F == 0x0F {
        flags |= HF;
    }
    if a == 0x7F {
        flags |= PF;
    }

    AluResult { value, flags }
}

/// Decrement byte. Carry is not part of the contract.
#[must_use]
pub fn dec8(a: u8) -> AluResult {
    let value = a.wrapping_sub(1);

    let mut flags = NF | sz53(value);
    if a & 0x0F == 0x00 {
        flags |= HF;
    }
    if a == 0x80 {
        flags |= PF;
    }

    AluResult { value, flags }
}

fn rotated(value: u8, carry_out: u8) -> AluResult {
    let mut flags = sz53p(value);
    if carry_out != 0 {
        flags |= CF;
    }
    AluResult { value, flags }
}

/// Rotate left circular (bit 7 -> carry and bit 0).
#[must_use]
pub fn rlc8(a: u8) -> AluResult {
    rotated(a.rotate_left(1), a >> 7)
}

/// Rotate right circular (bit 0 -> carry and bit 7).
#[must_use]
pub fn rrc8(a: u8) -> AluResult {
    rotated(a.rotate_right(1), a & 1)
}

/// Rotate left through carry.
#[must_use]
pub fn rl8(a: u8, carry: bool) -> AluResult {
    rotated((a << 1) | u8::from(carry), a >> 7)
}

/// Rotate right through carry.
#[must_use]
pub fn rr8(a: u8, carry: bool) -> AluResult {
    rotated((a >> 1) | (u8::from(carry) << 7), a & 1)
}

/// Shift left arithmetic (bit 0 = 0).
#[must_use]
pub fn sla8(a: u8) -> AluResult {
    rotated(a << 1, a >> 7)
}

/// Shift right arithmetic (bit 7 preserved).
#[must_use]
pub fn sra8(a: u8) -> AluResult {
    rotated((a >> 1) | (a & 0x80), a & 1)
}

/// Shift left logical (undocumented SLL - bit 0 = 1).
#[must_use]
pub fn sll8(a: u8) -> AluResult {
    rotated((a << 1) | 1, a >> 7)
}

/// Shift right logical (bit 7 = 0).
#[must_use]
pub fn srl8(a: u8) -> AluResult {
    rotated(a >> 1, a & 1)
}

/// 16-bit add for ADD HL/IX/IY, rr. S/Z/P are not part of the contract;
/// the caller preserves them from the previous flags.
#[must_use]
pub fn add16(a: u16, b: u16) -> (u16, u8) {
    let wide = u32::from(a) + u32::from(b);
    let value = wide as u16;

    let mut flags = ((value >> 8) as u8) & (YF | XF);
    if (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF {
        flags |= HF;
    }
    if wide > 0xFFFF {
        flags |= CF;
    }

    (value, flags)
}

/// 16-bit add with carry for ADC HL, rr.
#[must_use]
pub fn adc16(a: u16, b: u16, carry: bool) -> (u16, u8) {
    let c = u16::from(carry);
    let wide = u32::from(a) + u32::from(b) + u32::from(c);
    let value = wide as u16;

    let mut flags = ((value >> 8) as u8) & (YF | XF);
    if value == 0 {
        flags |= ZF;
    }
    if value & 0x8000 != 0 {
        flags |= SF;
    }
    if (a & 0x0FFF) + (b & 0x0FFF) + c > 0x0FFF {
        flags |= HF;
    }
    if (a ^ b) & 0x8000 == 0 && (a ^ value) & 0x8000 != 0 {
        flags |= PF;
    }
    if wide > 0xFFFF {
        flags |= CF;
    }

    (value, flags)
}

/// 16-bit subtract with borrow for SBC HL, rr.
#[must_use]
pub fn sbc16(a: u16, b: u16, carry: bool) -> (u16, u8) {
    let c = u16::from(carry);
    let value = a.wrapping_sub(b).wrapping_sub(c);

    let mut flags = NF | (((value >> 8) as u8) & (YF | XF));
    if value == 0 {
        flags |= ZF;
    }
    if value & 0x8000 != 0 {
        flags |= SF;
    }
    if (a & 0x0FFF) < (b & 0x0FFF) + c {
        flags |= HF;
    }
    if (a ^ b) & 0x8000 != 0 && (b ^ value) & 0x8000 == 0 {
        flags |= PF;
    }
    if u32::from(a) < u32::from(b) + u32::from(c) {
        flags |= CF;
    }

    (value, flags)
}

/// Decimal adjust after addition/subtraction.
///
/// Corrects A by 0x06/0x60/0x66 depending on the current value and the
/// C/H/N flags, then recomputes everything except N from the corrected
/// value.
#[must_use]
pub fn daa(a: u8, flags: u8) -> AluResult {
    let mut adjust = 0u8;
    let mut carry = flags & CF != 0;

    if flags & HF != 0 || a & 0x0F > 0x09 {
        adjust |= 0x06;
    }
    if carry || a > 0x99 {
        adjust |= 0x60;
        carry = true;
    }

    let value = if flags & NF != 0 {
        a.wrapping_sub(adjust)
    } else {
        a.wrapping_add(adjust)
    };

    let mut out = sz53p(value) | (flags & NF);
    if carry {
        out |= CF;
    }
    // Half-carry after correction depends on the direction
    if flags & NF == 0 {
        if a & 0x0F > 0x09 {
            out |= HF;
        }
    } else if flags & HF != 0 && a & 0x0F < 0x06 {
        out |= HF;
    }

    AluResult { value, flags: out }
}

/// Flags for IN r,(C) and the tested value of BIT-style reads.
#[must_use]
pub fn in_flags(value: u8, carry: u8) -> u8 {
    sz53p(value) | carry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add8_carries_and_overflows() {
        let r = add8(0x7F, 0x01, false);
        assert_eq!(r.value, 0x80);
        assert_eq!(r.flags & SF, SF);
        assert_eq!(r.flags & PF, PF); // signed overflow
        assert_eq!(r.flags & HF, HF);
        assert_eq!(r.flags & CF, 0);

        let r = add8(0xFF, 0x01, false);
        assert_eq!(r.value, 0x00);
        assert_eq!(r.flags & (ZF | CF | HF), ZF | CF | HF);
    }

    #[test]
    fn sub8_borrows() {
        let r = sub8(0x00, 0x01, false);
        assert_eq!(r.value, 0xFF);
        assert_eq!(r.flags & (SF | NF | CF | HF), SF | NF | CF | HF);

        let r = sub8(0x80, 0x01, false);
        assert_eq!(r.flags & PF, PF); // 0x80 - 1 overflows signed
    }

    #[test]
    fn cp8_mirrors_operand_into_xy() {
        // Result of 0x40 - 0x28 is 0x18 (X set, Y clear); operand 0x28
        // has Y set, X set -> flags must follow the operand.
        let r = cp8(0x40, 0x28);
        assert_eq!(r.flags & (YF | XF), 0x28 & (YF | XF));
        assert_eq!(r.value, 0x40); // A unchanged
    }

    #[test]
    fn inc_dec_detect_nibble_boundaries() {
        assert_eq!(inc8(0x0F).flags & HF, HF);
        assert_eq!(inc8(0x7F).flags & PF, PF);
        assert_eq!(dec8(0x10).flags & HF, HF);
        assert_eq!(dec8(0x80).flags & PF, PF);
        assert_eq!(dec8(0x01).flags & ZF, ZF);
    }

    #[test]
    fn rotates_move_carry() {
        let r = rlc8(0x81);
        assert_eq!(r.value, 0x03);
        assert_eq!(r.flags & CF, CF);

        let r = rr8(0x01, true);
        assert_eq!(r.value, 0x80);
        assert_eq!(r.flags & CF, CF);

        let r = sll8(0x80);
        assert_eq!(r.value, 0x01);
        assert_eq!(r.flags & CF, CF);

        let r = sra8(0x81);
        assert_eq!(r.value, 0xC0);
        assert_eq!(r.flags & CF, CF);
    }

    #[test]
    fn add16_keeps_low_flags_only() {
        let (value, flags) = add16(0x0FFF, 0x0001);
        assert_eq!(value, 0x1000);
        assert_eq!(flags & HF, HF);
        assert_eq!(flags & CF, 0);

        let (value, flags) = add16(0xFFFF, 0x0001);
        assert_eq!(value, 0x0000);
        assert_eq!(flags & CF, CF);
    }

    #[test]
    fn sbc16_computes_sign_zero_overflow() {
        let (value, flags) = sbc16(0x0000, 0x0001, false);
        assert_eq!(value, 0xFFFF);
        assert_eq!(flags & (SF | NF | CF), SF | NF | CF);

        let (value, flags) = sbc16(0x1234, 0x1234, false);
        assert_eq!(value, 0);
        assert_eq!(flags & ZF, ZF);
    }

    #[test]
    fn daa_documented_cases() {
        // 0x45 + 0x38 = 0x7D -> DAA -> 0x83
        let add = add8(0x45, 0x38, false);
        let r = daa(add.value, add.flags);
        assert_eq!(r.value, 0x83);
        assert_eq!(r.flags & CF, 0);

        // A=0x9A with no carries corrects by 0x66 to 0x00, carry out
        let r = daa(0x9A, 0);
        assert_eq!(r.value, 0x00);
        assert_eq!(r.flags & CF, CF);
        assert_eq!(r.flags & ZF, ZF);

        // Subtraction path: 0x42 - 0x13 = 0x2F -> DAA -> 0x29
        let sub = sub8(0x42, 0x13, false);
        let r = daa(sub.value, sub.flags);
        assert_eq!(r.value, 0x29);
        assert_eq!(r.flags & NF, NF);
    }
}
