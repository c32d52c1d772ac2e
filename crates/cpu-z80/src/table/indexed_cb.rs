//! DD CB and FD CB opcode spaces.
//!
//! Every encoding acts on memory at IX/IY+d. The undocumented columns
//! that also copy the result into a register share their column-6
//! sibling's mnemonic; the action tells the variants apart from the
//! suffix opcode in the operand block.

use crate::ops;

use super::Builder;

struct Names {
    rot: [&'static str; 8],
    bit: [&'static str; 8],
    res: [&'static str; 8],
    set: [&'static str; 8],
}

const IX: Names = Names {
    rot: [
        "RLC (IX+d)", "RRC (IX+d)", "RL (IX+d)", "RR (IX+d)",
        "SLA (IX+d)", "SRA (IX+d)", "SLL (IX+d)", "SRL (IX+d)",
    ],
    bit: [
        "BIT 0, (IX+d)", "BIT 1, (IX+d)", "BIT 2, (IX+d)", "BIT 3, (IX+d)",
        "BIT 4, (IX+d)", "BIT 5, (IX+d)", "BIT 6, (IX+d)", "BIT 7, (IX+d)",
    ],
    res: [
        "RES 0, (IX+d)", "RES 1, (IX+d)", "RES 2, (IX+d)", "RES 3, (IX+d)",
        "RES 4, (IX+d)", "RES 5, (IX+d)", "RES 6, (IX+d)", "RES 7, (IX+d)",
    ],
    set: [
        "SET 0, (IX+d)", "SET 1, (IX+d)", "SET 2, (IX+d)", "SET 3, (IX+d)",
        "SET 4, (IX+d)", "SET 5, (IX+d)", "SET 6, (IX+d)", "SET 7, (IX+d)",
    ],
};

const IY: Names = Names {
    rot: [
        "RLC (IY+d)", "RRC (IY+d)", "RL (IY+d)", "RR (IY+d)",
        "SLA (IY+d)", "SRA (IY+d)", "SLL (IY+d)", "SRL (IY+d)",
    ],
    bit: [
        "BIT 0, (IY+d)", "BIT 1, (IY+d)", "BIT 2, (IY+d)", "BIT 3, (IY+d)",
        "BIT 4, (IY+d)", "BIT 5, (IY+d)", "BIT 6, (IY+d)", "BIT 7, (IY+d)",
    ],
    res: [
        "RES 0, (IY+d)", "RES 1, (IY+d)", "RES 2, (IY+d)", "RES 3, (IY+d)",
        "RES 4, (IY+d)", "RES 5, (IY+d)", "RES 6, (IY+d)", "RES 7, (IY+d)",
    ],
    set: [
        "SET 0, (IY+d)", "SET 1, (IY+d)", "SET 2, (IY+d)", "SET 3, (IY+d)",
        "SET 4, (IY+d)", "SET 5, (IY+d)", "SET 6, (IY+d)", "SET 7, (IY+d)",
    ],
};

pub(super) fn register(b: &mut Builder, prefix: u32) {
    let names = if prefix == 0x00DD_CB00 { &IX } else { &IY };

    for op in 0x00..=0xFFu32 {
        let row = ((op >> 3) & 7) as usize;
        match op >> 6 {
            0 => b.op(prefix | op, names.rot[row], 2, 15, ops::idx_rot),
            1 => b.op(prefix | op, names.bit[row], 2, 12, ops::idx_bit),
            2 => b.op(prefix | op, names.res[row], 2, 15, ops::idx_res),
            _ => b.op(prefix | op, names.set[row], 2, 15, ops::idx_set),
        }
    }
}
