/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Arithmetic and logic unit.
//!
//! Every function computes an 8080 operation on its operands and updates the flags the way the
//! processor does. Registers and memory are left to the caller.

use super::Flags;

/// Returns true if the low `bit_width` bits of `value` contain an even number of ones.
pub fn parity(value: u16, bit_width: u32) -> bool {
    let mask = if bit_width >= 16 { 0xffff } else { (1u16 << bit_width) - 1 };
    (value & mask).count_ones() % 2 == 0
}

/// `a + b + carry`. The auxiliary carry is the carry out of bit 3.
pub fn add(flags: &mut Flags, a: u8, b: u8, carry: bool) -> u8 {
    let carry = carry as u16;
    let sum = a as u16 + b as u16 + carry;
    let result = sum as u8;
    flags.cy = sum > 0xff;
    flags.ac = (a as u16 & 0x0f) + (b as u16 & 0x0f) + carry > 0x0f;
    flags.set_zsp(result);
    result
}

/// `a - b - borrow`. Carry is set when a borrow is needed.
///
/// The processor subtracts by adding the complement of `b`, the auxiliary carry is the carry out
/// of bit 3 of that addition.
pub fn sub(flags: &mut Flags, a: u8, b: u8, borrow: bool) -> u8 {
    let borrow = borrow as u16;
    let result = (a as u16).wrapping_sub(b as u16).wrapping_sub(borrow) as u8;
    flags.cy = (a as u16) < b as u16 + borrow;
    flags.ac = (a as u16 & 0x0f) + (!b as u16 & 0x0f) + (1 - borrow) > 0x0f;
    flags.set_zsp(result);
    result
}

/// Increment, carry is not affected.
pub fn inr(flags: &mut Flags, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    flags.ac = result & 0x0f == 0;
    flags.set_zsp(result);
    result
}

/// Decrement, carry is not affected.
pub fn dcr(flags: &mut Flags, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    flags.ac = result & 0x0f != 0x0f;
    flags.set_zsp(result);
    result
}

pub fn and(flags: &mut Flags, a: u8, b: u8) -> u8 {
    let result = a & b;
    flags.cy = false;
    // the 8080 sets AC from the or of bit 3 of both operands
    flags.ac = (a | b) & 0x08 != 0;
    flags.set_zsp(result);
    result
}

pub fn xor(flags: &mut Flags, a: u8, b: u8) -> u8 {
    let result = a ^ b;
    flags.cy = false;
    flags.ac = false;
    flags.set_zsp(result);
    result
}

pub fn or(flags: &mut Flags, a: u8, b: u8) -> u8 {
    let result = a | b;
    flags.cy = false;
    flags.ac = false;
    flags.set_zsp(result);
    result
}

/// Decimal adjust of the accumulator after a BCD addition.
pub fn daa(flags: &mut Flags, a: u8) -> u8 {
    let low = a & 0x0f;
    let high = a >> 4;
    let mut correction = 0;
    let mut carry = flags.cy;

    if flags.ac || low > 9 {
        correction |= 0x06;
    }
    if flags.cy || high > 9 || (high >= 9 && low > 9) {
        correction |= 0x60;
        carry = true;
    }
    let result = add(flags, a, correction, false);
    flags.cy = carry;
    result
}

/// `HL + value`, only carry is affected.
pub fn dad(flags: &mut Flags, hl: u16, value: u16) -> u16 {
    let (result, carry) = hl.overflowing_add(value);
    flags.cy = carry;
    result
}

pub fn rlc(flags: &mut Flags, a: u8) -> u8 {
    flags.cy = a & 0x80 != 0;
    a.rotate_left(1)
}

pub fn rrc(flags: &mut Flags, a: u8) -> u8 {
    flags.cy = a & 0x01 != 0;
    a.rotate_right(1)
}

pub fn ral(flags: &mut Flags, a: u8) -> u8 {
    let carry = flags.cy as u8;
    flags.cy = a & 0x80 != 0;
    (a << 1) | carry
}

pub fn rar(flags: &mut Flags, a: u8) -> u8 {
    let carry = (flags.cy as u8) << 7;
    flags.cy = a & 0x01 != 0;
    (a >> 1) | carry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_of_bytes() {
        assert!(parity(0x00, 8));
        assert!(parity(0xff, 8));
        assert!(!parity(0x01, 8));
        assert!(parity(0x03, 8));
    }

    #[test]
    fn parity_only_counts_low_bits() {
        assert!(parity(0x0100, 8));
        assert!(!parity(0x0100, 16));
        assert!(!parity(0x07, 4));
    }

    #[test]
    fn add_sets_carry_and_aux_carry() {
        let mut flags = Flags::default();
        assert_eq!(add(&mut flags, 0xff, 0x01, false), 0x00);
        assert!(flags.cy);
        assert!(flags.ac);
        assert!(flags.z);
        assert!(flags.p);
    }

    #[test]
    fn add_aux_carry_from_low_nibble_only() {
        let mut flags = Flags::default();
        assert_eq!(add(&mut flags, 0x2e, 0x74, false), 0xa2);
        assert!(!flags.cy);
        assert!(flags.ac);
        assert!(flags.s);

        assert_eq!(add(&mut flags, 0x20, 0x70, false), 0x90);
        assert!(!flags.ac);
    }

    #[test]
    fn add_with_carry_in() {
        let mut flags = Flags::default();
        assert_eq!(add(&mut flags, 0x3d, 0x42, true), 0x80);
        assert!(!flags.cy);
        assert!(flags.ac);
        assert!(flags.s);
    }

    #[test]
    fn sub_to_zero_clears_carry() {
        let mut flags = Flags::default();
        assert_eq!(sub(&mut flags, 0x3e, 0x3e, false), 0x00);
        assert!(!flags.cy);
        assert!(flags.ac);
        assert!(flags.z);
    }

    #[test]
    fn sub_with_borrow_out() {
        let mut flags = Flags::default();
        assert_eq!(sub(&mut flags, 0x02, 0x05, false), 0xfd);
        assert!(flags.cy);
        assert!(!flags.ac);
        assert!(flags.s);
    }

    #[test]
    fn sub_with_borrow_in() {
        let mut flags = Flags::default();
        assert_eq!(sub(&mut flags, 0x04, 0x02, true), 0x01);
        assert!(!flags.cy);
        assert_eq!(sub(&mut flags, 0x04, 0x04, true), 0xff);
        assert!(flags.cy);
    }

    #[test]
    fn increment_wraps_and_keeps_carry() {
        let mut flags = Flags { cy: true, ..Default::default() };
        assert_eq!(inr(&mut flags, 0xff), 0x00);
        assert!(flags.z);
        assert!(flags.ac);
        assert!(flags.cy);
    }

    #[test]
    fn decrement_aux_carry() {
        let mut flags = Flags::default();
        assert_eq!(dcr(&mut flags, 0x10), 0x0f);
        assert!(!flags.ac);
        assert_eq!(dcr(&mut flags, 0x11), 0x10);
        assert!(flags.ac);
        assert_eq!(dcr(&mut flags, 0x00), 0xff);
        assert!(flags.s);
        assert!(!flags.cy);
    }

    #[test]
    fn logic_clears_carry() {
        let mut flags = Flags { cy: true, ac: true, ..Default::default() };
        assert_eq!(xor(&mut flags, 0x5c, 0x78), 0x24);
        assert!(!flags.cy);
        assert!(!flags.ac);

        let mut flags = Flags { cy: true, ..Default::default() };
        assert_eq!(or(&mut flags, 0x33, 0x0f), 0x3f);
        assert!(!flags.cy);

        let mut flags = Flags { cy: true, ..Default::default() };
        assert_eq!(and(&mut flags, 0xfc, 0x0f), 0x0c);
        assert!(!flags.cy);
        assert!(flags.ac);
        assert_eq!(and(&mut flags, 0xf0, 0x07), 0x00);
        assert!(!flags.ac);
        assert!(flags.z);
    }

    #[test]
    fn decimal_adjust() {
        // example from the 8080 programming manual
        let mut flags = Flags::default();
        assert_eq!(daa(&mut flags, 0x9b), 0x01);
        assert!(flags.cy);
        assert!(flags.ac);
    }

    #[test]
    fn decimal_adjust_after_bcd_addition() {
        let mut flags = Flags::default();
        let sum = add(&mut flags, 0x38, 0x45, false);
        assert_eq!(daa(&mut flags, sum), 0x83);
        assert!(!flags.cy);

        let sum = add(&mut flags, 0x29, 0x19, false);
        assert!(flags.ac);
        assert_eq!(daa(&mut flags, sum), 0x48);
    }

    #[test]
    fn double_add() {
        let mut flags = Flags::default();
        assert_eq!(dad(&mut flags, 0xa17b, 0x339f), 0xd51a);
        assert!(!flags.cy);
        assert_eq!(dad(&mut flags, 0xffff, 0x0002), 0x0001);
        assert!(flags.cy);
    }

    #[test]
    fn rotations() {
        let mut flags = Flags::default();
        assert_eq!(rlc(&mut flags, 0xf2), 0xe5);
        assert!(flags.cy);
        assert_eq!(rrc(&mut flags, 0xf2), 0x79);
        assert!(!flags.cy);

        let mut flags = Flags::default();
        assert_eq!(ral(&mut flags, 0xb5), 0x6a);
        assert!(flags.cy);
        let mut flags = Flags::default();
        assert_eq!(rar(&mut flags, 0x6a), 0x35);
        assert!(!flags.cy);
        let mut flags = Flags { cy: true, ..Default::default() };
        assert_eq!(rar(&mut flags, 0x6a), 0xb5);
    }
}
