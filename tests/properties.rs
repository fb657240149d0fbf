/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use invaders_8080::bus::{DataBus, FlatMemory};
use invaders_8080::machine::ShiftRegister;
use invaders_8080::opcode::{self, Reg16};
use invaders_8080::proc_state::alu::parity;
use invaders_8080::proc_state::{Flags, Registers};
use proptest::prelude::*;

fn any_pair() -> impl Strategy<Value = Reg16> {
    prop_oneof![Just(Reg16::B), Just(Reg16::D), Just(Reg16::H), Just(Reg16::SP)]
}

fn any_flags() -> impl Strategy<Value = Flags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(z, s, p, cy, ac)| Flags { z, s, p, cy, ac })
}

proptest! {
    #[test]
    fn parity_is_even_popcount(value in any::<u8>()) {
        prop_assert_eq!(parity(value as u16, 8), value.count_ones() % 2 == 0);
    }

    #[test]
    fn pair_round_trip(pair in any_pair(), value in any::<u16>()) {
        let mut registers = Registers::default();
        registers.set_reg_16_val(pair, value);
        prop_assert_eq!(registers.reg_16_val(pair), value);
    }

    #[test]
    fn push_pop_round_trip(sp in any::<u16>(), value in any::<u16>()) {
        let mut memory = FlatMemory::new();
        let mut registers = Registers { sp, ..Default::default() };
        registers.push(&mut memory, value);
        prop_assert_eq!(registers.sp, sp.wrapping_sub(2));
        prop_assert_eq!(memory.read_word(sp.wrapping_sub(2)), value);
        prop_assert_eq!(registers.pop(&memory), value);
        prop_assert_eq!(registers.sp, sp);
    }

    #[test]
    fn processor_status_word_round_trip(flags in any_flags()) {
        let psw = flags.to_processor_status_word();
        prop_assert_eq!(psw & 0b0010_1010, 0b0000_0010);
        prop_assert_eq!(Flags::from_processor_status_word(psw), flags);
    }

    #[test]
    fn shift_register_window(first in any::<u8>(), second in any::<u8>(), offset in 0u8..8) {
        let mut shift = ShiftRegister::new();
        shift.push(first);
        shift.push(second);
        shift.set_offset(offset);
        let value = ((second as u16) << 8) | first as u16;
        prop_assert_eq!(shift.result(), ((value >> (8 - offset)) & 0xff) as u8);
    }

    #[test]
    fn listing_always_moves_forward(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let mut offset = 0;
        while offset < bytes.len() {
            let (text, size) = opcode::disassemble(&bytes, offset);
            prop_assert!(!text.is_empty());
            prop_assert!((1..=3).contains(&size));
            offset += size as usize;
        }
        prop_assert_eq!(offset, bytes.len());
    }
}
