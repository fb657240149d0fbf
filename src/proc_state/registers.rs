/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::bus::DataBus;
use crate::opcode::{Reg16, Register};

/// Register file of the 8080. Pairs BC, DE and HL are views over the 8 bit registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    pub fn apply_mov(&mut self, reg1: Register, reg2: Register) {
        let reg_value = self.reg_val(reg2);
        self.set_reg_val(reg1, reg_value);
    }

    pub fn reg_val(&self, reg: Register) -> u8 {
        match reg {
            Register::A => self.a,
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
            Register::E => self.e,
            Register::H => self.h,
            Register::L => self.l,
        }
    }

    pub fn set_reg_val(&mut self, reg: Register, value: u8) {
        match reg {
            Register::A => self.a = value,
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
            Register::E => self.e = value,
            Register::H => self.h = value,
            Register::L => self.l = value,
        }
    }

    pub fn reg_16_val(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::B => u16::from_be_bytes([self.b, self.c]),
            Reg16::D => u16::from_be_bytes([self.d, self.e]),
            Reg16::H => u16::from_be_bytes([self.h, self.l]),
            Reg16::SP => self.sp,
        }
    }

    pub fn set_reg_16_val(&mut self, reg: Reg16, value: u16) {
        let [high, low] = value.to_be_bytes();
        match reg {
            Reg16::B => {
                self.b = high;
                self.c = low;
            }
            Reg16::D => {
                self.d = high;
                self.e = low;
            }
            Reg16::H => {
                self.h = high;
                self.l = low;
            }
            Reg16::SP => self.sp = value,
        }
    }

    /// Address pointed by HL, the `M` operand of the instruction set.
    pub fn hl(&self) -> u16 {
        self.reg_16_val(Reg16::H)
    }

    /// Pushes `value` on the stack: high byte at SP-1, low byte at SP-2, then SP -= 2.
    pub fn push<Bus: DataBus>(&mut self, bus: &mut Bus, value: u16) {
        let [high, low] = value.to_be_bytes();
        bus.write_byte(self.sp.wrapping_sub(1), high);
        bus.write_byte(self.sp.wrapping_sub(2), low);
        self.sp = self.sp.wrapping_sub(2);
    }

    /// Pops a word from the stack: low byte at SP, high byte at SP+1, then SP += 2.
    pub fn pop<Bus: DataBus>(&mut self, bus: &Bus) -> u16 {
        let low = bus.read_byte(self.sp);
        let high = bus.read_byte(self.sp.wrapping_add(1));
        self.sp = self.sp.wrapping_add(2);
        u16::from_be_bytes([high, low])
    }
}

impl Default for Registers {
    fn default() -> Registers {
        Registers {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            sp: 0xffff,
            pc: 0,
        }
    }
}
