/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use super::alu::parity;

// Bit positions of the processor status word, as pushed by `PUSH PSW`.
const CARRY: u8 = 1 << 0;
const ALWAYS_SET: u8 = 1 << 1;
const PARITY: u8 = 1 << 2;
const AUX_CARRY: u8 = 1 << 4;
const ZERO: u8 = 1 << 6;
const SIGN: u8 = 1 << 7;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub z: bool,
    pub s: bool,
    pub p: bool,
    pub cy: bool,
    pub ac: bool,
}

impl Flags {
    /// Unpacks a status byte. Only bits 0, 2, 4, 6 and 7 carry information, the others are
    /// ignored.
    pub fn from_processor_status_word(psw: u8) -> Flags {
        Flags {
            z: psw & ZERO != 0,
            s: psw & SIGN != 0,
            p: psw & PARITY != 0,
            cy: psw & CARRY != 0,
            ac: psw & AUX_CARRY != 0,
        }
    }

    /// Packs the flags as `S Z 0 AC 0 P 1 CY`, from bit 7 down to bit 0.
    pub fn to_processor_status_word(&self) -> u8 {
        let mut psw = ALWAYS_SET;
        if self.cy {
            psw |= CARRY;
        }
        if self.p {
            psw |= PARITY;
        }
        if self.ac {
            psw |= AUX_CARRY;
        }
        if self.z {
            psw |= ZERO;
        }
        if self.s {
            psw |= SIGN;
        }
        psw
    }

    /// Sets zero, sign and parity from an 8 bit result.
    pub fn set_zsp(&mut self, result: u8) {
        self.z = result == 0;
        self.s = result & 0x80 != 0;
        self.p = parity(result as u16, 8);
    }
}
