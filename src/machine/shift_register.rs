/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// The 16 bit shifter of the board, used by the game to draw sprites at any horizontal position.
///
/// Bytes written to port 4 enter from the top, the previous top byte moving to the bottom. Port 3
/// reads back an 8 bit window whose position is set by writing port 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftRegister {
    msb: u8,
    lsb: u8,
    offset: u8,
}

impl ShiftRegister {
    pub fn new() -> ShiftRegister {
        Default::default()
    }

    /// Port 4.
    pub fn push(&mut self, value: u8) {
        self.lsb = self.msb;
        self.msb = value;
    }

    /// Port 2, only the 3 low bits are used.
    pub fn set_offset(&mut self, value: u8) {
        self.offset = value & 0x07;
    }

    /// Port 3.
    pub fn result(&self) -> u8 {
        let value = u16::from_be_bytes([self.msb, self.lsb]);
        (value >> (8 - self.offset)) as u8
    }
}
