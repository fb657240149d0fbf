/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Per-opcode metadata shared by the interpreter and the disassembler.
//!
//! The table is indexed by the opcode byte. `None` marks the undocumented part of the opcode
//! space, which the interpreter refuses to execute.

/// Static description of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    /// Instruction length in bytes, opcode included (1, 2 or 3).
    pub size: u8,
    /// Clock states consumed. For conditional calls and returns this is the not-taken cost.
    pub cycles: u8,
    /// Clock states consumed by a conditional call or return when its condition holds.
    pub cycles_taken: u8,
}

const fn op(size: u8, cycles: u8) -> Option<OpInfo> {
    Some(OpInfo { size, cycles, cycles_taken: cycles })
}

const fn branch(size: u8, cycles: u8, cycles_taken: u8) -> Option<OpInfo> {
    Some(OpInfo { size, cycles, cycles_taken })
}

const fn info(opcode: u8) -> Option<OpInfo> {
    // bits 0..2 select the source register or the kind of branch
    let sss = opcode & 0x07;
    match opcode {
        0x00 => op(1, 4), // NOP
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => None,
        0x01 | 0x11 | 0x21 | 0x31 => op(3, 10), // LXI
        0x02 | 0x12 => op(1, 7), // STAX
        0x0a | 0x1a => op(1, 7), // LDAX
        0x22 => op(3, 16), // SHLD
        0x2a => op(3, 16), // LHLD
        0x32 => op(3, 13), // STA
        0x3a => op(3, 13), // LDA
        0x03 | 0x13 | 0x23 | 0x33 => op(1, 5), // INX
        0x0b | 0x1b | 0x2b | 0x3b => op(1, 5), // DCX
        0x09 | 0x19 | 0x29 | 0x39 => op(1, 10), // DAD
        0x34 => op(1, 10), // INR
        0x35 => op(1, 10), // DCR
        0x36 => op(2, 10), // MVI
        0x04..=0x3f if sss == 4 => op(1, 5), // INR
        0x04..=0x3f if sss == 5 => op(1, 5), // DCR
        0x04..=0x3f if sss == 6 => op(2, 7), // MVI
        0x07 => op(1, 4), // RLC
        0x0f => op(1, 4), // RRC
        0x17 => op(1, 4), // RAL
        0x1f => op(1, 4), // RAR
        0x27 => op(1, 4), // DAA
        0x2f => op(1, 4), // CMA
        0x37 => op(1, 4), // STC
        0x3f => op(1, 4), // CMC

        0x76 => op(1, 7), // HLT
        0x70..=0x77 => op(1, 7), // MOV
        0x40..=0x7f if sss == 6 => op(1, 7), // MOV
        0x40..=0x7f => op(1, 5), // MOV

        0x80..=0xbf if sss == 6 => op(1, 7), // ADD ADC SUB SBB ANA XRA ORA CMP
        0x80..=0xbf => op(1, 4), // ADD ADC SUB SBB ANA XRA ORA CMP

        0xc3 => op(3, 10), // JMP
        0xcd => op(3, 17), // CALL
        0xc9 => op(1, 10), // RET
        0xcb | 0xd9 | 0xdd | 0xed | 0xfd => None,
        0xc1 | 0xd1 | 0xe1 | 0xf1 => op(1, 10), // POP
        0xc5 | 0xd5 | 0xe5 | 0xf5 => op(1, 11), // PUSH
        0xd3 => op(2, 10), // OUT
        0xdb => op(2, 10), // IN
        0xe3 => op(1, 18), // XTHL
        0xe9 => op(1, 5), // PCHL
        0xeb => op(1, 4), // XCHG
        0xf3 => op(1, 4), // DI
        0xf9 => op(1, 5), // SPHL
        0xfb => op(1, 4), // EI
        0xc0..=0xff if sss == 0 => branch(1, 5, 11), // Rcc
        0xc0..=0xff if sss == 2 => op(3, 10), // Jcc
        0xc0..=0xff if sss == 4 => branch(3, 11, 17), // Ccc
        0xc0..=0xff if sss == 6 => op(2, 7), // ADI ACI SUI SBI ANI XRI ORI CPI
        0xc0..=0xff if sss == 7 => op(1, 11), // RST
        _ => None,
    }
}

const fn build() -> [Option<OpInfo>; 256] {
    let mut table = [None; 256];
    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = info(opcode as u8);
        opcode += 1;
    }
    table
}

/// Metadata for every opcode byte, `None` for the undocumented ones.
pub static OPCODE_TABLE: [Option<OpInfo>; 256] = build();

/// Looks up the metadata of `opcode`.
pub fn op_info(opcode: u8) -> Option<&'static OpInfo> {
    OPCODE_TABLE[opcode as usize].as_ref()
}
