/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

mod opcodes;
mod table;

pub use self::opcodes::{Condition, OpCode, Reg16, Register};
pub use self::table::{op_info, OpInfo, OPCODE_TABLE};

use std::io::BufRead;

use crate::error::DecodeError;

use self::opcodes::OpCode::*;

/// Read a slice of bytes and returns an opcode, possibly with its data.
///
/// The first byte is the opcode, immediate data follows in little-endian order. Parsing fails if
/// the byte is outside the documented instruction set or if the slice is too short to hold the
/// operands.
pub fn read_opcode(bytes: &[u8]) -> Result<OpCode, DecodeError> {
    let opcode = *bytes.first().ok_or(DecodeError::UnexpectedEndOfInput)?;
    let info = op_info(opcode).ok_or(DecodeError::UnknownOpcode(opcode))?;
    if bytes.len() < info.size as usize {
        return Err(DecodeError::UnexpectedEndOfInput);
    }
    let data_byte = bytes.get(1).copied().unwrap_or_default();
    let data_u16 = u16::from_le_bytes([data_byte, bytes.get(2).copied().unwrap_or_default()]);
    decode(opcode, data_byte, data_u16).ok_or(DecodeError::UnknownOpcode(opcode))
}

/// Builds the `OpCode` for `opcode` given its (possibly unused) operands.
///
/// Returns `None` for undocumented opcodes.
pub fn decode(opcode: u8, data_byte: u8, data_u16: u16) -> Option<OpCode> {
    let ddd = (opcode >> 3) & 0x07;
    let sss = opcode & 0x07;
    let op = match opcode {
        0x00 => Nop,
        0x01 | 0x11 | 0x21 | 0x31 => Lxi(pair(opcode), data_u16),
        0x02 => StaxB,
        0x12 => StaxD,
        0x0a => LdaxB,
        0x1a => LdaxD,
        0x03 | 0x13 | 0x23 | 0x33 => Inx(pair(opcode)),
        0x0b | 0x1b | 0x2b | 0x3b => Dcx(pair(opcode)),
        0x09 | 0x19 | 0x29 | 0x39 => Dad(pair(opcode)),
        0x34 => InrM,
        0x35 => DcrM,
        0x36 => MviM(data_byte),
        0x04..=0x3f if sss == 4 => Inr(register(ddd)?),
        0x04..=0x3f if sss == 5 => Dcr(register(ddd)?),
        0x04..=0x3f if sss == 6 => Mvi(register(ddd)?, data_byte),
        0x07 => Rlc,
        0x0f => Rrc,
        0x17 => Ral,
        0x1f => Rar,
        0x22 => Shld(data_u16),
        0x27 => Daa,
        0x2a => Lhld(data_u16),
        0x2f => Cma,
        0x32 => Sta(data_u16),
        0x37 => Stc,
        0x3a => Lda(data_u16),
        0x3f => Cmc,

        0x76 => Hlt,
        0x70..=0x77 => MovToM(register(sss)?),
        0x40..=0x7f if sss == 6 => MovFromM(register(ddd)?),
        0x40..=0x7f => Mov(register(ddd)?, register(sss)?),

        0x80..=0xbf => match (ddd, register(sss)) {
            (0, Some(reg)) => Add(reg),
            (0, None) => AddM,
            (1, Some(reg)) => Adc(reg),
            (1, None) => AdcM,
            (2, Some(reg)) => Sub(reg),
            (2, None) => SubM,
            (3, Some(reg)) => Sbb(reg),
            (3, None) => SbbM,
            (4, Some(reg)) => Ana(reg),
            (4, None) => AnaM,
            (5, Some(reg)) => Xra(reg),
            (5, None) => XraM,
            (6, Some(reg)) => Ora(reg),
            (6, None) => OraM,
            (_, Some(reg)) => Cmp(reg),
            (_, None) => CmpM,
        },

        0xc3 => Jmp(data_u16),
        0xcd => Call(data_u16),
        0xc9 => Ret,
        0xc1 | 0xd1 | 0xe1 => Pop(pair(opcode)),
        0xf1 => PopPSW,
        0xc5 | 0xd5 | 0xe5 => Push(pair(opcode)),
        0xf5 => PushPSW,
        0xd3 => Out(data_byte),
        0xdb => In(data_byte),
        0xe3 => Xthl,
        0xe9 => Pchl,
        0xeb => Xchg,
        0xf3 => Di,
        0xf9 => Sphl,
        0xfb => Ei,
        0xc0..=0xff => match sss {
            0 => RetIf(Condition::from_bits(ddd)),
            2 => JmpIf(Condition::from_bits(ddd), data_u16),
            4 => CallIf(Condition::from_bits(ddd), data_u16),
            6 => match ddd {
                0 => Adi(data_byte),
                1 => Aci(data_byte),
                2 => Sui(data_byte),
                3 => Sbi(data_byte),
                4 => Ani(data_byte),
                5 => Xri(data_byte),
                6 => Ori(data_byte),
                _ => Cpi(data_byte),
            },
            7 => Rst(ddd),
            _ => return None,
        },
        _ => return None,
    };
    Some(op)
}

fn register(bits: u8) -> Option<Register> {
    match bits {
        0 => Some(Register::B),
        1 => Some(Register::C),
        2 => Some(Register::D),
        3 => Some(Register::E),
        4 => Some(Register::H),
        5 => Some(Register::L),
        7 => Some(Register::A),
        // 6 addresses memory through HL
        _ => None,
    }
}

fn pair(opcode: u8) -> Reg16 {
    match (opcode >> 4) & 0x03 {
        0 => Reg16::B,
        1 => Reg16::D,
        2 => Reg16::H,
        _ => Reg16::SP,
    }
}

/// Disassembles the instruction at `offset` in `buffer`.
///
/// Returns the instruction text and its length in bytes. Undocumented opcodes and instructions
/// truncated by the end of the buffer are rendered as a single data byte so that a listing can
/// always move forward.
pub fn disassemble(buffer: &[u8], offset: usize) -> (String, u16) {
    let bytes = buffer.get(offset..).unwrap_or_default();
    match read_opcode(bytes) {
        Ok(op) => {
            let size = op_info(bytes[0]).map_or(1, |info| info.size as u16);
            (op.to_string(), size)
        }
        Err(_) => match bytes.first() {
            Some(byte) => (format!("DB ${:02x}", byte), 1),
            None => (String::new(), 0),
        },
    }
}

/// Iterator reading opcodes from a buffered reader.
///
/// Each item is the offset of the instruction in the stream with the decoding result. A failed
/// decoding consumes a single byte.
pub struct OpCodes<U: BufRead> {
    reader: U,
    offset: usize,
}

impl<U: BufRead> OpCodes<U> {
    pub fn new(reader: U) -> OpCodes<U> {
        OpCodes { reader, offset: 0 }
    }
}

impl<U: BufRead> Iterator for OpCodes<U> {
    type Item = (usize, Result<OpCode, DecodeError>);

    fn next(&mut self) -> Option<Self::Item> {
        let (decoded, consumed) = match self.reader.fill_buf() {
            Ok([]) => return None,
            Ok(buf) => {
                // a buffer boundary may split an instruction
                let mut window = [0u8; 3];
                let available = buf.len().min(3);
                window[..available].copy_from_slice(&buf[..available]);
                let size = op_info(window[0]).map_or(1, |info| info.size as usize);
                if available < size {
                    let chunk = self.read_up_to(&mut window, available, size);
                    (read_opcode(&window[..chunk]), chunk.max(1))
                } else {
                    let result = read_opcode(&window[..available]);
                    let consumed = if result.is_ok() { size } else { 1 };
                    self.reader.consume(consumed);
                    (result, consumed)
                }
            }
            Err(e) => {
                log::warn!("opcode stream read failed at offset {}: {}", self.offset, e);
                return None;
            }
        };
        let offset = self.offset;
        self.offset += consumed;
        Some((offset, decoded))
    }
}

impl<U: BufRead> OpCodes<U> {
    fn read_up_to(&mut self, window: &mut [u8; 3], mut filled: usize, size: usize) -> usize {
        self.reader.consume(filled);
        while filled < size {
            match self.reader.fill_buf() {
                Ok(buf) if !buf.is_empty() => {
                    window[filled] = buf[0];
                    self.reader.consume(1);
                    filled += 1;
                }
                _ => break,
            }
        }
        filled
    }
}
