/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use thiserror::Error;

/// Failure to turn bytes into an [`OpCode`](../opcode/enum.OpCode.html).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("opcode 0x{0:02x} is not part of the instruction set")]
    UnknownOpcode(u8),
}

/// Fatal condition raised by the interpreter. Emulation must not continue past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulationError {
    #[error("unimplemented opcode 0x{opcode:02x} at 0x{address:04x}")]
    UnimplementedOpcode { opcode: u8, address: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("rom image of {size} bytes does not fit in the {max} bytes of rom space")]
    RomTooLarge { size: usize, max: usize },
    #[error(transparent)]
    Emulation(#[from] EmulationError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
