/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! # Intel 8080 emulator and Space Invaders board
//!
//! The main struct is [`Proc8080`](proc_state/struct.Proc8080.html) which emulates the state
//! of a 8080 processor (flags and registers). Memory and I/O ports are reached through the
//! [`DataBus`](bus/trait.DataBus.html) trait, so the same processor can run inside any machine:
//! [`FlatMemory`](bus/struct.FlatMemory.html) for plain programs, or the
//! [Space Invaders board](machine/index.html).
//!
//! ```
//! use invaders_8080::bus::{DataBus, FlatMemory};
//! use invaders_8080::proc_state::Proc8080;
//!
//! // MVI A,#$2a; OUT #$01; HLT
//! let mut memory = FlatMemory::with_program(&[0x3e, 0x2a, 0xd3, 0x01, 0x76]);
//! let mut cpu = Proc8080::new();
//! while !cpu.is_stopped() {
//!     cpu.emulate(&mut memory).unwrap();
//! }
//! assert_eq!(memory.outputs(), &[(0x01, 0x2a)]);
//! ```
//!
//! The [opcode module](opcode/index.html) decodes the same instruction set for tooling, see
//! [`disassemble`](opcode/fn.disassemble.html) and the `disassembler` binary.

pub mod bus;
pub mod config;
pub mod error;
pub mod machine;
pub mod opcode;
pub mod proc_state;
