/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// Size of the 8080 address space.
pub const ADDRESS_SPACE: usize = 0x10000;

/// Interface used by [`Proc8080`](../proc_state/struct.Proc8080.html) for every access outside of
/// its registers.
///
/// The 8080 has two address spaces: 64KB of memory, read and written by loads, stores, stack
/// operations and instruction fetches, and 256 I/O ports reached only through the `IN` and `OUT`
/// instructions. Reading and writing a port can do anything depending on the hardware (playing a
/// sound, asking specialized hardware to perform a computation, reading user keypresses...).
///
/// The processor never owns its memory: a machine implements this trait to decide what lives at
/// each address (ROM, RAM, mirrors, nothing at all).
pub trait DataBus {
    /// Reads the byte at `addr`.
    fn read_byte(&self, addr: u16) -> u8;

    /// Writes `value` at `addr`. The bus is free to ignore the write.
    fn write_byte(&mut self, addr: u16, value: u8);

    /// Called by `Proc8080` when it applies a `IN` instruction
    fn read_port(&self, port: u8) -> u8;

    /// Called by `Proc8080` when it applies a `OUT` instruction
    fn write_port(&mut self, port: u8, value: u8);

    /// Reads a little-endian word at `addr`, wrapping at the end of the address space.
    fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read_byte(addr), self.read_byte(addr.wrapping_add(1))])
    }

    /// Writes a little-endian word at `addr`, wrapping at the end of the address space.
    fn write_word(&mut self, addr: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write_byte(addr, low);
        self.write_byte(addr.wrapping_add(1), high);
    }
}

/// 64KB of plain RAM with 256 input ports and a log of port writes.
///
/// This is the simplest possible machine: nothing is mirrored or read-only. It is useful to run
/// test programs or to check the processor against hand-written code.
pub struct FlatMemory {
    memory: Box<[u8]>,
    inputs: [u8; 256],
    outputs: Vec<(u8, u8)>,
}

impl FlatMemory {
    pub fn new() -> FlatMemory {
        FlatMemory {
            memory: vec![0; ADDRESS_SPACE].into_boxed_slice(),
            inputs: [0; 256],
            outputs: Vec::new(),
        }
    }

    /// Builds a memory holding `program` at address 0.
    pub fn with_program(program: &[u8]) -> FlatMemory {
        let mut memory = FlatMemory::new();
        memory.load(0, program);
        memory
    }

    /// Copies `bytes` at `offset`. Bytes past the end of the address space are dropped.
    pub fn load(&mut self, offset: u16, bytes: &[u8]) {
        let start = offset as usize;
        let len = bytes.len().min(ADDRESS_SPACE - start);
        self.memory[start..start + len].copy_from_slice(&bytes[..len]);
    }

    /// Sets the value returned by `IN port`.
    pub fn set_input(&mut self, port: u8, value: u8) {
        self.inputs[port as usize] = value;
    }

    /// Every `OUT` executed so far, in order, as `(port, value)`.
    pub fn outputs(&self) -> &[(u8, u8)] {
        &self.outputs
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }
}

impl Default for FlatMemory {
    fn default() -> FlatMemory {
        FlatMemory::new()
    }
}

impl DataBus for FlatMemory {
    fn read_byte(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn read_port(&self, port: u8) -> u8 {
        self.inputs[port as usize]
    }

    fn write_port(&mut self, port: u8, value: u8) {
        self.outputs.push((port, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_little_endian() {
        let mut memory = FlatMemory::new();
        memory.write_word(0x1000, 0xbeef);
        assert_eq!(memory.read_byte(0x1000), 0xef);
        assert_eq!(memory.read_byte(0x1001), 0xbe);
        assert_eq!(memory.read_word(0x1000), 0xbeef);
    }

    #[test]
    fn words_wrap_around_the_address_space() {
        let mut memory = FlatMemory::new();
        memory.write_word(0xffff, 0x1234);
        assert_eq!(memory.read_byte(0xffff), 0x34);
        assert_eq!(memory.read_byte(0x0000), 0x12);
    }

    #[test]
    fn load_truncates_at_the_end_of_memory() {
        let mut memory = FlatMemory::new();
        memory.load(0xfffe, &[1, 2, 3, 4]);
        assert_eq!(memory.read_byte(0xfffe), 1);
        assert_eq!(memory.read_byte(0xffff), 2);
        assert_eq!(memory.read_byte(0x0000), 0);
    }

    #[test]
    fn ports() {
        let mut memory = FlatMemory::new();
        memory.set_input(3, 0x42);
        memory.write_port(6, 0x01);
        assert_eq!(memory.read_port(3), 0x42);
        assert_eq!(memory.read_port(4), 0x00);
        assert_eq!(memory.outputs(), &[(6, 0x01)]);
    }
}
