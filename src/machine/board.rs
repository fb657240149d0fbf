/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::mem;

use crate::bus::DataBus;
use crate::config::MachineConfig;
use crate::error::MachineError;
use super::events::{PortEvent, SoundLatches};
use super::inputs::InputLatches;
use super::shift_register::ShiftRegister;
use super::video::VRAM_SIZE;

/// ROM, work RAM and video RAM.
pub const MEMORY_SIZE: usize = 0x4000;
pub const ROM_SIZE: usize = 0x2000;
pub const RAM_START: u16 = 0x2000;
pub const VRAM_START: u16 = 0x2400;
/// Start of the alias of RAM, reads between here and `OPEN_BUS_START` see `addr - 0x2000`.
pub const MIRROR_START: u16 = 0x4000;
/// Nothing answers at or above this address.
pub const OPEN_BUS_START: u16 = 0x6000;
const MIRROR_OFFSET: u16 = MIRROR_START - RAM_START;
const OPEN_BUS_VALUE: u8 = 0x00;
const UNKNOWN_PORT_VALUE: u8 = 0xff;

/// Everything the processor reaches on the Space Invaders board: memory map and I/O ports.
pub struct InvadersBus {
    memory: Box<[u8]>,
    shift: ShiftRegister,
    inputs: InputLatches,
    sound: SoundLatches,
    events: Vec<PortEvent>,
    mirror_writes: bool,
}

impl InvadersBus {
    pub fn new(config: &MachineConfig) -> InvadersBus {
        InvadersBus {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
            shift: ShiftRegister::new(),
            inputs: InputLatches::new(config.dip_switches),
            sound: SoundLatches::default(),
            events: Vec::new(),
            mirror_writes: config.mirror_writes,
        }
    }

    /// Copies a flat image at address 0.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), MachineError> {
        if image.len() > ROM_SIZE {
            return Err(MachineError::RomTooLarge { size: image.len(), max: ROM_SIZE });
        }
        self.memory[..image.len()].copy_from_slice(image);
        Ok(())
    }

    pub fn vram(&self) -> &[u8] {
        let start = VRAM_START as usize;
        &self.memory[start..start + VRAM_SIZE]
    }

    pub fn inputs(&self) -> &InputLatches {
        &self.inputs
    }

    pub fn shift_register(&self) -> &ShiftRegister {
        &self.shift
    }

    /// Returns the events raised since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<PortEvent> {
        mem::take(&mut self.events)
    }
}

impl DataBus for InvadersBus {
    fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            OPEN_BUS_START..=0xffff => OPEN_BUS_VALUE,
            MIRROR_START..=0x5fff => self.memory[(addr - MIRROR_OFFSET) as usize],
            _ => self.memory[addr as usize],
        }
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            RAM_START..=0x3fff => self.memory[addr as usize] = value,
            MIRROR_START..=0x5fff if self.mirror_writes => {
                self.memory[(addr - MIRROR_OFFSET) as usize] = value
            }
            _ => log::trace!("write of {:02x} at {:04x} dropped", value, addr),
        }
    }

    fn read_port(&self, port: u8) -> u8 {
        match port {
            0 => UNKNOWN_PORT_VALUE,
            1 => self.inputs.port1(),
            2 => self.inputs.port2(),
            3 => self.shift.result(),
            _ => {
                log::warn!("read of unknown port {:02x}", port);
                UNKNOWN_PORT_VALUE
            }
        }
    }

    fn write_port(&mut self, port: u8, value: u8) {
        match port {
            2 => self.shift.set_offset(value),
            4 => self.shift.push(value),
            3 | 5 => self.events.extend(self.sound.write(port, value)),
            6 => self.events.push(PortEvent::Watchdog),
            _ => log::warn!("write of {:02x} to unknown port {:02x}", value, port),
        }
    }
}
