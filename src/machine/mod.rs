/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The Space Invaders arcade board.
//!
//! [`SpaceInvaders`](struct.SpaceInvaders.html) owns the processor and the
//! [`InvadersBus`](struct.InvadersBus.html), and runs the game one video frame at a time:
//!
//! ```no_run
//! use invaders_8080::machine::{Button, SpaceInvaders};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut machine = SpaceInvaders::new();
//! machine.load_rom(&std::fs::read("invaders.rom")?)?;
//! let inputs = machine.inputs();
//! inputs.press(Button::Coin);
//! loop {
//!     machine.run_frame()?;
//!     let _pixels = machine.framebuffer().snapshot();
//! }
//! # }
//! ```

mod board;
mod events;
mod inputs;
mod shift_register;
mod video;

pub use self::board::{InvadersBus, MEMORY_SIZE, ROM_SIZE, VRAM_START};
pub use self::events::PortEvent;
pub use self::inputs::{Button, InputLatches};
pub use self::shift_register::ShiftRegister;
pub use self::video::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::config::MachineConfig;
use crate::error::MachineError;
use crate::proc_state::{Proc8080, INTERRUPT_CYCLES};

/// Interrupt raised when the beam reaches the middle of the screen.
pub const MID_SCREEN_RST: u8 = 1;
/// Interrupt raised at the start of vertical blank.
pub const VBLANK_RST: u8 = 2;

pub struct SpaceInvaders {
    cpu: Proc8080,
    bus: InvadersBus,
    framebuffer: FrameBuffer,
    config: MachineConfig,
    /// Cycles run past the end of the previous half frame, including the cost of the interrupt
    /// accepted at its end.
    overshoot: u32,
    frames: u64,
}

impl SpaceInvaders {
    pub fn new() -> SpaceInvaders {
        SpaceInvaders::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> SpaceInvaders {
        SpaceInvaders {
            cpu: Proc8080::new(),
            bus: InvadersBus::new(&config),
            framebuffer: FrameBuffer::new(),
            config,
            overshoot: 0,
            frames: 0,
        }
    }

    /// Copies a flat ROM image at address 0.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), MachineError> {
        self.bus.load_rom(image)?;
        log::debug!("loaded {} bytes of rom", image.len());
        Ok(())
    }

    /// Runs one video frame: half a frame of instructions, the mid-screen interrupt, the other
    /// half and the vblank interrupt. The frame buffer is redrawn at the end.
    ///
    /// # Errors
    /// Stops on the first unimplemented opcode. The machine is left as it was when the opcode
    /// was reached.
    pub fn run_frame(&mut self) -> Result<(), MachineError> {
        for &vector in &[MID_SCREEN_RST, VBLANK_RST] {
            self.run_half_frame()?;
            if self.cpu.interrupt(&mut self.bus, vector) {
                self.overshoot += INTERRUPT_CYCLES;
            }
        }
        self.framebuffer.render(self.bus.vram(), self.config.colour_overlay);
        self.frames += 1;
        log::debug!("frame {} done at cycle {}", self.frames, self.cpu.cycles());
        Ok(())
    }

    fn run_half_frame(&mut self) -> Result<(), MachineError> {
        let budget = self.config.cycles_per_half_frame().saturating_sub(self.overshoot);
        let mut elapsed = 0;
        while elapsed < budget {
            match self.cpu.emulate(&mut self.bus) {
                Ok(step) => elapsed += step.cycles,
                Err(e) => {
                    log::error!("emulation stopped: {}", e);
                    return Err(e.into());
                }
            }
        }
        self.overshoot = elapsed - budget;
        Ok(())
    }

    pub fn cpu(&self) -> &Proc8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Proc8080 {
        &mut self.cpu
    }

    pub fn bus(&self) -> &InvadersBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut InvadersBus {
        &mut self.bus
    }

    /// A handle on the input latches, usable from another thread.
    pub fn inputs(&self) -> InputLatches {
        self.bus.inputs().clone()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Peripheral events raised since the last call.
    pub fn take_events(&mut self) -> Vec<PortEvent> {
        self.bus.take_events()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Frames run since the machine was built.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for SpaceInvaders {
    fn default() -> SpaceInvaders {
        SpaceInvaders::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::DataBus;

    // EI; JMP $0000
    const SPIN: [u8; 4] = [0xfb, 0xc3, 0x00, 0x00];

    #[test]
    fn frame_budget() {
        let mut machine = SpaceInvaders::new();
        machine.load_rom(&SPIN).unwrap();
        machine.cpu_mut().registers_mut().sp = 0x2400;
        machine.run_frame().unwrap();

        let cycles = machine.cpu().cycles();
        let frame = machine.config().cycles_per_frame() as u64;
        // the last interrupt and at most one instruction spill into the next frame
        assert!(cycles >= frame);
        assert!(cycles < frame + INTERRUPT_CYCLES as u64 + 10);
        assert_eq!(machine.frames(), 1);
    }

    #[test]
    fn overshoot_carries_over() {
        let mut machine = SpaceInvaders::new();
        // JMP $0000 with interrupts disabled
        machine.load_rom(&[0xc3, 0x00, 0x00]).unwrap();
        for _ in 0..10 {
            machine.run_frame().unwrap();
        }
        let frames = 10 * machine.config().cycles_per_frame() as u64;
        let cycles = machine.cpu().cycles();
        assert!(cycles >= frames && cycles < frames + 10);
    }

    #[test]
    fn interrupt_cycles_count_against_the_frame() {
        let mut machine = SpaceInvaders::new();
        // both handlers are EI; RET
        let mut rom = vec![0; 0x12];
        rom[..4].copy_from_slice(&SPIN);
        rom[0x08..0x0a].copy_from_slice(&[0xfb, 0xc9]);
        rom[0x10..0x12].copy_from_slice(&[0xfb, 0xc9]);
        machine.load_rom(&rom).unwrap();
        machine.cpu_mut().registers_mut().sp = 0x2400;

        for _ in 0..1000 {
            machine.run_frame().unwrap();
        }
        let frames = 1000 * machine.config().cycles_per_frame() as u64;
        let cycles = machine.cpu().cycles();
        assert!(cycles >= frames);
        assert!(cycles - frames < INTERRUPT_CYCLES as u64 + 10, "drift of {}", cycles - frames);
    }

    #[test]
    fn interrupts_are_delivered_in_order() {
        let mut machine = SpaceInvaders::new();
        // RST 1 and RST 2 handlers store their number in RAM, then return without enabling
        // interrupts again
        let mut rom = vec![0; 0x20];
        rom[..4].copy_from_slice(&SPIN);
        rom[0x08..0x0c].copy_from_slice(&[0x3e, 0x01, 0x32, 0x00]);
        rom[0x0c..0x0e].copy_from_slice(&[0x20, 0xc9]);
        rom[0x10..0x14].copy_from_slice(&[0x3e, 0x02, 0x32, 0x01]);
        rom[0x14..0x16].copy_from_slice(&[0x20, 0xc9]);
        machine.load_rom(&rom).unwrap();
        machine.cpu_mut().registers_mut().sp = 0x2400;

        machine.run_frame().unwrap();
        assert_eq!(machine.bus().read_byte(0x2000), 0x01);
        assert_eq!(machine.bus().read_byte(0x2001), 0x02);
    }

    #[test]
    fn unimplemented_opcode_stops_the_frame() {
        let mut machine = SpaceInvaders::new();
        machine.load_rom(&[0x00, 0x08]).unwrap();
        assert!(matches!(machine.run_frame(), Err(MachineError::Emulation(_))));
        assert_eq!(machine.cpu().registers().pc, 0x0001);
        assert_eq!(machine.frames(), 0);
    }

    #[test]
    fn frame_buffer_follows_video_ram() {
        let mut machine = SpaceInvaders::new();
        machine.load_rom(&SPIN).unwrap();
        machine.bus_mut().write_byte(VRAM_START, 0x01);
        machine.run_frame().unwrap();
        assert_eq!(machine.framebuffer().pixel(0, SCREEN_HEIGHT - 1), [0xff, 0xff, 0xff, 0xff]);
    }
}
