/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::config::DipSwitches;

/// Bit of port 1 tied high on the board.
const PORT1_ALWAYS_SET: u8 = 1 << 3;

/// Cabinet controls. All of them are active high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Coin,
    P1Start,
    P2Start,
    P1Fire,
    P1Left,
    P1Right,
    P2Fire,
    P2Left,
    P2Right,
    Tilt,
}

impl Button {
    /// Input port and bit mask wired to the button.
    fn wiring(self) -> (u8, u8) {
        match self {
            Button::Coin => (1, 1 << 0),
            Button::P2Start => (1, 1 << 1),
            Button::P1Start => (1, 1 << 2),
            Button::P1Fire => (1, 1 << 4),
            Button::P1Left => (1, 1 << 5),
            Button::P1Right => (1, 1 << 6),
            Button::Tilt => (2, 1 << 2),
            Button::P2Fire => (2, 1 << 4),
            Button::P2Left => (2, 1 << 5),
            Button::P2Right => (2, 1 << 6),
        }
    }
}

/// The two input latches read through ports 1 and 2.
///
/// Clones share the same latches, so an input thread can hold one while the emulation thread
/// reads the other. Each port is updated atomically.
#[derive(Debug, Clone)]
pub struct InputLatches {
    ports: Arc<[AtomicU8; 2]>,
}

impl InputLatches {
    pub fn new(dip_switches: DipSwitches) -> InputLatches {
        InputLatches {
            ports: Arc::new([
                AtomicU8::new(PORT1_ALWAYS_SET),
                AtomicU8::new(dip_switches.port2_bits()),
            ]),
        }
    }

    pub fn press(&self, button: Button) {
        let (port, mask) = button.wiring();
        self.latch(port).fetch_or(mask, Ordering::Relaxed);
    }

    pub fn release(&self, button: Button) {
        let (port, mask) = button.wiring();
        self.latch(port).fetch_and(!mask, Ordering::Relaxed);
    }

    pub fn set(&self, button: Button, pressed: bool) {
        if pressed {
            self.press(button);
        } else {
            self.release(button);
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        let (port, mask) = button.wiring();
        self.latch(port).load(Ordering::Relaxed) & mask != 0
    }

    pub fn port1(&self) -> u8 {
        self.ports[0].load(Ordering::Relaxed) | PORT1_ALWAYS_SET
    }

    pub fn port2(&self) -> u8 {
        self.ports[1].load(Ordering::Relaxed)
    }

    /// Replaces the whole port 1 byte, for hosts with their own key mapping. Bit 3 stays set.
    pub fn set_port1(&self, value: u8) {
        self.ports[0].store(value | PORT1_ALWAYS_SET, Ordering::Relaxed);
    }

    /// Replaces the whole port 2 byte, DIP switches included.
    pub fn set_port2(&self, value: u8) {
        self.ports[1].store(value, Ordering::Relaxed);
    }

    fn latch(&self, port: u8) -> &AtomicU8 {
        &self.ports[(port - 1) as usize]
    }
}

impl Default for InputLatches {
    fn default() -> InputLatches {
        InputLatches::new(DipSwitches::default())
    }
}
