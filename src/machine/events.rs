/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// Side effect of an `OUT` instruction on a peripheral the emulator does not model.
///
/// Sound ports carry one bit per sound. The events only report the bits that went from 0 to 1,
/// which is when the sound hardware starts playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortEvent {
    /// Port 3: UFO (bit 0), shot, player death, invader death, extended play.
    Sound1(u8),
    /// Port 5: fleet movement (bits 0 to 3), UFO hit.
    Sound2(u8),
    /// Port 6.
    Watchdog,
}

/// Last values written to the sound ports.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct SoundLatches {
    port3: u8,
    port5: u8,
}

impl SoundLatches {
    /// Records a write on port 3 or 5 and returns the event for the bits that were raised.
    pub fn write(&mut self, port: u8, value: u8) -> Option<PortEvent> {
        let latch = match port {
            3 => &mut self.port3,
            5 => &mut self.port5,
            _ => return None,
        };
        let rising = value & !*latch;
        *latch = value;
        match (port, rising) {
            (_, 0) => None,
            (3, bits) => Some(PortEvent::Sound1(bits)),
            (_, bits) => Some(PortEvent::Sound2(bits)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rising_bits_are_reported() {
        let mut latches = SoundLatches::default();
        assert_eq!(latches.write(3, 0b0000_0011), Some(PortEvent::Sound1(0b0000_0011)));
        assert_eq!(latches.write(3, 0b0000_0011), None);
        assert_eq!(latches.write(3, 0b0000_0110), Some(PortEvent::Sound1(0b0000_0100)));
        assert_eq!(latches.write(3, 0), None);
        assert_eq!(latches.write(3, 0b0000_0001), Some(PortEvent::Sound1(0b0000_0001)));
    }

    #[test]
    fn ports_are_independent() {
        let mut latches = SoundLatches::default();
        assert_eq!(latches.write(3, 0x01), Some(PortEvent::Sound1(0x01)));
        assert_eq!(latches.write(5, 0x01), Some(PortEvent::Sound2(0x01)));
        assert_eq!(latches.write(4, 0x01), None);
    }
}
