/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Settings of the arcade board, readable from a TOML file.
//!
//! ```toml
//! clock_hz = 1996800
//! colour_overlay = true
//!
//! [dip_switches]
//! ships = 5
//! bonus_life_at_1000 = true
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CLOCK_HZ: u32 = 1_996_800;
pub const DEFAULT_REFRESH_HZ: f64 = 59.541985;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Processor clock.
    pub clock_hz: u32,
    /// Video refresh rate, two interrupts are delivered per frame.
    pub refresh_hz: f64,
    pub dip_switches: DipSwitches,
    /// When set, writes to the 0x4000-0x5fff alias reach the RAM they mirror. When unset they
    /// are dropped and only reads are mirrored.
    pub mirror_writes: bool,
    /// Tints the frame like the coloured strips glued on the cabinet screen.
    pub colour_overlay: bool,
}

impl Default for MachineConfig {
    fn default() -> MachineConfig {
        MachineConfig {
            clock_hz: DEFAULT_CLOCK_HZ,
            refresh_hz: DEFAULT_REFRESH_HZ,
            dip_switches: DipSwitches::default(),
            mirror_writes: false,
            colour_overlay: false,
        }
    }
}

impl MachineConfig {
    pub fn from_toml_str(text: &str) -> Result<MachineConfig, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<MachineConfig, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = MachineConfig::from_toml_str(&text)?;
        log::debug!("configuration loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn cycles_per_frame(&self) -> u32 {
        (self.clock_hz as f64 / self.refresh_hz).round() as u32
    }

    pub fn cycles_per_half_frame(&self) -> u32 {
        self.cycles_per_frame() / 2
    }
}

/// The switch bank read through input port 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DipSwitches {
    /// Ships per game, from 3 to 6. Other values are clamped.
    pub ships: u8,
    /// Extra ship at 1000 points instead of 1500.
    pub bonus_life_at_1000: bool,
    /// Shows the coin information in the demo screen.
    pub coin_info: bool,
}

impl Default for DipSwitches {
    fn default() -> DipSwitches {
        DipSwitches { ships: 3, bonus_life_at_1000: false, coin_info: true }
    }
}

impl DipSwitches {
    /// Bits of port 2 driven by the switches: 0-1 ships, 3 bonus life, 7 coin info (active low).
    pub fn port2_bits(&self) -> u8 {
        let mut bits = self.ships.clamp(3, 6) - 3;
        if self.bonus_life_at_1000 {
            bits |= 1 << 3;
        }
        if !self.coin_info {
            bits |= 1 << 7;
        }
        bits
    }
}
