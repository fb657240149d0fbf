/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use invaders_8080::bus::DataBus;
use invaders_8080::config::MachineConfig;
use invaders_8080::machine::{Button, PortEvent, SpaceInvaders, SCREEN_HEIGHT, SCREEN_WIDTH};

/// A tiny game loop in the style of the real ROM: the vblank handler copies the fire button to
/// video RAM and counts frames, the mid-screen handler feeds the shift register and reads it back.
fn synthetic_rom() -> Vec<u8> {
    let mut rom = vec![0; 0x100];
    rom[0x00..0x07].copy_from_slice(&[
        0x31, 0x00, 0x24, // LXI SP,#$2400
        0xfb,             // loop: EI
        0xc3, 0x03, 0x00, // JMP loop
    ]);
    rom[0x08..0x0b].copy_from_slice(&[0xc3, 0x30, 0x00]); // RST 1: JMP $0030
    rom[0x10..0x13].copy_from_slice(&[0xc3, 0x50, 0x00]); // RST 2: JMP $0050
    rom[0x30..0x46].copy_from_slice(&[
        0x3e, 0xf0,       // MVI A,#$f0
        0xd3, 0x04,       // OUT #$04
        0x3e, 0x0f,       // MVI A,#$0f
        0xd3, 0x04,       // OUT #$04
        0x3e, 0x04,       // MVI A,#$04
        0xd3, 0x02,       // OUT #$02
        0xdb, 0x03,       // IN #$03
        0x32, 0x01, 0x20, // STA $2001
        0x21, 0x02, 0x20, // LXI H,#$2002
        0x34,             // INR M
        0xc9,             // RET
    ]);
    rom[0x50..0x65].copy_from_slice(&[
        0xdb, 0x01,       // IN #$01
        0xe6, 0x10,       // ANI #$10
        0x32, 0x00, 0x24, // STA $2400
        0x21, 0x00, 0x20, // LXI H,#$2000
        0x34,             // INR M
        0x3e, 0x01,       // MVI A,#$01
        0xd3, 0x03,       // OUT #$03
        0xd3, 0x06,       // OUT #$06
        0xaf,             // XRA A
        0xd3, 0x03,       // OUT #$03
        0xc9,             // RET
    ]);
    rom
}

fn machine() -> SpaceInvaders {
    let mut machine = SpaceInvaders::new();
    machine.load_rom(&synthetic_rom()).unwrap();
    machine
}

#[test]
fn two_interrupts_per_frame() {
    let mut machine = machine();
    for _ in 0..3 {
        machine.run_frame().unwrap();
    }
    assert_eq!(machine.bus().read_byte(0x2002), 3, "one mid-screen interrupt per frame");
    // the vblank interrupt of a frame is serviced at the start of the next one
    assert_eq!(machine.bus().read_byte(0x2000), 2);
    assert_eq!(machine.bus().read_byte(0x2001), 0xff, "shift register read back");
    assert_eq!(machine.frames(), 3);
}

#[test]
fn events_of_a_frame() {
    let mut machine = machine();
    machine.run_frame().unwrap();
    assert!(machine.take_events().is_empty());
    machine.run_frame().unwrap();
    assert_eq!(machine.take_events(), vec![PortEvent::Sound1(0x01), PortEvent::Watchdog]);
    machine.run_frame().unwrap();
    assert_eq!(machine.take_events(), vec![PortEvent::Sound1(0x01), PortEvent::Watchdog]);
}

#[test]
fn input_reaches_the_screen() {
    let mut machine = machine();
    let inputs = machine.inputs();

    machine.run_frame().unwrap();
    assert_eq!(machine.bus().read_byte(0x2400), 0x00);
    assert_eq!(machine.framebuffer().pixel(0, SCREEN_HEIGHT - 5), [0x00, 0x00, 0x00, 0xff]);

    inputs.press(Button::P1Fire);
    machine.run_frame().unwrap();
    assert_eq!(machine.bus().read_byte(0x2400), 0x10);
    assert_eq!(machine.bus().read_byte(0x4400), 0x10, "video RAM is mirrored");
    // bit 4 of the first byte of the first column
    assert_eq!(machine.framebuffer().pixel(0, SCREEN_HEIGHT - 5), [0xff, 0xff, 0xff, 0xff]);
}

#[test]
fn snapshot_has_the_screen_size() {
    let mut machine = machine();
    machine.run_frame().unwrap();
    assert_eq!(machine.framebuffer().snapshot().len(), SCREEN_WIDTH * SCREEN_HEIGHT * 4);
}

#[test]
fn configured_dip_switches() {
    let config =
        MachineConfig::from_toml_str("[dip_switches]\nships = 6\ncoin_info = false\n").unwrap();
    let machine = SpaceInvaders::with_config(config);
    assert_eq!(machine.bus().read_port(2), 0b1000_0011);
}

#[test]
fn machines_are_independent() {
    let mut first = machine();
    let second = machine();
    first.inputs().press(Button::Coin);
    first.run_frame().unwrap();
    assert_eq!(second.bus().read_port(1) & 0x01, 0x00);
    assert_eq!(second.bus().read_byte(0x2000), 0x00);
    assert_eq!(second.frames(), 0);
}
