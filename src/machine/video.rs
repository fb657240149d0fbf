/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

pub const SCREEN_WIDTH: usize = 224;
pub const SCREEN_HEIGHT: usize = 256;
/// Size of video RAM: one bit per pixel.
pub const VRAM_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT / 8;

const BYTES_PER_PIXEL: usize = 4;
const BLACK: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
const WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const RED: [u8; 4] = [0xff, 0x20, 0x20, 0xff];
const GREEN: [u8; 4] = [0x20, 0xff, 0x20, 0xff];

/// The picture seen by the player, 224 pixels wide and 256 high, RGBA, row major.
///
/// The monitor is mounted rotated in the cabinet: video RAM holds 224 columns of 256 pixels, bit
/// 0 of the first byte of a column being the pixel at the bottom of the screen.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Box<[u8]>,
}

impl FrameBuffer {
    pub fn new() -> FrameBuffer {
        let mut pixels = vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL];
        for pixel in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&BLACK);
        }
        FrameBuffer { pixels: pixels.into_boxed_slice() }
    }

    /// Redraws the whole frame from video RAM.
    pub fn render(&mut self, vram: &[u8], colour_overlay: bool) {
        for (index, byte) in vram.iter().take(VRAM_SIZE).enumerate() {
            let x = index / (SCREEN_HEIGHT / 8);
            let column_y = (index % (SCREEN_HEIGHT / 8)) * 8;
            for bit in 0..8 {
                let y = SCREEN_HEIGHT - 1 - (column_y + bit);
                let colour = if byte & (1 << bit) == 0 {
                    BLACK
                } else if colour_overlay {
                    overlay_colour(x, y)
                } else {
                    WHITE
                };
                let offset = (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL;
                self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&colour);
            }
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at column `x` and row `y`, from the top left corner.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        pixel
    }

    /// Owned copy of the pixels, to hand to a renderer running on another thread.
    pub fn snapshot(&self) -> Vec<u8> {
        self.pixels.to_vec()
    }
}

impl Default for FrameBuffer {
    fn default() -> FrameBuffer {
        FrameBuffer::new()
    }
}

/// Colour of the cellophane strips: red over the UFO line, green over the player's base and the
/// remaining lives.
fn overlay_colour(x: usize, y: usize) -> [u8; 4] {
    match y {
        32..=63 => RED,
        184..=239 => GREEN,
        240..=255 if (16..134).contains(&x) => GREEN,
        _ => WHITE,
    }
}
