//! # Video
//!
//! The tile/sprite video block is an external collaborator: the core only
//! needs to place tiles and move sprites. [`Video`] is that surface, and
//! [`VideoRegs`] implements it on the SoC's registers.
//!
//! ## Register Layout
//!
//! | Region         | Offset   | Addressing                          |
//! |----------------|----------|-------------------------------------|
//! | sprite control | `0x0000` | 4 words per sprite: pos, colour, image, enable |
//! | scroll         | `0x0080` | x, y                                |
//! | sprite memory  | `0x1000` | 16 words per image                  |
//! | tile memory    | `0x2000` | `(row << 6) + col`, 64×32           |
//! | texture memory | `0x4000` | `(tex << 6) + (y << 3) + x`         |
//!
//! Writes outside a region are dropped silently, the same way the hardware
//! would clip them.

use crate::{
    board::{MAP_SIZE, TileMap},
    bus::{Bus, Port},
};

pub const VIDEO_BASE: Port = Port(0x0500_0000);

const SPRITE_CTRL: Port = VIDEO_BASE;
const SCROLL: Port = VIDEO_BASE.offset(0x80 >> 2);
const SPRITE_MEM: Port = VIDEO_BASE.offset(0x1000 >> 2);
const TILE_MEM: Port = VIDEO_BASE.offset(0x2000 >> 2);
const TEX_MEM: Port = VIDEO_BASE.offset(0x4000 >> 2);

pub const TILE_COLS: u32 = 64;
pub const TILE_ROWS: u32 = 32;
pub const TEXTURES: u32 = 64;
pub const TEXTURE_SIZE: u32 = 8;
pub const SPRITES: u8 = 8;
pub const SPRITE_IMAGES: u8 = 16;

/// 8×8 textures packed as an 8×8 grid into one 64×64 pixel atlas.
pub type TextureAtlas = [u32; 64 * 64];

/// One sprite image, one word per pixel row.
pub type SpriteImage = [u32; 16];

pub trait Video {
    fn set_tile(&mut self, col: u32, row: u32, tile: u8);
    fn set_scroll(&mut self, x: u32, y: u32);
    fn set_texture_pixel(&mut self, tex: u32, x: u32, y: u32, pixel: u32);
    fn write_sprite_memory(&mut self, image: u8, rows: &SpriteImage);
    fn set_sprite_pos(&mut self, sprite: u8, x: u32, y: u32);
    fn set_sprite_colour(&mut self, sprite: u8, colour: u8);
    fn set_sprite_image(&mut self, sprite: u8, image: u8);
    fn enable_sprite(&mut self, sprite: u8, on: bool);
}

pub struct VideoRegs<B> {
    bus: B,
}

impl<B: Bus> VideoRegs<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    #[inline(always)]
    fn sprite_reg(&mut self, sprite: u8, reg: usize, value: u32) {
        if sprite < SPRITES {
            self.bus
                .write32(SPRITE_CTRL.offset(((sprite as usize) << 2) + reg), value);
        }
    }
}

impl<B: Bus> Video for VideoRegs<B> {
    fn set_tile(&mut self, col: u32, row: u32, tile: u8) {
        if col < TILE_COLS && row < TILE_ROWS {
            self.bus
                .write32(TILE_MEM.offset(((row << 6) + col) as usize), tile as u32);
        }
    }

    fn set_scroll(&mut self, x: u32, y: u32) {
        self.bus.write32(SCROLL, x);
        self.bus.write32(SCROLL.offset(1), y);
    }

    fn set_texture_pixel(&mut self, tex: u32, x: u32, y: u32, pixel: u32) {
        if tex < TEXTURES && x < TEXTURE_SIZE && y < TEXTURE_SIZE {
            let index = (tex << 6) + (y << 3) + x;
            self.bus.write32(TEX_MEM.offset(index as usize), pixel);
        }
    }

    fn write_sprite_memory(&mut self, image: u8, rows: &SpriteImage) {
        if image >= SPRITE_IMAGES {
            return;
        }
        let base = SPRITE_MEM.offset((image as usize) << 4);
        for (i, row) in rows.iter().enumerate() {
            self.bus.write32(base.offset(i), *row);
        }
    }

    fn set_sprite_pos(&mut self, sprite: u8, x: u32, y: u32) {
        self.sprite_reg(sprite, 0, ((y & 0xffff) << 16) | (x & 0xffff));
    }

    fn set_sprite_colour(&mut self, sprite: u8, colour: u8) {
        self.sprite_reg(sprite, 1, colour as u32);
    }

    fn set_sprite_image(&mut self, sprite: u8, image: u8) {
        self.sprite_reg(sprite, 2, image as u32);
    }

    fn enable_sprite(&mut self, sprite: u8, on: bool) {
        self.sprite_reg(sprite, 3, on as u32);
    }
}

/// Copy the whole background map into tile memory.
pub fn upload_tile_map(video: &mut impl Video, map: &TileMap) {
    for row in 0..MAP_SIZE {
        for col in 0..MAP_SIZE {
            video.set_tile(col as u32, row as u32, map.tile(row, col));
        }
    }
}

/// Split the atlas into its 64 textures and load them pixel by pixel.
pub fn upload_textures(video: &mut impl Video, atlas: &TextureAtlas) {
    for tex in 0..TEXTURES {
        let (tex_row, tex_col) = (tex >> 3, tex & 0x07);
        for y in 0..TEXTURE_SIZE {
            for x in 0..TEXTURE_SIZE {
                let px = (tex_col << 3) + x;
                let py = (tex_row << 3) + y;
                video.set_texture_pixel(tex, x, y, atlas[((py << 6) + px) as usize]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeBus, RecordingVideo, VideoOp, map_with};

    #[test]
    fn test_tile_addressing() {
        let mut bus = FakeBus::default();
        let mut video = VideoRegs::new(&mut bus);
        video.set_tile(34, 8, 17);
        assert_eq!(bus.writes, vec![(Port(0x0500_2000 + ((8 * 64 + 34) << 2)), 17)]);
    }

    #[test]
    fn test_out_of_range_is_dropped() {
        let mut bus = FakeBus::default();
        let mut video = VideoRegs::new(&mut bus);
        video.set_tile(64, 0, 1);
        video.set_tile(0, 32, 1);
        video.set_texture_pixel(64, 0, 0, 1);
        video.set_texture_pixel(0, 8, 0, 1);
        video.set_sprite_pos(SPRITES, 1, 1);
        video.write_sprite_memory(SPRITE_IMAGES, &[0; 16]);
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_sprite_registers() {
        let mut bus = FakeBus::default();
        let mut video = VideoRegs::new(&mut bus);
        video.set_sprite_pos(0, 8, 216);
        video.set_sprite_colour(1, 6);
        video.enable_sprite(2, true);
        assert_eq!(
            bus.writes,
            vec![
                (Port(0x0500_0000), (216 << 16) | 8),
                (Port(0x0500_0014), 6),
                (Port(0x0500_002c), 1),
            ]
        );
    }

    #[test]
    fn test_upload_textures_slices_atlas() {
        let mut atlas = [0u32; 64 * 64];
        // texture 9 is atlas row 1, col 1; its pixel (2,3) sits at (10, 11)
        atlas[(11 << 6) + 10] = 0xabcd;
        let mut video = RecordingVideo::default();
        upload_textures(&mut video, &atlas);

        assert_eq!(video.ops.len(), 64 * 64);
        assert!(video.ops.contains(&VideoOp::TexturePixel {
            tex: 9,
            x: 2,
            y: 3,
            pixel: 0xabcd
        }));
    }

    #[test]
    fn test_upload_tile_map() {
        let map = map_with(0x1a, &[(3, 4, 7)]);
        let mut video = RecordingVideo::default();
        upload_tile_map(&mut video, &map);

        assert_eq!(video.ops.len(), 1024);
        assert!(video.ops.contains(&VideoOp::Tile {
            col: 4,
            row: 3,
            tile: 7
        }));
    }
}
