//! Host-side fakes for the register surface and the external collaborators.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use crate::{
    board::TileMap,
    bus::{Bus, Port},
    timer::{AudioTick, Countdown},
    video::Video,
};

const BUSY: u32 = 0x8000_0000;

/// In-memory bus. Reads come from a per-port script, then fall back to a
/// per-port idle value (or zero).
#[derive(Default)]
pub struct FakeBus {
    scripted: HashMap<Port, VecDeque<u32>>,
    idle: HashMap<Port, u32>,
    reads: HashMap<Port, u32>,
    pub writes: Vec<(Port, u32)>,
}

impl FakeBus {
    pub fn script(&mut self, port: Port, values: impl IntoIterator<Item = u32>) {
        self.scripted.entry(port).or_default().extend(values);
    }

    /// Report busy for `polls` reads, then `value` once.
    pub fn busy_then(&mut self, port: Port, polls: usize, value: u32) {
        self.script(port, std::iter::repeat(BUSY).take(polls));
        self.script(port, [value]);
    }

    pub fn idle(&mut self, port: Port, value: u32) {
        self.idle.insert(port, value);
    }

    pub fn reads_of(&self, port: Port) -> u32 {
        self.reads.get(&port).copied().unwrap_or(0)
    }

    pub fn writes_to(&self, port: Port) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == port)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl Bus for FakeBus {
    fn read32(&mut self, port: Port) -> u32 {
        *self.reads.entry(port).or_default() += 1;
        if let Some(v) = self.scripted.get_mut(&port).and_then(|q| q.pop_front()) {
            return v;
        }
        self.idle.get(&port).copied().unwrap_or(0)
    }

    fn write32(&mut self, port: Port, value: u32) {
        self.writes.push((port, value));
    }
}

/// A [`FakeBus`] that several owners can hold at once.
#[derive(Clone, Default)]
pub struct SharedBus(pub Rc<RefCell<FakeBus>>);

impl Bus for SharedBus {
    fn read32(&mut self, port: Port) -> u32 {
        self.0.borrow_mut().read32(port)
    }

    fn write32(&mut self, port: Port, value: u32) {
        self.0.borrow_mut().write32(port, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOp {
    Tile { col: u32, row: u32, tile: u8 },
    Scroll { x: u32, y: u32 },
    TexturePixel { tex: u32, x: u32, y: u32, pixel: u32 },
    SpriteMemory { image: u8 },
    SpritePos { sprite: u8, x: u32, y: u32 },
    SpriteColour { sprite: u8, colour: u8 },
    SpriteImage { sprite: u8, image: u8 },
    SpriteEnable { sprite: u8, on: bool },
}

#[derive(Default)]
pub struct RecordingVideo {
    pub ops: Vec<VideoOp>,
}

impl RecordingVideo {
    pub fn tiles_at_row(&self, row: u32) -> Vec<(u32, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                VideoOp::Tile { col, row: r, tile } if r == row => Some((col, tile)),
                _ => None,
            })
            .collect()
    }

    pub fn last_sprite_pos(&self, sprite: u8) -> Option<(u32, u32)> {
        self.ops.iter().rev().find_map(|op| match *op {
            VideoOp::SpritePos { sprite: s, x, y } if s == sprite => Some((x, y)),
            _ => None,
        })
    }
}

impl Video for RecordingVideo {
    fn set_tile(&mut self, col: u32, row: u32, tile: u8) {
        self.ops.push(VideoOp::Tile { col, row, tile });
    }

    fn set_scroll(&mut self, x: u32, y: u32) {
        self.ops.push(VideoOp::Scroll { x, y });
    }

    fn set_texture_pixel(&mut self, tex: u32, x: u32, y: u32, pixel: u32) {
        self.ops.push(VideoOp::TexturePixel { tex, x, y, pixel });
    }

    fn write_sprite_memory(&mut self, image: u8, _rows: &[u32; 16]) {
        self.ops.push(VideoOp::SpriteMemory { image });
    }

    fn set_sprite_pos(&mut self, sprite: u8, x: u32, y: u32) {
        self.ops.push(VideoOp::SpritePos { sprite, x, y });
    }

    fn set_sprite_colour(&mut self, sprite: u8, colour: u8) {
        self.ops.push(VideoOp::SpriteColour { sprite, colour });
    }

    fn set_sprite_image(&mut self, sprite: u8, image: u8) {
        self.ops.push(VideoOp::SpriteImage { sprite, image });
    }

    fn enable_sprite(&mut self, sprite: u8, on: bool) {
        self.ops.push(VideoOp::SpriteEnable { sprite, on });
    }
}

#[derive(Default)]
pub struct CountingAudio {
    pub ticks: u32,
}

impl AudioTick for CountingAudio {
    fn tick(&mut self) {
        self.ticks += 1;
    }
}

#[derive(Default)]
pub struct FakeCountdown {
    pub loads: Vec<u32>,
}

impl Countdown for FakeCountdown {
    fn load(&mut self, ticks: u32) {
        self.loads.push(ticks);
    }
}

/// A map that is wall (`wall`) everywhere except the listed tiles.
pub fn map_with(wall: u8, open: &[(usize, usize, u8)]) -> TileMap {
    let mut tiles = [wall; 1024];
    for &(row, col, tile) in open {
        tiles[(row << 5) + col] = tile;
    }
    TileMap::new(tiles)
}
