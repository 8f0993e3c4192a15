//! Level graphics, built at compile time from the layout below.

use picogame::{
    board::{MAP_SIZE, TileMap},
    score::{P_TILE, U_TILE, ZERO_TILE},
    video::{SpriteImage, TextureAtlas},
};

const BLANK: u8 = 0;
const WALL: u8 = 1;
const FOOD_QUAD: [u8; 4] = [4, 5, 12, 13];

/// `#` wall, `.` food, space empty. 15×14 cells.
const LAYOUT: [&str; 14] = [
    ".......#.......",
    ".##.##.#.##.##.",
    "...............",
    ".##.#.###.#.##.",
    "....#..#..#....",
    "###.##.#.##.###",
    "###.#.....#.###",
    "....#.#.#.#....",
    ".##.#.....#.##.",
    "..#.#.# #.#.#..",
    "#.#.#.   .#.#.#",
    "....#.###.#....",
    ".######.######.",
    " ..............",
];

const fn cell_at(x: usize, y: usize) -> u8 {
    if y >= LAYOUT.len() {
        return b'#';
    }
    let row = LAYOUT[y].as_bytes();
    if x >= row.len() { b'#' } else { row[x] }
}

/// Every cell drawn as a 2×2 block behind a one-tile border.
const fn quad_map() -> TileMap {
    let mut rows = [[WALL; MAP_SIZE]; MAP_SIZE];
    let mut r = 1;
    while r < MAP_SIZE {
        let mut c = 1;
        while c < MAP_SIZE {
            let slot = ((r - 1) % 2) * 2 + (c - 1) % 2;
            rows[r][c] = match cell_at((c - 1) / 2, (r - 1) / 2) {
                b'.' => FOOD_QUAD[slot],
                b' ' => BLANK,
                _ => WALL,
            };
            c += 1;
        }
        r += 1;
    }
    TileMap::from_rows(rows)
}

/// The same layout scaled so every tile is a cell of its own.
const fn single_map() -> TileMap {
    let mut rows = [[WALL; MAP_SIZE]; MAP_SIZE];
    let mut r = 0;
    while r < MAP_SIZE {
        let mut c = 0;
        while c < MAP_SIZE {
            rows[r][c] = match cell_at(c / 2, r / 2) {
                b'.' => FOOD_QUAD[0],
                b' ' => BLANK,
                _ => WALL,
            };
            c += 1;
        }
        r += 1;
    }
    TileMap::from_rows(rows)
}

pub static MAP: TileMap = if cfg!(feature = "maze-single") {
    single_map()
} else {
    quad_map()
};

const WALL_PX: u32 = 0x01;
const FOOD_PX: u32 = 0x07;
const TEXT_PX: u32 = 0x07;

/// 8×8 glyphs, MSB is the leftmost pixel.
const DIGITS: [[u8; 8]; 10] = [
    [0x3c, 0x66, 0x6e, 0x76, 0x66, 0x66, 0x3c, 0x00],
    [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7e, 0x00],
    [0x3c, 0x66, 0x06, 0x0c, 0x30, 0x60, 0x7e, 0x00],
    [0x3c, 0x66, 0x06, 0x1c, 0x06, 0x66, 0x3c, 0x00],
    [0x0c, 0x1c, 0x3c, 0x6c, 0x7e, 0x0c, 0x0c, 0x00],
    [0x7e, 0x60, 0x7c, 0x06, 0x06, 0x66, 0x3c, 0x00],
    [0x3c, 0x66, 0x60, 0x7c, 0x66, 0x66, 0x3c, 0x00],
    [0x7e, 0x06, 0x0c, 0x18, 0x30, 0x30, 0x30, 0x00],
    [0x3c, 0x66, 0x66, 0x3c, 0x66, 0x66, 0x3c, 0x00],
    [0x3c, 0x66, 0x66, 0x3e, 0x06, 0x66, 0x3c, 0x00],
];
const GLYPH_U: [u8; 8] = [0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3c, 0x00];
const GLYPH_P: [u8; 8] = [0x7c, 0x66, 0x66, 0x7c, 0x60, 0x60, 0x60, 0x00];
const GLYPH_WALL: [u8; 8] = [0xff, 0x81, 0x81, 0x81, 0x81, 0x81, 0x81, 0xff];

/// Each quarter of a food block holds a quarter of the dot, so four of them
/// draw one dot in the middle of the 16×16 cell.
const GLYPH_FOOD: [[u8; 8]; 4] = [
    [0, 0, 0, 0, 0, 0, 0, 0x01],
    [0, 0, 0, 0, 0, 0, 0, 0x80],
    [0x01, 0, 0, 0, 0, 0, 0, 0],
    [0x80, 0, 0, 0, 0, 0, 0, 0],
];

const fn paint(mut atlas: TextureAtlas, tex: u8, glyph: &[u8; 8], px: u32) -> TextureAtlas {
    let (tex_row, tex_col) = ((tex as usize) >> 3, (tex as usize) & 0x07);
    let mut y = 0;
    while y < 8 {
        let mut x = 0;
        while x < 8 {
            if glyph[y] & (0x80 >> x) != 0 {
                atlas[((tex_row * 8 + y) << 6) + tex_col * 8 + x] = px;
            }
            x += 1;
        }
        y += 1;
    }
    atlas
}

const fn atlas() -> TextureAtlas {
    let mut atlas = paint([0; 64 * 64], WALL, &GLYPH_WALL, WALL_PX);
    let mut i = 0;
    while i < 4 {
        atlas = paint(atlas, FOOD_QUAD[i], &GLYPH_FOOD[i], FOOD_PX);
        i += 1;
    }
    let mut d = 0;
    while d < 10 {
        atlas = paint(atlas, ZERO_TILE + d as u8, &DIGITS[d], TEXT_PX);
        d += 1;
    }
    atlas = paint(atlas, U_TILE, &GLYPH_U, TEXT_PX);
    paint(atlas, P_TILE, &GLYPH_P, TEXT_PX)
}

pub static TEXTURES: TextureAtlas = atlas();

/// Round, mouth open to the right. One row per word, bit 15 leftmost.
pub static ACTOR: SpriteImage = [
    0x07e0, 0x1ff8, 0x3ffc, 0x7ffe, 0x7ff8, 0xffe0, 0xff80, 0xfe00, 0xfe00, 0xff80, 0xffe0,
    0x7ff8, 0x7ffe, 0x3ffc, 0x1ff8, 0x07e0,
];
