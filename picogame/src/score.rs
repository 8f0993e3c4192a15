//! Score display.
//!
//! Digit tiles are laid out sequentially from [`ZERO_TILE`], so digit `d`
//! is tile `ZERO_TILE + d`. Leading zeros are drawn blank; the last digit
//! always shows.

use crate::video::Video;

pub const BLANK_TILE: u8 = 0;
pub const ZERO_TILE: u8 = 16;
pub const U_TILE: u8 = 26;
pub const P_TILE: u8 = 27;

pub const SCORE_COL: u32 = 34;
pub const SCORE_ROW: u32 = 8;
pub const LABEL_COL: u32 = 32;
pub const LABEL_ROW: u32 = 7;

pub const DIGITS: usize = 5;

/// Tile IDs for the five score digits, most significant first.
pub fn score_tiles(score: u16) -> [u8; DIGITS] {
    let mut tiles = [BLANK_TILE; DIGITS];
    let mut rest = score as u32;
    let mut divisor = 10_000;
    let mut leading = true;
    for (i, tile) in tiles.iter_mut().enumerate() {
        let digit = (rest / divisor) as u8;
        rest %= divisor;
        divisor /= 10;
        leading &= digit == 0 && i + 1 < DIGITS;
        if !leading {
            *tile = ZERO_TILE + digit;
        }
    }
    tiles
}

pub fn render_score(video: &mut impl Video, score: u16) {
    for (i, tile) in score_tiles(score).into_iter().enumerate() {
        video.set_tile(SCORE_COL + i as u32, SCORE_ROW, tile);
    }
}

/// The "1UP" caption above the score.
pub fn render_label(video: &mut impl Video) {
    video.set_tile(LABEL_COL, LABEL_ROW, ZERO_TILE + 1);
    video.set_tile(LABEL_COL + 1, LABEL_ROW, U_TILE);
    video.set_tile(LABEL_COL + 2, LABEL_ROW, P_TILE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingVideo;

    const B: u8 = BLANK_TILE;

    fn d(n: u8) -> u8 {
        ZERO_TILE + n
    }

    #[test]
    fn test_blank_suppression() {
        assert_eq!(score_tiles(0), [B, B, B, B, d(0)]);
        assert_eq!(score_tiles(30), [B, B, B, d(3), d(0)]);
        assert_eq!(score_tiles(1005), [B, d(1), d(0), d(0), d(5)]);
        assert_eq!(score_tiles(65535), [d(6), d(5), d(5), d(3), d(5)]);
    }

    #[test]
    fn test_render_positions() {
        let mut video = RecordingVideo::default();
        render_score(&mut video, 120);
        assert_eq!(
            video.tiles_at_row(SCORE_ROW),
            vec![(34, B), (35, B), (36, d(1)), (37, d(2)), (38, d(0))]
        );
    }

    #[test]
    fn test_label() {
        let mut video = RecordingVideo::default();
        render_label(&mut video);
        assert_eq!(
            video.tiles_at_row(LABEL_ROW),
            vec![(32, d(1)), (33, U_TILE), (34, P_TILE)]
        );
    }
}
