//! Compile-time presets for the two maze games.
//!
//! | Preset           | Board               | Pacing          | Player                |
//! |------------------|---------------------|-----------------|-----------------------|
//! | [`Config::QUAD`]   | 15×14, 2×2 tiles    | mask `0xffff`   | autopilot, 4 pursuers |
//! | [`Config::SINGLE`] | 31×31, 1×1 tiles    | mask `0x0fff`   | joystick              |

use crate::{
    board::{BoardLayout, Cell, TileSet},
    game::{GameSetup, Pursuer, Steering},
    i2c::I2cConfig,
    timer::{CLOCK_HZ, IRQ_RATE_HZ, TickScheduler},
};

const QUAD_PURSUERS: [Pursuer; 4] = [
    Pursuer { cell: Cell::new(6, 10), colour: 6 },
    Pursuer { cell: Cell::new(7, 10), colour: 5 },
    Pursuer { cell: Cell::new(8, 10), colour: 2 },
    Pursuer { cell: Cell::new(7, 9), colour: 1 },
];

#[derive(Debug, Copy, Clone)]
pub struct Config {
    pub clock_hz: u32,
    pub irq_rate_hz: u32,
    /// A macro-tick happens when the loop counter has all these bits set.
    pub macro_tick_mask: u32,
    pub i2c: I2cConfig,
    /// Spin iterations between the conversion command and the first read.
    pub sample_settle_spins: u32,
    pub layout: BoardLayout,
    pub tiles: TileSet,
    pub game: GameSetup,
}

impl Config {
    pub const QUAD: Config = Config {
        clock_hz: CLOCK_HZ,
        irq_rate_hz: IRQ_RATE_HZ,
        macro_tick_mask: 0xffff,
        i2c: I2cConfig::DEFAULT,
        sample_settle_spins: 1000,
        layout: BoardLayout::QUAD,
        tiles: TileSet::QUAD,
        game: GameSetup {
            player_start: Cell::new(0, 13),
            player_colour: 3,
            pursuers: &QUAD_PURSUERS,
            steering: Steering::Autopilot,
            food_reward: 10,
        },
    };

    pub const SINGLE: Config = Config {
        clock_hz: CLOCK_HZ,
        irq_rate_hz: IRQ_RATE_HZ,
        macro_tick_mask: 0x0fff,
        i2c: I2cConfig::DEFAULT,
        sample_settle_spins: 100,
        layout: BoardLayout::SINGLE,
        tiles: TileSet::SINGLE,
        game: GameSetup {
            player_start: Cell::new(0, 0),
            player_colour: 3,
            pursuers: &[],
            steering: Steering::Joystick,
            food_reward: 10,
        },
    };

    pub const fn scheduler(&self) -> TickScheduler {
        TickScheduler::from_rate(self.clock_hz, self.irq_rate_hz)
    }
}
