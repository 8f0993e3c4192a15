//! # picogame
//!
//! The control core shared by the PicoSoC maze games.
//!
//! The firmware around it is mostly register poking. What lives here is the
//! part with actual state: the tile-map analysis that turns background
//! graphics into a navigation grid, the timer interrupt that paces audio, the
//! macro-tick that paces the game, and the I2C protocol that samples a
//! Nunchuk-style controller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use picogame::{bus::Mmio, config::Config, console::Console, timer::IrqShared, video::VideoRegs};
//!
//! static SHARED: IrqShared = IrqShared::new();
//!
//! let bus = unsafe { Mmio::new() };
//! let mut console = Console::new(bus, VideoRegs::new(bus), &MAZE, &Config::QUAD, &SHARED)?;
//! console.setup_screen(&MAZE, &TEXTURES, &PACMAN_SPRITE);
//!
//! loop {
//!     if let Err(e) = console.step(&mut songplayer) {
//!         log::warn!("{}", e);
//!     }
//! }
//! ```
//!
//! ## Execution contexts
//!
//! | Context    | Runs                                              | Touches                        |
//! |------------|---------------------------------------------------|--------------------------------|
//! | foreground | [`console::Console::step`], I2C, video, game      | everything in `Console`        |
//! | timer IRQ  | [`timer::TickScheduler::on_interrupt`]            | countdown, [`timer::IrqShared`] |
//!
//! Nothing is shared between the two except the words inside `IrqShared`,
//! and each of those has exactly one writer.
//!
//! ## Register map
//!
//! | Register          | Address       | Meaning                                               |
//! |-------------------|---------------|-------------------------------------------------------|
//! | I2C command       | `0x0700_0000` | `start<<31 \| addr<<24 \| reg<<16 \| data<<8`, busy in bit 31 |
//! | I2C read          | `0x0700_0004` | `addr<<17 \| len`, reads back busy in bit 31 and data |
//! | LEDs              | `0x0300_0000` | user LEDs                                             |
//! | video             | `0x0500_0000` | see [`video`]                                         |

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod bus;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod i2c;
pub mod nunchuk;
pub mod poll;
pub mod score;
pub mod timer;
pub mod video;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::Error;
