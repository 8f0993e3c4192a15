//! # Nunchuk Controller
//!
//! A Wii Nunchuk-class controller on the I2C bus. One command at startup
//! unlocks unencrypted reporting; after that every sample is a conversion
//! command followed by six single-byte reads:
//!
//! | Byte | Meaning        |
//! |------|----------------|
//! | 0    | joystick x     |
//! | 1    | joystick y     |
//! | 2    | accel x (high) |
//! | 3    | accel y (high) |
//! | 4    | accel z (high) |
//! | 5    | buttons in bits 0-1, active low |

use bit_field::BitField;

use crate::{
    board::Direction,
    bus::Bus,
    error::Error,
    i2c::{I2c, I2cConfig},
    poll::spin,
};

const INIT_REGISTER: u8 = 0x40;
const CONVERT_REGISTER: u8 = 0x00;

/// Joystick readings past these count as a push.
pub const STICK_HIGH: u8 = 0xc0;
pub const STICK_LOW: u8 = 0x40;

#[derive(Debug, Copy, Clone)]
pub enum Button {
    Z,
    C,
}

impl Button {
    const fn bit(&self) -> usize {
        match self {
            Button::Z => 0,
            Button::C => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct NunchukSample {
    pub joy_x: u8,
    pub joy_y: u8,
    pub accel_x: u8,
    pub accel_y: u8,
    pub accel_z: u8,
    /// Raw button bits, already masked to bits 0-1.
    pub buttons: u8,
}

impl NunchukSample {
    /// Buttons read 0 when held.
    #[inline]
    pub fn is_pressed(&self, button: Button) -> bool {
        !self.buttons.get_bit(button.bit())
    }

    /// Where the stick points, if anywhere. Horizontal wins over vertical;
    /// y grows upwards.
    pub fn direction(&self) -> Option<Direction> {
        if self.joy_x > STICK_HIGH {
            Some(Direction::Right)
        } else if self.joy_x < STICK_LOW {
            Some(Direction::Left)
        } else if self.joy_y < STICK_LOW {
            Some(Direction::Down)
        } else if self.joy_y > STICK_HIGH {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

pub struct Nunchuk<B> {
    i2c: I2c<B>,
    sample_settle_spins: u32,
}

impl<B: Bus> Nunchuk<B> {
    pub fn new(bus: B, config: I2cConfig, sample_settle_spins: u32) -> Self {
        Self {
            i2c: I2c::new(bus, config),
            sample_settle_spins,
        }
    }

    /// Unlock streaming mode. Call once before sampling.
    pub fn init(&mut self) -> Result<(), Error> {
        self.i2c.send_command(INIT_REGISTER, 0x00)?;
        log::info!("nunchuk at {:#04x} ready", self.i2c.config().address);
        Ok(())
    }

    pub fn sample(&mut self) -> Result<NunchukSample, Error> {
        self.i2c.send_command(CONVERT_REGISTER, 0x00)?;
        spin(self.sample_settle_spins);

        let mut raw = [0u8; 6];
        for byte in raw.iter_mut() {
            *byte = self.i2c.read_byte()?;
        }
        let [joy_x, joy_y, accel_x, accel_y, accel_z, rest] = raw;
        Ok(NunchukSample {
            joy_x,
            joy_y,
            accel_x,
            accel_y,
            accel_z,
            buttons: rest.get_bits(0..2),
        })
    }
}
