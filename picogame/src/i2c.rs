//! # I2C Master
//!
//! The SoC's I2C block runs one transaction at a time. A write is started by
//! a single store to the command register; a read by a store to the read
//! register. Either way the block raises bit 31 of its status word until the
//! bus goes idle.
//!
//! ```text
//! command (write):  1 | addr[6:0] | reg[7:0] | data[7:0] | 0000_0000
//!                  31   30     24   23    16   15      8
//! read request:     addr[6:0] << 17 | len
//! status (read):    busy << 31 | data[7:0]
//! ```

use bit_field::BitField;

use crate::{
    bus::{Bus, Port},
    error::{Error, I2cStage},
    poll::{poll, spin},
};

/// Nunchuk-class controllers answer at this address.
pub const DEFAULT_ADDRESS: u8 = 0x52;

#[derive(Debug, Copy, Clone)]
pub struct I2cConfig {
    /// 7-bit device address.
    pub address: u8,
    /// Status reads before a transaction is declared dead.
    pub poll_attempts: u32,
    /// Spin iterations between a read request and the first status poll.
    pub read_settle_spins: u32,
}

impl I2cConfig {
    pub const DEFAULT: I2cConfig = I2cConfig {
        address: DEFAULT_ADDRESS,
        poll_attempts: 100_000,
        read_settle_spins: 10_000,
    };
}

/// A status word read back from either I2C register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Status(pub u32);

impl Status {
    #[inline(always)]
    pub fn busy(self) -> bool {
        self.0.get_bit(31)
    }

    #[inline(always)]
    pub fn data(self) -> u8 {
        self.0.get_bits(0..8) as u8
    }
}

pub struct I2c<B> {
    bus: B,
    config: I2cConfig,
}

impl<B: Bus> I2c<B> {
    pub fn new(bus: B, config: I2cConfig) -> Self {
        Self { bus, config }
    }

    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Encode a write transaction for the command register.
    #[inline]
    pub fn command_word(address: u8, register: u8, data: u8) -> u32 {
        let mut word = 0u32;
        word.set_bit(31, true);
        word.set_bits(24..31, address as u32 & 0x7f);
        word.set_bits(16..24, register as u32);
        word.set_bits(8..16, data as u32);
        word
    }

    /// Encode a one-byte read request for the read register.
    #[inline]
    pub fn read_request_word(address: u8) -> u32 {
        ((address as u32 & 0x7f) << 17) | 1
    }

    /// Start a write. Does not wait for it to finish.
    pub fn write(&mut self, register: u8, data: u8) {
        let word = Self::command_word(self.config.address, register, data);
        self.bus.write32(Port::I2C_COMMAND, word);
    }

    /// Write and wait until the command register reports idle.
    pub fn send_command(&mut self, register: u8, data: u8) -> Result<(), Error> {
        self.write(register, data);
        let bus = &mut self.bus;
        poll(self.config.poll_attempts, || {
            (!Status(bus.read32(Port::I2C_COMMAND)).busy()).then_some(())
        })
        .map_err(|t| {
            log::warn!("i2c command {:02x}={:02x}: {}", register, data, t);
            Error::from_timeout(I2cStage::Command, t)
        })
    }

    /// Ask the device for one byte. Does not wait for it.
    pub fn start_read(&mut self) {
        let word = Self::read_request_word(self.config.address);
        self.bus.write32(Port::I2C_READ, word);
    }

    /// Request one byte, let the bus settle, then wait for the read register
    /// to go idle and return its data byte.
    pub fn read_byte(&mut self) -> Result<u8, Error> {
        self.start_read();
        spin(self.config.read_settle_spins);
        let bus = &mut self.bus;
        poll(self.config.poll_attempts, || {
            let status = Status(bus.read32(Port::I2C_READ));
            (!status.busy()).then(|| status.data())
        })
        .map_err(|t| {
            log::warn!("i2c read: {}", t);
            Error::from_timeout(I2cStage::Read, t)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeBus;

    const BUSY: u32 = 0x8000_0000;

    fn config(poll_attempts: u32) -> I2cConfig {
        I2cConfig {
            poll_attempts,
            read_settle_spins: 0,
            ..I2cConfig::DEFAULT
        }
    }

    #[test]
    fn test_command_word_layout() {
        assert_eq!(I2c::<FakeBus>::command_word(0x52, 0x40, 0x00), 0xd240_0000);
        assert_eq!(I2c::<FakeBus>::command_word(0x52, 0x00, 0x00), 0xd200_0000);
        assert_eq!(I2c::<FakeBus>::command_word(0x52, 0x12, 0x34), 0xd212_3400);
    }

    #[test]
    fn test_read_request_layout() {
        assert_eq!(I2c::<FakeBus>::read_request_word(0x52), 0x00a4_0001);
    }

    #[test]
    fn test_send_command_polls_until_idle() {
        let mut bus = FakeBus::default();
        // busy on the first four polls, clear on the fifth
        bus.busy_then(Port::I2C_COMMAND, 4, 0);
        let mut i2c = I2c::new(&mut bus, config(100));

        assert_eq!(i2c.send_command(0x40, 0x00), Ok(()));
        assert_eq!(bus.reads_of(Port::I2C_COMMAND), 5);
        assert_eq!(bus.writes_to(Port::I2C_COMMAND), vec![0xd240_0000]);
    }

    #[test]
    fn test_send_command_times_out() {
        let mut bus = FakeBus::default();
        bus.idle(Port::I2C_COMMAND, BUSY);
        let mut i2c = I2c::new(&mut bus, config(32));

        assert_eq!(
            i2c.send_command(0x00, 0x00),
            Err(Error::I2cTimeout {
                stage: I2cStage::Command,
                attempts: 32
            })
        );
        assert_eq!(bus.reads_of(Port::I2C_COMMAND), 32);
    }

    #[test]
    fn test_read_byte_discards_busy_bit() {
        let mut bus = FakeBus::default();
        bus.busy_then(Port::I2C_READ, 2, 0x0000_1a7f);
        let mut i2c = I2c::new(&mut bus, config(100));

        assert_eq!(i2c.read_byte(), Ok(0x7f));
        assert_eq!(bus.reads_of(Port::I2C_READ), 3);
        assert_eq!(bus.writes_to(Port::I2C_READ), vec![0x00a4_0001]);
    }

    #[test]
    fn test_read_byte_times_out() {
        let mut bus = FakeBus::default();
        bus.idle(Port::I2C_READ, BUSY | 0xff);
        let mut i2c = I2c::new(&mut bus, config(8));

        assert!(matches!(
            i2c.read_byte(),
            Err(Error::I2cTimeout {
                stage: I2cStage::Read,
                ..
            })
        ));
    }

    #[test]
    fn test_status_decode() {
        let s = Status(0x8000_00c3);
        assert!(s.busy());
        assert_eq!(s.data(), 0xc3);
        assert!(!Status(0x42).busy());
    }
}
