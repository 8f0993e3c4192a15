//! # Register Access
//!
//! Every peripheral the core talks to is a 32-bit memory-mapped word. The
//! core never dereferences an address itself; it goes through [`Bus`] so the
//! same code can run against [`Mmio`] on the SoC and an in-memory fake on the
//! host.

use core::ptr;

/// A named 32-bit register address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Port(pub usize);

impl Port {
    /// I2C write/command register. Reading it returns the busy flag in bit 31.
    pub const I2C_COMMAND: Port = Port(0x0700_0000);
    /// I2C read register. Reading it returns busy in bit 31 and the data byte.
    pub const I2C_READ: Port = Port(0x0700_0004);
    /// User LEDs.
    pub const LEDS: Port = Port(0x0300_0000);

    /// The port `words` 32-bit words after this one.
    #[inline(always)]
    pub const fn offset(self, words: usize) -> Port {
        Port(self.0 + (words << 2))
    }
}

/// Read/write access to the register surface.
///
/// Implementations must not cache: every call is one bus access.
pub trait Bus {
    fn read32(&mut self, port: Port) -> u32;
    fn write32(&mut self, port: Port, value: u32);
}

impl<B: Bus + ?Sized> Bus for &mut B {
    #[inline(always)]
    fn read32(&mut self, port: Port) -> u32 {
        (**self).read32(port)
    }

    #[inline(always)]
    fn write32(&mut self, port: Port, value: u32) {
        (**self).write32(port, value)
    }
}

/// The real register map, accessed with volatile loads and stores.
#[derive(Debug, Copy, Clone)]
pub struct Mmio(());

impl Mmio {
    /// # Safety
    ///
    /// Only valid on the PicoSoC, where every [`Port`] handed to this bus
    /// is a mapped, word-aligned register.
    pub const unsafe fn new() -> Self {
        Self(())
    }
}

impl Bus for Mmio {
    #[inline(always)]
    fn read32(&mut self, port: Port) -> u32 {
        // SAFETY: Mmio::new's contract guarantees the address is a register.
        unsafe { ptr::read_volatile(port.0 as *const u32) }
    }

    #[inline(always)]
    fn write32(&mut self, port: Port, value: u32) {
        // SAFETY: Mmio::new's contract guarantees the address is a register.
        unsafe { ptr::write_volatile(port.0 as *mut u32, value) }
    }
}
