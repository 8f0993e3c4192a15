use core::fmt::{self, Write};

use bit_field::BitField;
use log::{LevelFilter, Log, Metadata, Record};
use volatile_register::RW;

/// The SoC's system block: SPI flash control and the UART.
#[repr(C)]
pub struct SysRegs {
    pub spictrl: RW<u32>,
    pub uart_clkdiv: RW<u32>,
    pub uart_data: RW<u32>,
}

impl SysRegs {
    /// Shared handle; every register write goes through `&self`.
    pub unsafe fn new() -> &'static SysRegs {
        unsafe { &*(0x0200_0000 as *const SysRegs) }
    }

    pub fn set_baud(&self, clock_hz: u32, baud: u32) {
        unsafe { self.uart_clkdiv.write(clock_hz / baud) };
    }

    /// Switch the flash to dual-IO reads.
    pub fn enable_dual_io(&self) {
        unsafe {
            self.spictrl.modify(|mut r| *r.set_bits(16..23, 0x40));
        }
    }

    #[inline(always)]
    pub fn putc(&self, c: u8) {
        if c == b'\n' {
            unsafe { self.uart_data.write(b'\r' as u32) };
        }
        unsafe { self.uart_data.write(c as u32) };
    }
}

/// Blocking writer over the UART data register.
pub struct Uart;

impl Write for Uart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // SAFETY: only shared handles to the block exist.
        let sys = unsafe { SysRegs::new() };
        for c in s.bytes() {
            sys.putc(c);
        }
        Ok(())
    }
}

struct UartLogger;

static LOGGER: UartLogger = UartLogger;

impl Log for UartLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        // Filtered by `log` already
        true
    }

    fn log(&self, record: &Record) {
        let _ = writeln!(Uart, "{:<5} {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Install the UART logger. rv32imc has no CAS, so this uses the racy
/// setters and must run before interrupts are enabled.
pub fn init_logger(level: LevelFilter) {
    unsafe {
        if log::set_logger_racy(&LOGGER).is_ok() {
            log::set_max_level_racy(level);
        }
    }
}
