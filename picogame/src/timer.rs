//! # Tick Scheduling
//!
//! Two clocks pace the games.
//!
//! The **timer interrupt** fires at a fixed rate (50 Hz on a 16 MHz core).
//! Its handler reloads the countdown before doing anything else, so the
//! period does not stretch with handler time. It then toggles the LED and
//! bumps a fire counter. Audio is not stepped inside the handler; the
//! foreground drains the counter through [`AudioDrain`].
//!
//! The **macro-tick** is a free-running foreground loop counter. A game step
//! happens whenever its low bits are all ones, see [`MacroTick`].
//!
//! ```text
//!        countdown hits 0              handler returns
//! Armed ──────────────────▶ Fired ─────────────────────▶ Armed
//!                             │ load(reload)
//!                             │ led ^= 1
//!                             │ fires += 1
//! ```
//!
//! The handler and the foreground share only [`IrqShared`]. Every word in it
//! has a single writer (the handler), so plain atomic loads and stores are
//! enough and no read-modify-write instruction is needed.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::bus::{Bus, Port};

/// Core clock of the reference SoC.
pub const CLOCK_HZ: u32 = 16_000_000;
/// Timer interrupt rate.
pub const IRQ_RATE_HZ: u32 = 50;

/// Bit of the IRQ pending mask raised by the timer.
pub const TIMER_IRQ: u32 = 1 << 0;

/// The timer-counter-set primitive: schedule the next interrupt `ticks`
/// core cycles from now.
pub trait Countdown {
    fn load(&mut self, ticks: u32);
}

/// Advances song playback by one step.
pub trait AudioTick {
    fn tick(&mut self);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerState {
    Armed,
    Fired,
}

/// State written by the interrupt handler and read by the foreground.
pub struct IrqShared {
    fires: AtomicU32,
    led: AtomicU32,
    in_handler: AtomicBool,
}

impl IrqShared {
    pub const fn new() -> Self {
        Self {
            fires: AtomicU32::new(0),
            led: AtomicU32::new(0),
            in_handler: AtomicBool::new(false),
        }
    }

    /// Timer interrupts handled so far (wrapping).
    #[inline(always)]
    pub fn fires(&self) -> u32 {
        self.fires.load(Ordering::Acquire)
    }

    #[inline(always)]
    pub fn led(&self) -> u32 {
        self.led.load(Ordering::Relaxed)
    }

    pub fn state(&self) -> TimerState {
        if self.in_handler.load(Ordering::Relaxed) {
            TimerState::Fired
        } else {
            TimerState::Armed
        }
    }
}

impl Default for IrqShared {
    fn default() -> Self {
        Self::new()
    }
}

/// The periodic timer. Holds only the reload value, so it can live in a
/// `static` next to [`IrqShared`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickScheduler {
    reload: u32,
}

impl TickScheduler {
    pub const fn new(reload: u32) -> Self {
        Self { reload }
    }

    pub const fn from_rate(clock_hz: u32, rate_hz: u32) -> Self {
        Self::new(clock_hz / rate_hz)
    }

    pub const fn reload(&self) -> u32 {
        self.reload
    }

    /// Schedule the first interrupt.
    pub fn arm(&self, timer: &mut impl Countdown) {
        timer.load(self.reload);
    }

    /// Interrupt handler body. Non-timer IRQs are ignored.
    ///
    /// Must stay short and non-blocking: no polling, no I2C.
    #[inline]
    pub fn on_interrupt(
        &self,
        irqs: u32,
        timer: &mut impl Countdown,
        leds: &mut impl Bus,
        shared: &IrqShared,
    ) {
        if irqs & TIMER_IRQ == 0 {
            return;
        }
        shared.in_handler.store(true, Ordering::Relaxed);
        timer.load(self.reload);

        let led = shared.led.load(Ordering::Relaxed) ^ 0x01;
        shared.led.store(led, Ordering::Relaxed);
        leds.write32(Port::LEDS, led);

        let fires = shared.fires.load(Ordering::Relaxed).wrapping_add(1);
        shared.fires.store(fires, Ordering::Release);
        shared.in_handler.store(false, Ordering::Relaxed);
    }
}

/// Foreground view of the fire counter.
#[derive(Debug, Default)]
pub struct AudioDrain {
    seen: u32,
}

impl AudioDrain {
    pub const fn new() -> Self {
        Self { seen: 0 }
    }

    /// Number of interrupts since the last drain.
    pub fn pending(&mut self, shared: &IrqShared) -> u32 {
        let fires = shared.fires();
        let pending = fires.wrapping_sub(self.seen);
        self.seen = fires;
        pending
    }

    /// Step the audio once per pending interrupt.
    pub fn drain(&mut self, shared: &IrqShared, audio: &mut impl AudioTick) -> u32 {
        let pending = self.pending(shared);
        for _ in 0..pending {
            audio.tick();
        }
        pending
    }
}

/// Free-running foreground loop counter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MacroTick {
    counter: u32,
    mask: u32,
}

impl MacroTick {
    pub const fn new(mask: u32) -> Self {
        Self { counter: 0, mask }
    }

    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Count one loop iteration. True on a macro-tick boundary.
    #[inline(always)]
    pub fn poll(&mut self) -> bool {
        self.counter = self.counter.wrapping_add(1);
        self.counter & self.mask == self.mask
    }
}
