use core::arch::global_asm;

use picogame::{bus::Mmio, timer::Countdown};

use crate::{CONFIG, SHARED, main};

// Reset lands on `_start` at the top of flash. The core jumps to the IRQ
// vector 16 bytes later with the return address in q0 and the pending IRQ
// bits in q1, all further IRQs masked until `retirq`.
global_asm!(
    ".pushsection .text.boot, \"ax\"",
    ".global _start",
    "_start:",
    "    j _reset",
    ".balign 16",
    "_irq_vector:",
    "    addi sp, sp, -64",
    "    sw ra, 0(sp)",
    "    sw t0, 4(sp)",
    "    sw t1, 8(sp)",
    "    sw t2, 12(sp)",
    "    sw a0, 16(sp)",
    "    sw a1, 20(sp)",
    "    sw a2, 24(sp)",
    "    sw a3, 28(sp)",
    "    sw a4, 32(sp)",
    "    sw a5, 36(sp)",
    "    sw a6, 40(sp)",
    "    sw a7, 44(sp)",
    "    sw t3, 48(sp)",
    "    sw t4, 52(sp)",
    "    sw t5, 56(sp)",
    "    sw t6, 60(sp)",
    // getq a0, q1
    "    .word 0x0000c50b",
    "    mv a1, sp",
    "    call irq_handler",
    "    lw ra, 0(sp)",
    "    lw t0, 4(sp)",
    "    lw t1, 8(sp)",
    "    lw t2, 12(sp)",
    "    lw a0, 16(sp)",
    "    lw a1, 20(sp)",
    "    lw a2, 24(sp)",
    "    lw a3, 28(sp)",
    "    lw a4, 32(sp)",
    "    lw a5, 36(sp)",
    "    lw a6, 40(sp)",
    "    lw a7, 44(sp)",
    "    lw t3, 48(sp)",
    "    lw t4, 52(sp)",
    "    lw t5, 56(sp)",
    "    lw t6, 60(sp)",
    "    addi sp, sp, 64",
    // retirq
    "    .word 0x0400000b",
    "_reset:",
    "    la sp, _stack_start",
    "    call _rust_start",
    "_halt:",
    "    j _halt",
    ".popsection",
);

// PicoRV32 custom instructions: maskirq a0, a0 and timer a0, a0.
global_asm!(
    ".global set_irq_mask",
    "set_irq_mask:",
    ".word 0x0605650b",
    "ret",
    ".global set_timer_counter",
    "set_timer_counter:",
    ".word 0x0a05650b",
    "ret",
);

unsafe extern "C" {
    /// Bits set in `mask` are disabled. Returns the previous mask.
    fn set_irq_mask(mask: u32) -> u32;
    /// Returns the previous counter value.
    fn set_timer_counter(ticks: u32) -> u32;

    unsafe static __data_load: u32;
    unsafe static mut __data_start: u32;
    unsafe static mut __data_end: u32;

    unsafe static mut __bss_start: u32;
    unsafe static mut __bss_end: u32;
}

#[inline(always)]
unsafe fn init_data_and_bss() {
    unsafe {
        // Copy .data from flash to RAM
        let mut src = &raw const __data_load;
        let mut dst = &raw mut __data_start;
        let end = &raw mut __data_end;
        while dst < end {
            dst.write_volatile(src.read_volatile());
            src = src.add(1);
            dst = dst.add(1);
        }

        // Zero .bss
        let mut bss = &raw mut __bss_start;
        let bss_end = &raw mut __bss_end;
        while bss < bss_end {
            bss.write_volatile(0);
            bss = bss.add(1);
        }
    }
}

/// Called by `_start` once the stack pointer is set.
#[unsafe(no_mangle)]
unsafe extern "C" fn _rust_start() -> ! {
    unsafe { init_data_and_bss() };
    main()
}

#[inline(always)]
pub fn enable_irqs() {
    unsafe { set_irq_mask(0x00) };
}

/// The core's built-in countdown timer.
pub struct TimerCounter;

impl Countdown for TimerCounter {
    #[inline(always)]
    fn load(&mut self, ticks: u32) {
        unsafe { set_timer_counter(ticks) };
    }
}

/// Called from `_irq_vector` with the pending IRQ bits and the caller-saved
/// registers spilled on the stack.
#[unsafe(no_mangle)]
extern "C" fn irq_handler(irqs: u32, _regs: *mut u32) {
    // SAFETY: only the LED register is touched through this bus.
    let mut leds = unsafe { Mmio::new() };
    CONFIG
        .scheduler()
        .on_interrupt(irqs, &mut TimerCounter, &mut leds, &SHARED);
}
