#![no_std]
#![no_main]

mod audio;
mod boot;
mod maze;
mod uart;

use panic_halt as _;
use picogame::{
    bus::Mmio,
    config::Config,
    console::Console,
    game::Steering,
    timer::IrqShared,
    video::VideoRegs,
};

use crate::{audio::SongPlayer, boot::TimerCounter, uart::SysRegs};

const BAUD: u32 = 115_200;

pub const CONFIG: Config = if cfg!(feature = "maze-single") {
    Config::SINGLE
} else {
    Config::QUAD
};

pub static SHARED: IrqShared = IrqShared::new();

pub fn main() -> ! {
    let sys = unsafe { SysRegs::new() };
    sys.set_baud(CONFIG.clock_hz, BAUD);
    uart::init_logger(log::LevelFilter::Debug);
    log::info!("booting");

    // SAFETY: running on the PicoSoC.
    let bus = unsafe { Mmio::new() };
    let mut console = match Console::new(bus, VideoRegs::new(bus), &maze::MAP, &CONFIG, &SHARED) {
        Ok(console) => console,
        Err(e) => {
            log::error!("{}", e);
            halt();
        }
    };
    console.setup_screen(&maze::MAP, &maze::TEXTURES, &maze::ACTOR);

    if CONFIG.game.steering == Steering::Joystick {
        if let Err(e) = console.init_controller() {
            log::error!("controller init: {}", e);
        }
    }

    let mut songplayer = SongPlayer::start();

    log::info!("switching to dual IO SPI mode");
    sys.enable_dual_io();

    log::info!("enabling IRQs");
    boot::enable_irqs();
    CONFIG.scheduler().arm(&mut TimerCounter);

    loop {
        match console.step(&mut songplayer) {
            Ok(Some(report)) if report.ate => log::debug!("score {}", report.score),
            // timeouts are logged where they happen; retry on the next tick
            Ok(_) | Err(_) => {}
        }
    }
}

fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
