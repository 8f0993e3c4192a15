//! # Console
//!
//! Everything the foreground loop owns, in one place. The interrupt handler
//! never sees a `Console`; it only gets the [`IrqShared`] the console reads
//! from.
//!
//! ```ignore
//! static SHARED: IrqShared = IrqShared::new();
//!
//! let mut console = Console::new(bus, VideoRegs::new(bus), &MAZE, &Config::QUAD, &SHARED)?;
//! console.setup_screen(&MAZE, &TEXTURES, &ACTOR);
//! Config::QUAD.scheduler().arm(&mut timer);
//!
//! loop {
//!     console.step(&mut songplayer)?;
//! }
//! ```

use crate::{
    board::{Board, TileMap},
    bus::Bus,
    config::Config,
    error::Error,
    game::{Game, Steering, TickReport},
    nunchuk::Nunchuk,
    score::render_label,
    timer::{AudioDrain, AudioTick, IrqShared, MacroTick},
    video::{SpriteImage, TextureAtlas, Video, upload_textures, upload_tile_map},
};

pub struct Console<B, V> {
    nunchuk: Nunchuk<B>,
    video: V,
    game: Game,
    macro_tick: MacroTick,
    audio: AudioDrain,
    shared: &'static IrqShared,
    steering: Steering,
}

impl<B: Bus, V: Video> Console<B, V> {
    /// Analyze the maze and set up the foreground state. Touches no hardware.
    pub fn new(
        bus: B,
        video: V,
        map: &TileMap,
        config: &Config,
        shared: &'static IrqShared,
    ) -> Result<Self, Error> {
        let board = Board::build(map, config.layout, config.tiles)?;
        board.log_dump();
        log::info!(
            "board ready: {}x{} cells, {} food",
            config.layout.cols,
            config.layout.rows,
            board.food_remaining()
        );

        Ok(Self {
            nunchuk: Nunchuk::new(bus, config.i2c, config.sample_settle_spins),
            video,
            game: Game::new(board, &config.game),
            macro_tick: MacroTick::new(config.macro_tick_mask),
            audio: AudioDrain::new(),
            shared,
            steering: config.game.steering,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn video(&mut self) -> &mut V {
        &mut self.video
    }

    /// Unlock the controller. Only needed when it steers.
    pub fn init_controller(&mut self) -> Result<(), Error> {
        self.nunchuk.init()
    }

    /// Load textures, the background map, sprites and the score caption.
    pub fn setup_screen(&mut self, map: &TileMap, atlas: &TextureAtlas, actor: &SpriteImage) {
        self.video.set_scroll(0, 0);
        upload_textures(&mut self.video, atlas);
        upload_tile_map(&mut self.video, map);
        self.game.setup_sprites(&mut self.video, actor);
        render_label(&mut self.video);
    }

    /// One turn of the idle loop: step the audio for every timer interrupt
    /// since the last turn, then advance the game if a macro-tick is due.
    pub fn step(&mut self, audio: &mut impl AudioTick) -> Result<Option<TickReport>, Error> {
        self.audio.drain(self.shared, audio);

        if !self.macro_tick.poll() {
            return Ok(None);
        }

        let input = match self.steering {
            Steering::Joystick => Some(self.nunchuk.sample()?),
            Steering::Autopilot => None,
        };
        Ok(Some(self.game.advance(&mut self.video, input.as_ref())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::{BoardLayout, Cell, TileSet},
        bus::Port,
        error::I2cStage,
        game::GameSetup,
        i2c::I2cConfig,
        testutil::{CountingAudio, FakeCountdown, RecordingVideo, SharedBus, VideoOp, map_with},
        timer::{TIMER_IRQ, TickScheduler},
    };

    const WALL: u8 = 0x1a;

    fn leak_shared() -> &'static IrqShared {
        Box::leak(Box::new(IrqShared::new()))
    }

    fn corridor() -> TileMap {
        map_with(WALL, &[(0, 0, 0), (0, 1, 4), (0, 2, 4), (0, 3, 4)])
    }

    fn config(steering: Steering) -> Config {
        Config {
            macro_tick_mask: 0x3,
            i2c: I2cConfig {
                poll_attempts: 8,
                read_settle_spins: 0,
                ..I2cConfig::DEFAULT
            },
            sample_settle_spins: 0,
            layout: BoardLayout::SINGLE,
            tiles: TileSet::SINGLE,
            game: GameSetup {
                player_start: Cell::new(0, 0),
                player_colour: 3,
                pursuers: &[],
                steering,
                food_reward: 10,
            },
            ..Config::SINGLE
        }
    }

    #[test]
    fn test_macro_tick_paces_game() {
        let bus = SharedBus::default();
        let mut console = Console::new(
            bus,
            RecordingVideo::default(),
            &corridor(),
            &config(Steering::Autopilot),
            leak_shared(),
        )
        .unwrap();
        let mut audio = CountingAudio::default();

        let reports: Vec<_> = (0..12).filter_map(|_| console.step(&mut audio).unwrap()).collect();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].score, 30);
        assert_eq!(console.game().player().cell, Cell::new(3, 0));
    }

    #[test]
    fn test_audio_drained_every_step() {
        let shared = leak_shared();
        let sched = TickScheduler::new(320_000);
        let mut timer = FakeCountdown::default();
        let mut leds = SharedBus::default();
        let mut console = Console::new(
            SharedBus::default(),
            RecordingVideo::default(),
            &corridor(),
            &config(Steering::Autopilot),
            shared,
        )
        .unwrap();
        let mut audio = CountingAudio::default();

        sched.on_interrupt(TIMER_IRQ, &mut timer, &mut leds, shared);
        sched.on_interrupt(TIMER_IRQ, &mut timer, &mut leds, shared);
        console.step(&mut audio).unwrap();
        assert_eq!(audio.ticks, 2);
        console.step(&mut audio).unwrap();
        assert_eq!(audio.ticks, 2);
    }

    #[test]
    fn test_joystick_samples_on_macro_tick() {
        let bus = SharedBus::default();
        // stick pushed right, everything else idle
        bus.0.borrow_mut().script(Port::I2C_READ, [0xf0, 0x80, 0, 0, 0, 3]);
        let mut console = Console::new(
            bus.clone(),
            RecordingVideo::default(),
            &corridor(),
            &config(Steering::Joystick),
            leak_shared(),
        )
        .unwrap();
        let mut audio = CountingAudio::default();

        for _ in 0..2 {
            assert_eq!(console.step(&mut audio), Ok(None));
        }
        assert!(bus.0.borrow().writes_to(Port::I2C_COMMAND).is_empty());

        let report = console.step(&mut audio).unwrap().unwrap();
        assert!(report.ate);
        assert_eq!(bus.0.borrow().writes_to(Port::I2C_COMMAND), vec![0xd200_0000]);
        assert_eq!(bus.0.borrow().writes_to(Port::I2C_READ).len(), 6);
    }

    #[test]
    fn test_controller_timeout_surfaces() {
        let bus = SharedBus::default();
        bus.0.borrow_mut().idle(Port::I2C_COMMAND, 0x8000_0000);
        let mut console = Console::new(
            bus,
            RecordingVideo::default(),
            &corridor(),
            &config(Steering::Joystick),
            leak_shared(),
        )
        .unwrap();
        let mut audio = CountingAudio::default();

        for _ in 0..2 {
            console.step(&mut audio).unwrap();
        }
        assert_eq!(
            console.step(&mut audio),
            Err(Error::I2cTimeout {
                stage: I2cStage::Command,
                attempts: 8
            })
        );
        assert!(console.video().ops.is_empty());
        assert_eq!(console.game().player().cell, Cell::new(0, 0));
    }

    #[test]
    fn test_init_controller() {
        let bus = SharedBus::default();
        let mut console = Console::new(
            bus.clone(),
            RecordingVideo::default(),
            &corridor(),
            &config(Steering::Joystick),
            leak_shared(),
        )
        .unwrap();
        console.init_controller().unwrap();
        assert_eq!(bus.0.borrow().writes_to(Port::I2C_COMMAND), vec![0xd240_0000]);
    }

    #[test]
    fn test_setup_screen() {
        let map = corridor();
        let mut console = Console::new(
            SharedBus::default(),
            RecordingVideo::default(),
            &map,
            &config(Steering::Autopilot),
            leak_shared(),
        )
        .unwrap();
        console.setup_screen(&map, &[0; 64 * 64], &[0; 16]);

        let ops = &console.video().ops;
        assert_eq!(ops[0], VideoOp::Scroll { x: 0, y: 0 });
        assert!(ops.contains(&VideoOp::Tile { col: 1, row: 0, tile: 4 }));
        assert!(ops.contains(&VideoOp::SpriteEnable { sprite: 0, on: true }));
        assert!(ops.contains(&VideoOp::Tile { col: 33, row: 7, tile: 26 }));
    }

    #[test]
    fn test_bad_layout_rejected() {
        let mut cfg = config(Steering::Autopilot);
        cfg.layout.origin = 2;
        assert!(matches!(
            Console::new(
                SharedBus::default(),
                RecordingVideo::default(),
                &corridor(),
                &cfg,
                leak_shared(),
            ),
            Err(Error::LayoutOutOfBounds)
        ));
    }
}
