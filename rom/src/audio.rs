use picogame::timer::AudioTick;

#[cfg(feature = "songplayer")]
mod ffi {
    /// Opaque song table produced by the C song compiler.
    #[repr(C)]
    pub struct Song {
        _private: [u8; 0],
    }

    unsafe extern "C" {
        pub unsafe static song_pacman: Song;

        pub unsafe fn songplayer_init(song: *const Song);
        pub unsafe fn songplayer_tick();
    }
}

/// The C song player, stepped from the foreground once per timer interrupt.
#[cfg(feature = "songplayer")]
pub struct SongPlayer(());

#[cfg(feature = "songplayer")]
impl SongPlayer {
    pub fn start() -> Self {
        unsafe { ffi::songplayer_init(&raw const ffi::song_pacman) };
        Self(())
    }
}

#[cfg(feature = "songplayer")]
impl AudioTick for SongPlayer {
    #[inline(always)]
    fn tick(&mut self) {
        unsafe { ffi::songplayer_tick() };
    }
}

/// Stand-in when the firmware is built without the song player.
#[cfg(not(feature = "songplayer"))]
pub struct SongPlayer(());

#[cfg(not(feature = "songplayer"))]
impl SongPlayer {
    pub fn start() -> Self {
        log::info!("built without songplayer, running silent");
        Self(())
    }
}

#[cfg(not(feature = "songplayer"))]
impl AudioTick for SongPlayer {
    fn tick(&mut self) {}
}
