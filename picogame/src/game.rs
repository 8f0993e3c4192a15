//! # Game Loop
//!
//! [`Game::advance`] runs once per macro-tick. It moves the player one cell,
//! eats whatever food is there, and bobs the pursuers up and down.
//!
//! ## Movement
//!
//! Under [`Steering::Autopilot`] the player tries Up, Right, Down, Left in
//! that order and takes the first open direction that does not lead straight
//! back to the cell it just left. In a dead end the only way out is back, and
//! it takes it. Under [`Steering::Joystick`] it goes where the stick points,
//! if that way is open.

use crate::{
    board::{Board, Capability, Cell, Direction},
    nunchuk::NunchukSample,
    score::{BLANK_TILE, render_score},
    video::{SpriteImage, Video},
};

pub const MAX_PURSUERS: usize = 4;
pub const PLAYER_SPRITE: u8 = 0;
/// Sprite image slot shared by every actor.
pub const ACTOR_IMAGE: u8 = 0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Steering {
    Autopilot,
    Joystick,
}

/// A moving actor and the two cells it occupied on the last two ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Actor {
    pub cell: Cell,
    previous: Option<Cell>,
    previous2: Option<Cell>,
}

impl Actor {
    pub const fn new(cell: Cell) -> Self {
        Self {
            cell,
            previous: Some(cell),
            previous2: None,
        }
    }

    /// The cell it stood on two ticks ago, i.e. the one it just came from.
    pub fn previous2(&self) -> Option<Cell> {
        self.previous2
    }

    fn remember(&mut self) {
        self.previous2 = self.previous;
        self.previous = Some(self.cell);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pursuer {
    pub cell: Cell,
    pub colour: u8,
}

#[derive(Debug, Copy, Clone)]
pub struct GameSetup {
    pub player_start: Cell,
    pub player_colour: u8,
    /// At most [`MAX_PURSUERS`] are used.
    pub pursuers: &'static [Pursuer],
    pub steering: Steering,
    pub food_reward: u16,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub moved: Option<Direction>,
    pub ate: bool,
    pub score: u16,
}

/// Autopilot choice for an actor standing on a cell with `caps`.
pub fn choose_move(caps: Capability, actor: &Actor) -> Option<Direction> {
    let open = |d: &Direction| caps.contains(d.capability());
    Direction::PRIORITY
        .into_iter()
        .filter(open)
        .find(|&d| actor.cell.step(d) != actor.previous2)
        .or_else(|| Direction::PRIORITY.into_iter().find(open))
}

pub struct Game {
    board: Board,
    player: Actor,
    player_colour: u8,
    pursuers: heapless::Vec<Pursuer, MAX_PURSUERS>,
    score: u16,
    phase: u8,
    steering: Steering,
    food_reward: u16,
}

impl Game {
    pub fn new(board: Board, setup: &GameSetup) -> Self {
        let mut pursuers = heapless::Vec::new();
        for p in setup.pursuers {
            if pursuers.push(*p).is_err() {
                log::warn!("only {} pursuers supported, ignoring the rest", MAX_PURSUERS);
                break;
            }
        }
        Self {
            board,
            player: Actor::new(setup.player_start),
            player_colour: setup.player_colour,
            pursuers,
            score: 0,
            phase: 0,
            steering: setup.steering,
            food_reward: setup.food_reward,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    /// Pixel coordinate of the top-left corner of a cell along one axis.
    fn cell_px(&self, coord: u8) -> u32 {
        let layout = self.board.layout();
        ((layout.origin + coord as usize * layout.block) * 8) as u32
    }

    fn place(&self, video: &mut impl Video, sprite: u8, cell: Cell, lift: u8) {
        let block_px = (self.board.layout().block * 8) as u32;
        let y = self.cell_px(cell.y).saturating_sub(lift as u32 * block_px);
        video.set_sprite_pos(sprite, self.cell_px(cell.x), y);
    }

    /// Load the actor image, then colour, place and enable every sprite.
    pub fn setup_sprites(&self, video: &mut impl Video, image: &SpriteImage) {
        video.write_sprite_memory(ACTOR_IMAGE, image);

        let player = (PLAYER_SPRITE, self.player.cell, self.player_colour);
        let pursuers = self.pursuers.iter().zip(1u8..).map(|(p, s)| (s, p.cell, p.colour));
        for (sprite, cell, colour) in core::iter::once(player).chain(pursuers) {
            self.place(video, sprite, cell, 0);
            video.set_sprite_colour(sprite, colour);
            video.set_sprite_image(sprite, ACTOR_IMAGE);
            video.enable_sprite(sprite, true);
        }
    }

    fn steer(&self, input: Option<&NunchukSample>) -> Option<Direction> {
        let caps = self.board.capability(self.player.cell);
        match self.steering {
            Steering::Autopilot => choose_move(caps, &self.player),
            Steering::Joystick => input
                .and_then(NunchukSample::direction)
                .filter(|d| caps.contains(d.capability())),
        }
    }

    fn clear_food_tiles(&self, video: &mut impl Video, cell: Cell) {
        let layout = self.board.layout();
        let (row, col) = layout.center(cell);
        for r in row..row + layout.block {
            for c in col..col + layout.block {
                video.set_tile(c as u32, r as u32, BLANK_TILE);
            }
        }
    }

    /// One macro-tick of game state.
    pub fn advance(&mut self, video: &mut impl Video, input: Option<&NunchukSample>) -> TickReport {
        render_score(video, self.score);

        let moved = self.steer(input);
        if let Some(next) = moved.and_then(|d| self.player.cell.step(d)) {
            self.player.cell = next;
        }
        self.place(video, PLAYER_SPRITE, self.player.cell, 0);

        let ate = self.board.take_food(self.player.cell);
        if ate {
            self.clear_food_tiles(video, self.player.cell);
            self.score = self.score.saturating_add(self.food_reward);
            log::debug!("food at {:?}, score {}", self.player.cell, self.score);
        }

        self.player.remember();

        self.phase ^= 1;
        for (p, sprite) in self.pursuers.iter().zip(1u8..) {
            self.place(video, sprite, p.cell, self.phase);
        }

        TickReport {
            moved,
            ate,
            score: self.score,
        }
    }
}
