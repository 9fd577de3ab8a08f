//! How game state produced on the game thread reaches the renderer.
//!
//! The game side only sees a [`Publisher`], the render side only a
//! [`Refresh`]. Two implementations exist: an ordered queue of [`Update`]
//! records and a set of independently locked shared fields.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::geometry::{Position, Rect};

pub mod queue;
pub mod shared;

pub use queue::Update;

pub trait Publisher: Send {
    fn publish_move(&self, body: &[Position]);
    fn publish_prey(&self, prey: Rect);
    fn publish_score(&self, score: u32);
    fn publish_game_over(&self);
}

impl<P: Publisher + Sync + ?Sized> Publisher for Arc<P> {
    fn publish_move(&self, body: &[Position]) {
        (**self).publish_move(body)
    }

    fn publish_prey(&self, prey: Rect) {
        (**self).publish_prey(prey)
    }

    fn publish_score(&self, score: u32) {
        (**self).publish_score(score)
    }

    fn publish_game_over(&self) {
        (**self).publish_game_over()
    }
}

pub trait Refresh {
    /// Brings `view` up to date. Returns false once the game is over and no
    /// further refreshes are needed.
    fn refresh(&mut self, view: &mut View) -> bool;
}

/// What the renderer draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub body: Vec<Position>,
    pub prey: Option<Rect>,
    pub score: u32,
    pub game_over: bool,
}

impl View {
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Move(body) => self.body = body,
            Update::Prey(prey) => self.prey = Some(prey),
            Update::Score(score) => self.score = score,
            Update::GameOver => self.game_over = true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Queue,
    Shared,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Queue => "queue",
            Strategy::Shared => "shared",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hand-off strategy `{0}` (expected `queue` or `shared`)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queue" => Ok(Strategy::Queue),
            "shared" | "locks" => Ok(Strategy::Shared),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

/// Builds both ends of the chosen hand-off.
pub fn channel(strategy: Strategy) -> (Box<dyn Publisher>, Box<dyn Refresh>) {
    match strategy {
        Strategy::Queue => {
            let (tx, rx) = queue::channel();
            (Box::new(tx), Box::new(rx))
        }
        Strategy::Shared => {
            let state = Arc::new(shared::SharedState::default());
            let reader = shared::SharedReader::new(Arc::clone(&state));
            (Box::new(state), Box::new(reader))
        }
    }
}
