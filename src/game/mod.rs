pub mod collision;
pub mod prey;
pub mod snake;

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::collision::Collision;
use crate::game::prey::PreyGenerator;
use crate::game::snake::Snake;
use crate::geometry::Rect;
use crate::handoff::Publisher;
use crate::steering::Steering;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(Collision),
}

/// What a single tick did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    Moved,
    Captured,
    Over(Collision),
}

pub struct Game {
    snake: Snake,
    prey: Rect,
    score: u32,
    status: Status,
    steering: Arc<Steering>,
    prey_gen: PreyGenerator,
    width: i32,
    height: i32,
    step: i32,
    period: Duration,
}

impl Game {
    pub fn new(config: &GameConfig, steering: Arc<Steering>) -> Self {
        let mut prey_gen = PreyGenerator::new(config);
        let prey = prey_gen.spawn();
        Self {
            snake: Snake::new(config.start_body.iter().copied()),
            prey,
            score: 0,
            status: Status::Running,
            steering,
            prey_gen,
            width: config.width,
            height: config.height,
            step: config.step,
            period: config.tick(),
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Sends the starting prey and body so there is something to draw before
    /// the first tick.
    pub fn publish_initial<P: Publisher + ?Sized>(&self, out: &P) {
        out.publish_prey(self.prey);
        out.publish_move(self.snake.segments());
    }

    /// Advances the game by one step. Collision decides the outcome before
    /// capture, so a move that both eats the prey and kills the snake is a
    /// loss. A capturing move keeps the tail, so landing on it is a bite.
    pub fn tick<P: Publisher + ?Sized>(&mut self, out: &P) -> Tick {
        if let Status::Over(cause) = self.status {
            return Tick::Over(cause);
        }

        let direction = self.steering.take();
        let candidate = self.snake.head().stepped(direction, self.step);

        let captured = collision::captures(candidate, self.step, &self.prey);
        if let Some(cause) = collision::check(candidate, &self.snake, captured, self.width, self.height) {
            self.status = Status::Over(cause);
            info!(score = self.score, length = self.snake.len(), ?cause, "game over");
            out.publish_game_over();
            return Tick::Over(cause);
        }

        self.snake.advance(candidate, captured);
        if captured {
            self.score += 1;
            self.prey = self.prey_gen.spawn();
            debug!(score = self.score, prey = ?self.prey.center(), "prey captured");
            out.publish_prey(self.prey);
            out.publish_score(self.score);
        }
        out.publish_move(self.snake.segments());

        if captured { Tick::Captured } else { Tick::Moved }
    }

    /// Sleep-then-step until the game is over.
    pub fn run<P: Publisher + ?Sized>(&mut self, out: &P) {
        self.publish_initial(out);
        while self.status == Status::Running {
            thread::sleep(self.period);
            self.tick(out);
        }
    }
}

/// Runs `game` on its own thread. The thread ends with the game and hands the
/// final state back.
pub fn spawn(mut game: Game, publisher: Box<dyn Publisher>) -> io::Result<JoinHandle<Game>> {
    thread::Builder::new().name("game-loop".into()).spawn(move || {
        game.run(publisher.as_ref());
        debug!(
            score = game.score(),
            length = game.snake().len(),
            status = ?game.status(),
            "game loop finished"
        );
        game
    })
}
