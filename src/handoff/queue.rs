use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::trace;

use crate::geometry::{Position, Rect};
use crate::handoff::{Publisher, Refresh, View};

/// One record on the update queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Move(Vec<Position>),
    Prey(Rect),
    Score(u32),
    GameOver,
}

pub fn channel() -> (UpdateSender, UpdateReceiver) {
    let (tx, rx) = mpsc::channel();
    (UpdateSender { tx }, UpdateReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct UpdateSender {
    tx: Sender<Update>,
}

impl UpdateSender {
    pub fn send(&self, update: Update) {
        // A closed window drops the receiver; the game just keeps running
        // until the process exits.
        let _ = self.tx.send(update);
    }
}

impl Publisher for UpdateSender {
    fn publish_move(&self, body: &[Position]) {
        self.send(Update::Move(body.to_vec()));
    }

    fn publish_prey(&self, prey: Rect) {
        self.send(Update::Prey(prey));
    }

    fn publish_score(&self, score: u32) {
        self.send(Update::Score(score));
    }

    fn publish_game_over(&self) {
        self.send(Update::GameOver);
    }
}

#[derive(Debug)]
pub struct UpdateReceiver {
    rx: Receiver<Update>,
}

impl UpdateReceiver {
    /// Applies every update already queued, oldest first, without waiting for
    /// more. Returns how many were applied.
    pub fn drain(&self, view: &mut View) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(update) => {
                    view.apply(update);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }
}

impl Refresh for UpdateReceiver {
    fn refresh(&mut self, view: &mut View) -> bool {
        let applied = self.drain(view);
        if applied > 0 {
            trace!(applied, "drained updates");
        }
        !view.game_over
    }
}
