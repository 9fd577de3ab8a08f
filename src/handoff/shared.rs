//! Shared fields, one lock each.
//!
//! Writers hold a single lock for the length of one field update, never two
//! at once. A reader therefore sees each field consistently but can pair a
//! body from one tick with a prey from another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::geometry::{Position, Rect};
use crate::handoff::{Publisher, Refresh, View};

#[derive(Debug)]
pub struct SharedState {
    body: Mutex<Vec<Position>>,
    prey: Mutex<Option<Rect>>,
    score: Mutex<u32>,
    running: Mutex<bool>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            body: Mutex::new(Vec::new()),
            prey: Mutex::new(None),
            score: Mutex::new(0),
            running: Mutex::new(true),
        }
    }
}

// The fields hold plain values, so whatever a panicking holder left behind is
// still a valid snapshot.
fn lock<T>(field: &Mutex<T>) -> MutexGuard<'_, T> {
    field.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SharedState {
    pub fn is_running(&self) -> bool {
        *lock(&self.running)
    }

    pub fn body(&self) -> Vec<Position> {
        lock(&self.body).clone()
    }

    pub fn prey(&self) -> Option<Rect> {
        *lock(&self.prey)
    }

    pub fn score(&self) -> u32 {
        *lock(&self.score)
    }
}

impl Publisher for SharedState {
    fn publish_move(&self, body: &[Position]) {
        let mut guard = lock(&self.body);
        guard.clear();
        guard.extend_from_slice(body);
    }

    fn publish_prey(&self, prey: Rect) {
        *lock(&self.prey) = Some(prey);
    }

    fn publish_score(&self, score: u32) {
        *lock(&self.score) = score;
    }

    fn publish_game_over(&self) {
        *lock(&self.running) = false;
    }
}

/// Render-side handle. Reads block on each field's lock in turn.
#[derive(Debug, Clone)]
pub struct SharedReader {
    state: Arc<SharedState>,
}

impl SharedReader {
    pub fn new(state: Arc<SharedState>) -> Self {
        Self { state }
    }
}

impl Refresh for SharedReader {
    fn refresh(&mut self, view: &mut View) -> bool {
        let running = self.state.is_running();
        view.body = self.state.body();
        view.prey = self.state.prey();
        view.score = self.state.score();
        view.game_over = !running;
        running
    }
}
