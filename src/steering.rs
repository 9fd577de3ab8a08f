//! Direction hand-off between the input handler and the game loop.
//!
//! One atomic byte holds two directions: the one most recently requested by
//! the player (low two bits) and the one the game loop last moved in (next
//! two bits). Requests are checked against the applied direction, so two key
//! presses between ticks can never add up to a reversal.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::geometry::Direction;

const REQUESTED: u8 = 0b0011;

#[derive(Debug)]
pub struct Steering {
    state: AtomicU8,
}

fn pack(requested: Direction, applied: Direction) -> u8 {
    requested.to_bits() | (applied.to_bits() << 2)
}

fn applied_of(state: u8) -> Direction {
    Direction::from_bits(state >> 2)
}

impl Steering {
    pub fn new(initial: Direction) -> Self {
        Self {
            state: AtomicU8::new(pack(initial, initial)),
        }
    }

    /// Latest accepted request.
    pub fn current(&self) -> Direction {
        Direction::from_bits(self.state.load(Ordering::Relaxed))
    }

    /// Handles a directional key press. Returns false when the request was the
    /// reverse of the direction the snake is moving in and got ignored.
    pub fn steer(&self, requested: Direction) -> bool {
        self.state
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
                if requested == applied_of(s).opposite() {
                    None
                } else {
                    Some((s & !REQUESTED) | requested.to_bits())
                }
            })
            .is_ok()
    }

    /// Called once per tick by the game loop: commits the pending request and
    /// returns it.
    pub fn take(&self) -> Direction {
        let prev = self
            .state
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
                let requested = Direction::from_bits(s);
                Some(pack(requested, requested))
            })
            .unwrap_or_else(|s| s);
        Direction::from_bits(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn reverse_key_is_ignored() {
        let s = Steering::new(Direction::Left);
        assert!(!s.steer(Direction::Right));
        assert_eq!(s.current(), Direction::Left);
    }

    #[test]
    fn perpendicular_keys_are_accepted() {
        let s = Steering::new(Direction::Left);
        assert!(s.steer(Direction::Up));
        assert_eq!(s.current(), Direction::Up);

        let s = Steering::new(Direction::Left);
        assert!(s.steer(Direction::Down));
        assert_eq!(s.current(), Direction::Down);
    }

    #[test]
    fn same_direction_is_accepted() {
        let s = Steering::new(Direction::Up);
        assert!(s.steer(Direction::Up));
        assert_eq!(s.take(), Direction::Up);
    }

    #[test]
    fn two_presses_within_a_tick_cannot_reverse() {
        let s = Steering::new(Direction::Left);
        assert!(s.steer(Direction::Up));
        // Still moving left until the loop takes the request.
        assert!(!s.steer(Direction::Right));
        assert_eq!(s.take(), Direction::Up);
        assert!(s.steer(Direction::Right));
        assert_eq!(s.take(), Direction::Right);
    }

    #[test]
    fn take_commits_the_request() {
        let s = Steering::new(Direction::Left);
        s.steer(Direction::Down);
        assert_eq!(s.take(), Direction::Down);
        assert!(!s.steer(Direction::Up));
        assert!(s.steer(Direction::Left));
    }

    #[test]
    fn concurrent_input_never_yields_a_reversal() {
        let steering = Arc::new(Steering::new(Direction::Left));
        let input = {
            let steering = Arc::clone(&steering);
            thread::spawn(move || {
                for i in 0..20_000 {
                    steering.steer(Direction::ALL[i % 4]);
                }
            })
        };

        let mut last = Direction::Left;
        for _ in 0..20_000 {
            let next = steering.take();
            assert_ne!(next, last.opposite());
            last = next;
        }
        input.join().unwrap();
    }
}
