use crate::geometry::Position;

/// Body segments, tail first and head last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// `body` is ordered tail first. Panics if it is empty.
    pub fn new(body: impl IntoIterator<Item = Position>) -> Self {
        let body: Vec<Position> = body.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body }
    }

    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// The segments still in place after a tick. The tail moves away unless
    /// the snake grows.
    pub fn remaining(&self, grow: bool) -> &[Position] {
        if grow { &self.body } else { &self.body[1..] }
    }

    /// Appends `head`; the tail is dropped unless the snake grows.
    pub fn advance(&mut self, head: Position, grow: bool) {
        if !grow {
            self.body.remove(0);
        }
        self.body.push(head);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Snake {
        Snake::new([(495, 55), (485, 55), (475, 55), (465, 55), (455, 55)].map(Position::from))
    }

    #[test]
    fn head_is_last_and_tail_is_first() {
        let s = start();
        assert_eq!(s.head(), Position::new(455, 55));
        assert_eq!(s.segments()[0], Position::new(495, 55));
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn shifting_drops_the_tail() {
        let mut s = start();
        s.advance(Position::new(440, 55), false);
        assert_eq!(
            s.segments(),
            &[(485, 55), (475, 55), (465, 55), (455, 55), (440, 55)].map(Position::from)
        );
    }

    #[test]
    fn growing_keeps_the_tail() {
        let mut s = start();
        s.advance(Position::new(440, 55), true);
        assert_eq!(s.len(), 6);
        assert_eq!(s.segments()[0], Position::new(495, 55));
        assert_eq!(s.head(), Position::new(440, 55));
    }

    #[test]
    fn head_tracks_many_mixed_moves() {
        let mut s = start();
        let mut grown = 0;
        for i in 0..50 {
            let grow = i % 7 == 0;
            grown += usize::from(grow);
            s.advance(Position::new(440 - i, 55), grow);
        }
        assert_eq!(s.len(), 5 + grown);
        assert_eq!(s.head(), Position::new(391, 55));
    }

    #[test]
    fn remaining_keeps_the_tail_only_when_growing() {
        let s = start();
        let shifted = s.remaining(false);
        assert_eq!(shifted.len(), 4);
        assert!(!shifted.contains(&s.segments()[0]));
        assert!(shifted.contains(&s.head()));
        assert_eq!(s.remaining(true), s.segments());
    }
}
