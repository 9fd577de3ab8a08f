use crate::game::snake::Snake;
use crate::geometry::{Position, Rect};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Touching the window edge counts as leaving it.
pub fn hits_wall(p: Position, width: i32, height: i32) -> bool {
    p.x <= 0 || p.x >= width || p.y <= 0 || p.y >= height
}

/// A growing snake keeps its tail, so the tail only counts when `grows` is set.
pub fn bites_itself(candidate: Position, snake: &Snake, grows: bool) -> bool {
    snake.remaining(grows).contains(&candidate)
}

pub fn check(candidate: Position, snake: &Snake, grows: bool, width: i32, height: i32) -> Option<Collision> {
    if hits_wall(candidate, width, height) {
        Some(Collision::Wall)
    } else if bites_itself(candidate, snake, grows) {
        Some(Collision::Body)
    } else {
        None
    }
}

/// The head occupies a `step`-wide square centred on its position.
pub fn head_region(head: Position, step: i32) -> Rect {
    Rect::around(head, step / 2)
}

pub fn captures(candidate: Position, step: i32, prey: &Rect) -> bool {
    head_region(candidate, step).overlaps(prey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Snake {
        Snake::new([(495, 55), (485, 55), (475, 55), (465, 55), (455, 55)].map(Position::from))
    }

    #[test]
    fn edges_and_beyond_are_walls() {
        for (x, y) in [(0, 50), (-15, 50), (500, 50), (515, 50), (50, 0), (50, 300), (50, -1)] {
            assert!(hits_wall(Position::new(x, y), 500, 300), "({x}, {y})");
        }
        for (x, y) in [(1, 1), (499, 299), (250, 150)] {
            assert!(!hits_wall(Position::new(x, y), 500, 300), "({x}, {y})");
        }
    }

    #[test]
    fn biting_any_non_tail_segment_collides() {
        let s = start();
        assert!(bites_itself(Position::new(475, 55), &s, false));
        assert!(bites_itself(Position::new(455, 55), &s, false));
        assert_eq!(check(Position::new(485, 55), &s, false, 500, 300), Some(Collision::Body));
    }

    #[test]
    fn the_departing_tail_is_free() {
        let s = start();
        assert!(!bites_itself(Position::new(495, 55), &s, false));
        assert_eq!(check(Position::new(495, 55), &s, false, 500, 300), None);
    }

    #[test]
    fn the_tail_stays_solid_while_growing() {
        let s = start();
        assert!(bites_itself(Position::new(495, 55), &s, true));
        assert_eq!(check(Position::new(495, 55), &s, true, 500, 300), Some(Collision::Body));
        assert!(bites_itself(Position::new(475, 55), &s, true));
    }

    #[test]
    fn wall_is_reported_before_body() {
        let s = Snake::new([(15, 40), (0, 55), (15, 55)].map(Position::from));
        assert_eq!(check(Position::new(0, 55), &s, true, 500, 300), Some(Collision::Wall));
    }

    #[test]
    fn capture_of_smaller_prey_inside_head() {
        let prey = Rect::new(437, 52, 443, 58);
        assert!(captures(Position::new(440, 55), 15, &prey));
    }

    #[test]
    fn capture_of_larger_prey_around_head() {
        let prey = Rect::new(400, 20, 480, 90);
        assert!(captures(Position::new(440, 55), 15, &prey));
    }

    #[test]
    fn capture_on_partial_overlap() {
        // Prey corner inside the head square only.
        let prey = Rect::new(445, 60, 455, 70);
        assert!(captures(Position::new(440, 55), 15, &prey));
    }

    #[test]
    fn no_capture_when_apart() {
        let prey = Rect::new(448, 55, 458, 65);
        assert!(!captures(Position::new(440, 55), 15, &prey));
    }
}
