use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::geometry::{Position, Rect};

/// Places prey uniformly inside the window, `margin` away from the walls.
/// Prey may land under the snake.
#[derive(Debug)]
pub struct PreyGenerator {
    rng: StdRng,
    width: i32,
    height: i32,
    margin: i32,
    half: i32,
}

impl PreyGenerator {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            width: config.width,
            height: config.height,
            margin: config.prey_margin,
            half: config.prey_size / 2,
        }
    }

    pub fn spawn(&mut self) -> Rect {
        let x = self.rng.random_range(self.margin..=self.width - self.margin);
        let y = self.rng.random_range(self.margin..=self.height - self.margin);
        Rect::around(Position::new(x, y), self.half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> PreyGenerator {
        PreyGenerator::new(&GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    #[test]
    fn centers_stay_inside_the_margin() {
        let mut prey = seeded(1);
        for _ in 0..5_000 {
            let r = prey.spawn();
            let c = r.center();
            assert!((15..=485).contains(&c.x), "{r:?}");
            assert!((15..=285).contains(&c.y), "{r:?}");
            assert_eq!(r.width(), 10);
            assert_eq!(r.height(), 10);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        for _ in 0..100 {
            assert_eq!(a.spawn(), b.spawn());
        }
    }

    #[test]
    fn samples_reach_both_ends_of_the_range() {
        let mut prey = PreyGenerator::new(&GameConfig {
            width: 40,
            height: 40,
            seed: Some(5),
            ..GameConfig::default()
        });
        let xs: Vec<i32> = (0..2_000).map(|_| prey.spawn().center().x).collect();
        assert!(xs.contains(&15));
        assert!(xs.contains(&25));
    }
}
