//! Meteor spawning on a fixed interval of simulated time

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::EntitySpec;
use super::state::Meteor;
use super::timer::Interval;
use crate::config::GameConfig;

/// Drops a meteor at a random column every spawn interval
#[derive(Debug, Clone)]
pub struct MeteorSpawner {
    interval: Interval,
    rng: Pcg32,
    spec: EntitySpec,
    /// Largest left edge that keeps the meteor inside the field
    max_x: u32,
    next_id: u32,
}

impl MeteorSpawner {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let max_x = (config.field_width - config.meteor.width).floor().max(0.0) as u32;
        Self {
            interval: Interval::new(config.spawn_interval_ms),
            rng: Pcg32::seed_from_u64(seed),
            spec: config.meteor,
            max_x,
            next_id: 1,
        }
    }

    /// Let simulated time pass; returns the meteors that spawned
    pub fn advance(&mut self, dt_ms: f64) -> Vec<Meteor> {
        let fired = self.interval.advance(dt_ms);
        (0..fired).map(|_| self.spawn()).collect()
    }

    /// A meteor at `x` in `0..=field_width - meteor_width`, `y = 0`
    pub fn spawn(&mut self) -> Meteor {
        let id = self.next_id;
        self.next_id += 1;
        let x = self.rng.random_range(0..=self.max_x) as f32;
        log::trace!("Meteor {} spawned at x={}", id, x);
        Meteor::new(id, x, 0.0, &self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawns_inside_field() {
        let config = GameConfig::default();
        let mut spawner = MeteorSpawner::new(&config, 42);
        for _ in 0..500 {
            let meteor = spawner.spawn();
            let rect = meteor.bounds();
            assert_eq!(rect.y, 0.0);
            assert!(rect.x >= 0.0);
            assert!(rect.right() <= config.field_width);
            assert_eq!(rect.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_spawn_cadence() {
        let config = GameConfig::default();
        let mut spawner = MeteorSpawner::new(&config, 1);
        let dt = config.tick_ms();

        // Nothing before the first full interval
        let early: usize = (0..239).map(|_| spawner.advance(dt).len()).sum();
        assert_eq!(early, 0);
        assert_eq!(spawner.advance(dt).len(), 1);

        // 6 seconds more -> 10 meteors
        let later: usize = (0..2400).map(|_| spawner.advance(dt).len()).sum();
        assert_eq!(later, 10);
    }

    #[test]
    fn test_same_seed_same_columns() {
        let config = GameConfig::default();
        let mut a = MeteorSpawner::new(&config, 99);
        let mut b = MeteorSpawner::new(&config, 99);
        for _ in 0..20 {
            assert_eq!(a.spawn(), b.spawn());
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut spawner = MeteorSpawner::new(&GameConfig::default(), 3);
        let ids: Vec<u32> = (0..5).map(|_| spawner.spawn().id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
