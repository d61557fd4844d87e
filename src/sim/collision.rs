//! Laser/meteor hits, overflow pruning and the landing check
//!
//! All removals are order-preserving compactions; nothing is spliced out
//! of a vector while it is being walked.

use super::entity::Rect;
use super::state::{Meteor, Projectile};

/// One laser consumed by one meteor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub meteor_id: u32,
    pub projectile_id: u32,
}

/// Laser hits meteor when it has reached the meteor's bottom edge and its
/// left edge lies within the meteor's span widened by `padding` on each side.
///
/// The vertical test is one-sided: a laser anywhere above the meteor's
/// bottom edge counts.
#[inline]
pub fn laser_hits_meteor(laser: &Rect, meteor: &Rect, padding: f32) -> bool {
    laser.y <= meteor.bottom() && laser.x >= meteor.x - padding && laser.x <= meteor.right() + padding
}

/// Resolve every hit among the live entities and remove the consumed ones.
///
/// Meteors are visited oldest first; each takes the first unconsumed laser
/// that hits it. No entity is consumed twice.
pub fn resolve_collisions(
    meteors: &mut Vec<Meteor>,
    projectiles: &mut Vec<Projectile>,
    padding: f32,
) -> Vec<Hit> {
    let mut laser_spent = vec![false; projectiles.len()];
    let mut meteor_hit = vec![false; meteors.len()];
    let mut hits = Vec::new();

    for (mi, meteor) in meteors.iter().enumerate() {
        let rock = meteor.bounds();
        let found = projectiles
            .iter()
            .enumerate()
            .find(|(pi, p)| !laser_spent[*pi] && laser_hits_meteor(&p.bounds(), &rock, padding));

        if let Some((pi, projectile)) = found {
            laser_spent[pi] = true;
            meteor_hit[mi] = true;
            hits.push(Hit {
                meteor_id: meteor.id,
                projectile_id: projectile.id,
            });
        }
    }

    if !hits.is_empty() {
        compact(meteors, &meteor_hit);
        compact(projectiles, &laser_spent);
    }

    hits
}

/// Drop meteors fully below the field and lasers fully above it.
///
/// Returns how many (meteors, lasers) were removed.
pub fn prune_overflow(
    meteors: &mut Vec<Meteor>,
    projectiles: &mut Vec<Projectile>,
    field_height: f32,
) -> (usize, usize) {
    let meteor_count = meteors.len();
    let laser_count = projectiles.len();

    meteors.retain(|m| !m.is_overflowed(field_height));
    projectiles.retain(|p| !p.is_overflowed());

    (meteor_count - meteors.len(), laser_count - projectiles.len())
}

/// True when any live meteor's bottom edge has reached the field bottom
pub fn any_meteor_landed(meteors: &[Meteor], field_height: f32) -> bool {
    meteors.iter().any(|m| m.has_landed(field_height))
}

/// Remove every element whose flag is set, keeping order
fn compact<T>(items: &mut Vec<T>, remove: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !remove[idx];
        idx += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntitySpec;
    use proptest::prelude::*;

    const ROCK: EntitySpec = EntitySpec::new(60.0, 60.0, 1.0);
    const LASER: EntitySpec = EntitySpec::new(20.0, 40.0, 4.0);

    fn meteor(id: u32, x: f32, y: f32) -> Meteor {
        Meteor::new(id, x, y, &ROCK)
    }

    fn laser(id: u32, x: f32, y: f32) -> Projectile {
        Projectile::new(id, x, y, &LASER)
    }

    #[test]
    fn test_hit_inside_padded_span() {
        let mut meteors = vec![meteor(1, 100.0, 100.0)];
        let mut lasers = vec![laser(1, 130.0, 150.0)];

        let hits = resolve_collisions(&mut meteors, &mut lasers, 10.0);
        assert_eq!(
            hits,
            vec![Hit {
                meteor_id: 1,
                projectile_id: 1
            }]
        );
        assert!(meteors.is_empty());
        assert!(lasers.is_empty());
    }

    #[test]
    fn test_miss_outside_padding() {
        let mut meteors = vec![meteor(1, 100.0, 100.0)];
        let mut lasers = vec![laser(1, 81.0, 150.0)];

        let hits = resolve_collisions(&mut meteors, &mut lasers, 10.0);
        assert!(hits.is_empty());
        assert_eq!(meteors.len(), 1);
        assert_eq!(lasers.len(), 1);
    }

    #[test]
    fn test_padding_edges_are_inclusive() {
        let rock = meteor(1, 100.0, 100.0).bounds();
        assert!(laser_hits_meteor(&laser(1, 90.0, 160.0).bounds(), &rock, 10.0));
        assert!(laser_hits_meteor(&laser(1, 170.0, 160.0).bounds(), &rock, 10.0));
        assert!(!laser_hits_meteor(&laser(1, 89.9, 160.0).bounds(), &rock, 10.0));
        assert!(!laser_hits_meteor(&laser(1, 170.1, 160.0).bounds(), &rock, 10.0));
        // Below the meteor's bottom edge
        assert!(!laser_hits_meteor(&laser(1, 130.0, 160.1).bounds(), &rock, 10.0));
    }

    #[test]
    fn test_vertical_test_is_one_sided() {
        // Laser far above the meteor still counts
        let rock = meteor(1, 100.0, 300.0).bounds();
        assert!(laser_hits_meteor(&laser(1, 120.0, 0.0).bounds(), &rock, 10.0));
    }

    #[test]
    fn test_each_entity_consumed_once() {
        // Two meteors stacked in the same column, three lasers in range
        let mut meteors = vec![meteor(1, 100.0, 100.0), meteor(2, 100.0, 200.0)];
        let mut lasers = vec![laser(10, 120.0, 150.0), laser(11, 120.0, 100.0), laser(12, 500.0, 100.0)];

        let hits = resolve_collisions(&mut meteors, &mut lasers, 10.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], Hit { meteor_id: 1, projectile_id: 10 });
        assert_eq!(hits[1], Hit { meteor_id: 2, projectile_id: 11 });
        assert!(meteors.is_empty());
        assert_eq!(lasers.len(), 1);
        assert_eq!(lasers[0].id, 12);
    }

    #[test]
    fn test_one_laser_two_meteors() {
        let mut meteors = vec![meteor(1, 100.0, 100.0), meteor(2, 110.0, 100.0)];
        let mut lasers = vec![laser(1, 120.0, 150.0)];

        let hits = resolve_collisions(&mut meteors, &mut lasers, 10.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(meteors.len(), 1);
        assert_eq!(meteors[0].id, 2);
    }

    #[test]
    fn test_prune_adjacent_overflowed() {
        // Adjacent doomed entities must all go (no skipped neighbours)
        let mut meteors = vec![
            meteor(1, 0.0, 600.0),
            meteor(2, 0.0, 601.0),
            meteor(3, 0.0, 10.0),
            meteor(4, 0.0, 700.0),
        ];
        let mut lasers = vec![laser(1, 0.0, -40.0), laser(2, 0.0, -50.0), laser(3, 0.0, 0.0)];

        let removed = prune_overflow(&mut meteors, &mut lasers, 600.0);
        assert_eq!(removed, (3, 2));
        assert_eq!(meteors.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(lasers.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_landing_check() {
        assert!(!any_meteor_landed(&[meteor(1, 0.0, 539.0)], 600.0));
        assert!(any_meteor_landed(&[meteor(1, 0.0, 10.0), meteor(2, 0.0, 540.0)], 600.0));
        assert!(!any_meteor_landed(&[], 600.0));
    }

    proptest! {
        #[test]
        fn prop_prune_is_idempotent(
            meteor_ys in prop::collection::vec(-100.0f32..800.0, 0..20),
            laser_ys in prop::collection::vec(-100.0f32..700.0, 0..20),
        ) {
            let mut meteors: Vec<_> = meteor_ys.iter().enumerate().map(|(i, y)| meteor(i as u32, 0.0, *y)).collect();
            let mut lasers: Vec<_> = laser_ys.iter().enumerate().map(|(i, y)| laser(i as u32, 0.0, *y)).collect();

            prune_overflow(&mut meteors, &mut lasers, 600.0);
            let (m1, l1) = (meteors.clone(), lasers.clone());
            let removed = prune_overflow(&mut meteors, &mut lasers, 600.0);

            prop_assert_eq!(removed, (0, 0));
            prop_assert_eq!(meteors, m1);
            prop_assert_eq!(lasers, l1);
        }

        #[test]
        fn prop_hits_match_consumed_entities(
            rocks in prop::collection::vec((0.0f32..740.0, 0.0f32..540.0), 0..8),
            shots in prop::collection::vec((0.0f32..780.0, -40.0f32..560.0), 0..8),
        ) {
            let mut meteors: Vec<_> = rocks.iter().enumerate().map(|(i, (x, y))| meteor(i as u32, *x, *y)).collect();
            let mut lasers: Vec<_> = shots.iter().enumerate().map(|(i, (x, y))| laser(i as u32, *x, *y)).collect();
            let (meteors_before, lasers_before) = (meteors.len(), lasers.len());

            let hits = resolve_collisions(&mut meteors, &mut lasers, 10.0);

            prop_assert_eq!(meteors.len(), meteors_before - hits.len());
            prop_assert_eq!(lasers.len(), lasers_before - hits.len());
            for hit in &hits {
                prop_assert!(meteors.iter().all(|m| m.id != hit.meteor_id));
                prop_assert!(lasers.iter().all(|p| p.id != hit.projectile_id));
            }
        }
    }
}
