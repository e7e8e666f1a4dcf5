//! Obstacle generation
//!
//! Obstacles enter just past the right edge of the field, sit on the obstacle
//! floor, and carry an incident label picked from a fixed list.

use super::rng::RandomSource;
use super::state::Obstacle;
use crate::tuning::Tuning;

/// Incident names an obstacle can carry, in a fixed order
pub const INCIDENT_TERMS: [&str; 10] = [
    "CI/CD failed",
    "Schema drift",
    "Broken DAG",
    "Data quality bug",
    "Server overload",
    "Dependency deadlock",
    "Pipeline timeout",
    "Error 404",
    "Version conflict",
    "Model drift",
];

/// Uniformly pick an incident term
pub fn random_term(rng: &mut dyn RandomSource) -> &'static str {
    INCIDENT_TERMS[rng.pick(INCIDENT_TERMS.len())]
}

/// Build one obstacle entering at `field_right_edge + spawn_offset`.
///
/// Draw order is height, width, label.
pub fn spawn_obstacle(field_right_edge: f32, tuning: &Tuning, rng: &mut dyn RandomSource) -> Obstacle {
    let height = rng.range(tuning.obstacle_min_height, tuning.obstacle_max_height);
    let width = rng.range(tuning.obstacle_min_width, tuning.obstacle_max_width);
    let label = random_term(rng);

    Obstacle::new(
        field_right_edge + tuning.spawn_offset,
        tuning.obstacle_floor - height,
        width,
        height,
        label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, SimRng};
    use proptest::prelude::*;

    #[test]
    fn test_spawn_with_low_draws() {
        let tuning = Tuning::default();
        let mut rng = ScriptedRandom::constant(0.0);
        let obstacle = spawn_obstacle(tuning.field_width, &tuning, &mut rng);

        assert_eq!(obstacle.pos.x, tuning.field_width + 20.0);
        assert_eq!(obstacle.size.y, 26.0);
        assert_eq!(obstacle.size.x, 26.0);
        assert_eq!(obstacle.pos.y, tuning.obstacle_floor - 26.0);
        assert_eq!(obstacle.label, "CI/CD failed");
    }

    #[test]
    fn test_spawn_uses_draw_order() {
        let tuning = Tuning::default();
        // height 0.5 -> 38, width 0.25 -> 30.5, label 0.65 -> index 6
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25, 0.65]);
        let obstacle = spawn_obstacle(500.0, &tuning, &mut rng);

        assert_eq!(obstacle.pos.x, 520.0);
        assert!((obstacle.size.y - 38.0).abs() < 1e-4);
        assert!((obstacle.size.x - 30.5).abs() < 1e-4);
        assert_eq!(obstacle.label, "Pipeline timeout");
        // Bottom edge rests on the floor
        assert!((obstacle.rect().bottom() - tuning.obstacle_floor).abs() < 1e-4);
    }

    #[test]
    fn test_random_term_covers_list() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.95]);
        assert_eq!(random_term(&mut rng), "CI/CD failed");
        assert_eq!(random_term(&mut rng), "Model drift");
    }

    proptest! {
        #[test]
        fn prop_spawned_geometry_in_range(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = SimRng::new(seed);
            for _ in 0..20 {
                let o = spawn_obstacle(tuning.field_width, &tuning, &mut rng);
                prop_assert!(o.size.y >= 26.0 && o.size.y < 50.0);
                prop_assert!(o.size.x >= 26.0 && o.size.x < 44.0);
                prop_assert!(o.pos.x > tuning.field_width);
                prop_assert!(INCIDENT_TERMS.contains(&o.label.as_str()));
            }
        }
    }
}
