use crate::layout::degrees_per_item;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Wheel-frame angle sitting under the fixed pointer (top of the wheel).
pub const POINTER_ANGLE: f64 = 270.0;
/// Largest jitter away from the slice center, as a fraction of a slice.
pub const JITTER_FRACTION: f64 = 0.4;
pub const MIN_SPINS: u32 = 8;
pub const MAX_SPINS: u32 = 12;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    #[error("Need at least 2 options to spin, got {count}")]
    TooFewOptions { count: usize },
}

/// The random draws behind one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winner_index: usize,
    /// Degrees away from the winning slice's center.
    pub offset: f64,
    /// Full extra turns before settling.
    pub spins: u32,
}

impl SpinPlan {
    pub fn new(winner_index: usize, offset: f64, spins: u32) -> Self {
        Self {
            winner_index,
            offset,
            spins,
        }
    }

    /// Angle that brings the winning slice (shifted by `offset`) under the
    /// pointer, reduced into `[0, 360)`.
    pub fn target_angle(&self, total_items: usize) -> f64 {
        let step = degrees_per_item(total_items);
        let center = self.winner_index as f64 * step + step / 2.0;
        (POINTER_ANGLE - center + self.offset).rem_euclid(360.0)
    }

    pub fn outcome(&self, total_items: usize) -> SpinOutcome {
        SpinOutcome {
            winner_index: self.winner_index,
            final_rotation: self.spins as f64 * 360.0 + self.target_angle(total_items),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinOutcome {
    pub winner_index: usize,
    /// Absolute rotation in degrees the wheel should animate to from 0.
    pub final_rotation: f64,
}

/// Picks winners and target rotations from an injected random source.
#[derive(Debug, Clone)]
pub struct SpinResolver<R: Rng = StdRng> {
    rng: R,
}

impl SpinResolver<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpinResolver<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws the winner, jitter and spin count for a wheel of `total_items`.
    ///
    /// Callers must not spin fewer than two options; doing so returns
    /// [`SpinError::TooFewOptions`].
    pub fn plan(&mut self, total_items: usize) -> Result<SpinPlan, SpinError> {
        if total_items < 2 {
            return Err(SpinError::TooFewOptions { count: total_items });
        }

        let step = degrees_per_item(total_items);
        let max_offset = step * JITTER_FRACTION;

        Ok(SpinPlan {
            winner_index: self.rng.gen_range(0..total_items),
            // half-open: +max_offset is never drawn, so the landing
            // point stays strictly inside the winning slice
            offset: self.rng.gen_range(-max_offset..max_offset),
            spins: self.rng.gen_range(MIN_SPINS..=MAX_SPINS),
        })
    }

    pub fn resolve(&mut self, total_items: usize) -> Result<SpinOutcome, SpinError> {
        let plan = self.plan(total_items)?;
        log::debug!(
            "Spin plan for {} options: winner={} offset={:.2} spins={}",
            total_items,
            plan.winner_index,
            plan.offset,
            plan.spins
        );
        Ok(plan.outcome(total_items))
    }
}

/// Wheel-frame angle under the pointer once the wheel is rotated by
/// `rotation` degrees clockwise.
pub fn landing_angle(rotation: f64) -> f64 {
    (POINTER_ANGLE - rotation).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout, slice_at};

    #[test]
    fn test_forced_plan_scenario() {
        let plan = SpinPlan::new(2, 0.0, 10);
        assert_eq!(plan.target_angle(4), 45.0);
        let outcome = plan.outcome(4);
        assert_eq!(outcome.winner_index, 2);
        assert_eq!(outcome.final_rotation, 3645.0);
    }

    #[test]
    fn test_rejects_fewer_than_two() {
        let mut resolver = SpinResolver::seeded(1);
        assert_eq!(
            resolver.resolve(0),
            Err(SpinError::TooFewOptions { count: 0 })
        );
        assert_eq!(
            resolver.resolve(1),
            Err(SpinError::TooFewOptions { count: 1 })
        );
    }

    #[test]
    fn test_outcomes_land_inside_winner() {
        for seed in 0..8 {
            let mut resolver = SpinResolver::seeded(seed);
            for total in 2..=1000 {
                let outcome = resolver.resolve(total).unwrap();
                assert!(outcome.winner_index < total);

                let landing = landing_angle(outcome.final_rotation);
                assert_eq!(
                    slice_at(landing, total),
                    Some(outcome.winner_index),
                    "seed={seed} total={total} landing={landing}"
                );
            }
        }
    }

    #[test]
    fn test_landing_stays_in_inner_eighty_percent() {
        let mut resolver = SpinResolver::seeded(42);
        for total in [2, 3, 7, 12, 50] {
            let step = degrees_per_item(total);
            for _ in 0..200 {
                let outcome = resolver.resolve(total).unwrap();
                let center = outcome.winner_index as f64 * step + step / 2.0;
                let landing = landing_angle(outcome.final_rotation);
                let dist = (landing - center + 180.0).rem_euclid(360.0) - 180.0;
                assert!(dist.abs() <= step * JITTER_FRACTION + 1e-9);
            }
        }
    }

    #[test]
    fn test_spin_count_bounds() {
        let mut resolver = SpinResolver::seeded(7);
        let mut seen = [false; (MAX_SPINS + 1) as usize];
        for total in 2..=300 {
            let plan = resolver.plan(total).unwrap();
            assert!((MIN_SPINS..=MAX_SPINS).contains(&plan.spins));
            seen[plan.spins as usize] = true;

            let turns = plan.outcome(total).final_rotation / 360.0;
            assert!((8.0..13.0).contains(&turns), "turns={turns}");
        }
        assert!(seen[MIN_SPINS as usize..].iter().all(|s| *s));
    }

    #[test]
    fn test_target_angle_normalized() {
        // last slice of a two-option wheel has its center at 270
        let plan = SpinPlan::new(1, -30.0, 8);
        assert_eq!(plan.target_angle(2), 330.0);
        assert_eq!(plan.outcome(2).final_rotation, 8.0 * 360.0 + 330.0);
    }

    #[test]
    fn test_seeded_resolvers_agree() {
        let mut a = SpinResolver::seeded(99);
        let mut b = SpinResolver::seeded(99);
        for total in 2..50 {
            assert_eq!(a.resolve(total), b.resolve(total));
        }
    }

    #[test]
    fn test_landing_matches_layout_slice() {
        let menu = ["Tacos", "Ramen", "Pho", "Curry", "Sushi"];
        let slices = layout(&menu);
        let mut resolver = SpinResolver::seeded(3);
        for _ in 0..100 {
            let outcome = resolver.resolve(menu.len()).unwrap();
            let landing = landing_angle(outcome.final_rotation);
            assert!(slices[outcome.winner_index].contains(landing));
        }
    }
}
