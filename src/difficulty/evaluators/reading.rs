use crate::{
    difficulty::skills::reading::ReadingConfig,
    util::{
        difficulty::{spread_ratio, tanh_step},
        vector::Vec2,
    },
};

/// Visual curves of the reading skill.
pub struct ReadingEvaluator;

impl ReadingEvaluator {
    /// Distance between two circles, scaled as if both had the normalised
    /// radius.
    pub fn normalised_distance(
        a: &Vec2,
        a_radius: f64,
        b: &Vec2,
        b_radius: f64,
        config: &ReadingConfig,
    ) -> f64 {
        let distance = a.distance(b);
        let avg_radius = (a_radius + b_radius) / 2.0;

        if avg_radius <= 0.0 {
            return distance;
        }

        distance / avg_radius * config.normalised_radius
    }

    /// Visual prominence of a circle relative to its predecessor; close to 0
    /// for overlapping circles and close to 1 for distant ones.
    pub fn focal_weight(distance: f64, config: &ReadingConfig) -> f64 {
        tanh_step(distance, config.focal_threshold, config.focal_harshness)
    }

    /// Bonus in `[1, 2]` for nearly overlapping with an earlier circle.
    pub fn overlap_bonus(distance: f64, config: &ReadingConfig) -> f64 {
        f64::tanh((distance - config.overlap_threshold) * config.overlap_harshness) / -2.0 + 1.5
    }

    /// Weight in `[0, 1]` that falls off as consecutive spacing changes.
    pub fn distance_change_weight(distance_ab: f64, distance_bc: f64, config: &ReadingConfig) -> f64 {
        let distance_change = spread_ratio(distance_ab, distance_bc);

        // Spacing out of a stack never shares a rhythm with it
        if distance_change.is_infinite() {
            return 0.0;
        }

        f64::exp(-config.rhythm_distance_harshness * (distance_change - 1.0))
    }

    /// Weight in `[0, 1]` that rises as consecutive delays change.
    pub fn delay_change_weight(delay_ab: f64, delay_bc: f64, config: &ReadingConfig) -> f64 {
        // Differences within the tolerance are rounding errors of snapping
        let delay_change = if (delay_ab - delay_bc).abs() < config.delay_tolerance {
            1.0
        } else {
            spread_ratio(delay_ab, delay_bc)
        };

        if delay_change.is_infinite() {
            return 1.0;
        }

        1.0 - f64::exp(-config.rhythm_delay_harshness * (delay_change - 1.0))
    }

    /// Multiplier that grows as circles appear for a shorter time.
    pub fn speed_bonus(approach_window: f64, config: &ReadingConfig) -> f64 {
        f64::exp((config.speed_bonus_offset - approach_window) / config.speed_bonus_scale) + 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalised_distance_scales_with_radius() {
        let config = ReadingConfig::default();
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(104.0, 0.0);

        let d = ReadingEvaluator::normalised_distance(&a, 52.0, &b, 52.0, &config);
        assert!((d - 104.0).abs() < 1e-9);

        let d = ReadingEvaluator::normalised_distance(&a, 26.0, &b, 26.0, &config);
        assert!((d - 208.0).abs() < 1e-9);

        let d = ReadingEvaluator::normalised_distance(&a, 0.0, &b, 0.0, &config);
        assert!((d - 104.0).abs() < 1e-9);
    }

    #[test]
    fn focal_weight_curve() {
        let config = ReadingConfig::default();

        assert!((ReadingEvaluator::focal_weight(100.0, &config) - 0.5).abs() < 1e-12);
        assert!(ReadingEvaluator::focal_weight(0.0, &config) < 0.01);
        assert!(ReadingEvaluator::focal_weight(300.0, &config) > 0.99);
    }

    #[test]
    fn overlap_bonus_curve() {
        let config = ReadingConfig::default();

        assert!((ReadingEvaluator::overlap_bonus(25.0, &config) - 1.5).abs() < 1e-12);
        assert!(ReadingEvaluator::overlap_bonus(0.0, &config) > 1.9);
        assert!(ReadingEvaluator::overlap_bonus(200.0, &config) < 1.01);
    }

    #[test]
    fn rhythm_weights() {
        let config = ReadingConfig::default();

        assert!((ReadingEvaluator::distance_change_weight(50.0, 50.0, &config) - 1.0).abs() < 1e-12);
        assert!(ReadingEvaluator::distance_change_weight(0.0, 50.0, &config).abs() < 1e-12);
        assert!((ReadingEvaluator::distance_change_weight(0.0, 0.0, &config) - 1.0).abs() < 1e-12);

        assert!(ReadingEvaluator::delay_change_weight(200.0, 202.0, &config).abs() < 1e-12);
        assert!(ReadingEvaluator::delay_change_weight(100.0, 200.0, &config) > 0.99);
        assert!((ReadingEvaluator::delay_change_weight(0.0, 200.0, &config) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rhythm_weights_at_infinite_ratio() {
        let config = ReadingConfig {
            rhythm_distance_harshness: 1e-9,
            rhythm_delay_harshness: 1e-9,
            ..Default::default()
        };

        let distance = ReadingEvaluator::distance_change_weight(0.0, 100.0, &config);
        assert!(distance.abs() < f64::EPSILON);

        let delay = ReadingEvaluator::delay_change_weight(0.0, 200.0, &config);
        assert!((delay - 1.0).abs() < f64::EPSILON);

        // Finite ratios still follow the curves
        let delay = ReadingEvaluator::delay_change_weight(100.0, 200.0, &config);
        assert!(delay > 0.0 && delay < 1e-6);
    }

    #[test]
    fn speed_bonus_curve() {
        let config = ReadingConfig::default();

        assert!((ReadingEvaluator::speed_bonus(300.0, &config) - 2.0).abs() < 1e-12);
        assert!(ReadingEvaluator::speed_bonus(1200.0, &config) < 1.0001);
    }
}
