use std::collections::VecDeque;

use crate::{
    difficulty::evaluators::ReadingEvaluator, error::ConfigError, model::event::TimedEvent,
    util::vector::Vec2,
};

use super::{DifficultyPoint, Skill, SkillKind};

/// Tunables of the [`Reading`] skill.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadingConfig {
    pub skill_multiplier: f64,
    /// Normalised distance at which the focal weight is one half.
    pub focal_threshold: f64,
    /// Higher values make the focal weight change quicker.
    pub focal_harshness: f64,
    /// Normalised distance at which the overlap bonus is one half.
    pub overlap_threshold: f64,
    pub overlap_harshness: f64,
    pub rhythm_distance_harshness: f64,
    pub rhythm_delay_harshness: f64,
    /// Delay differences in milliseconds below which delays are considered
    /// equal.
    pub delay_tolerance: f64,
    /// Approach window in milliseconds at which the speed bonus doubles
    /// reading difficulty.
    pub speed_bonus_offset: f64,
    pub speed_bonus_scale: f64,
    pub aim_reading_weight: f64,
    pub rhythmic_reading_weight: f64,
    /// Radius that distances are normalised onto.
    pub normalised_radius: f64,
}

impl ReadingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_non_negative("skill_multiplier", self.skill_multiplier)?;
        ConfigError::check_finite("focal_threshold", self.focal_threshold)?;
        ConfigError::check_finite("focal_harshness", self.focal_harshness)?;
        ConfigError::check_finite("overlap_threshold", self.overlap_threshold)?;
        ConfigError::check_finite("overlap_harshness", self.overlap_harshness)?;
        ConfigError::check_positive("rhythm_distance_harshness", self.rhythm_distance_harshness)?;
        ConfigError::check_positive("rhythm_delay_harshness", self.rhythm_delay_harshness)?;
        ConfigError::check_non_negative("delay_tolerance", self.delay_tolerance)?;
        ConfigError::check_finite("speed_bonus_offset", self.speed_bonus_offset)?;
        ConfigError::check_positive("speed_bonus_scale", self.speed_bonus_scale)?;
        ConfigError::check_non_negative("aim_reading_weight", self.aim_reading_weight)?;
        ConfigError::check_non_negative("rhythmic_reading_weight", self.rhythmic_reading_weight)?;

        ConfigError::check_positive("normalised_radius", self.normalised_radius)
    }
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            skill_multiplier: 0.5,
            focal_threshold: 100.0,
            focal_harshness: 0.05,
            overlap_threshold: 25.0,
            overlap_harshness: 0.1,
            rhythm_distance_harshness: 7.0,
            rhythm_delay_harshness: 10.0,
            delay_tolerance: 3.0,
            speed_bonus_offset: 300.0,
            speed_bonus_scale: 40.0,
            aim_reading_weight: 1.0,
            rhythmic_reading_weight: 1.0,
            normalised_radius: 52.0,
        }
    }
}

/// An event as seen by the [`Reading`] skill.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingPoint {
    pub idx: usize,
    pub offset: f64,
    pub delta_time: f64,
    pub difficulty: f64,
    pub pos: Vec2,
    pub radius: f64,
    pub approach_window: f64,
    pub focal_weight: f64,
    pub rhythmic_focal_weight: f64,
    pub aim_reading: f64,
    pub rhythmic_reading: f64,
    pub speed_bonus: f64,
}

impl DifficultyPoint for ReadingPoint {
    fn idx(&self) -> usize {
        self.idx
    }

    fn offset(&self) -> f64 {
        self.offset
    }

    fn delta_time(&self) -> f64 {
        self.delta_time
    }

    fn difficulty(&self) -> f64 {
        self.difficulty
    }
}

/// Difficulty of identifying the position and timing of visible events.
#[derive(Clone, Debug)]
pub struct Reading {
    config: ReadingConfig,
    /// Points that are visible at the time the latest point appears.
    visible_points: VecDeque<ReadingPoint>,
    calculated_points: Vec<ReadingPoint>,
}

impl Reading {
    pub fn new(config: ReadingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::new_validated(config))
    }

    fn new_validated(config: ReadingConfig) -> Self {
        Self {
            config,
            visible_points: VecDeque::with_capacity(16),
            calculated_points: Vec::with_capacity(256),
        }
    }

    pub const fn config(&self) -> &ReadingConfig {
        &self.config
    }

    /// Number of points visible when the latest point appeared.
    pub fn visible_count(&self) -> usize {
        self.visible_points.len()
    }

    fn update_visible_points(&mut self, point: ReadingPoint, visible_from: f64) {
        self.visible_points.push_back(point);

        while self.visible_points.len() > 1
            && self
                .visible_points
                .front()
                .is_some_and(|front| front.offset < visible_from)
        {
            self.visible_points.pop_front();
        }
    }

    fn distance(&self, a: &ReadingPoint, b: &ReadingPoint) -> f64 {
        ReadingEvaluator::normalised_distance(&a.pos, a.radius, &b.pos, b.radius, &self.config)
    }

    /// Difficulty of determining position and order of the visible points.
    ///
    /// Requires at least two visible points.
    fn aim_reading(&mut self) -> f64 {
        let n = self.visible_points.len();
        let curr = self.visible_points[n - 1];
        let prev = self.visible_points[n - 2];

        let focal_weight = ReadingEvaluator::focal_weight(self.distance(&curr, &prev), &self.config);

        if let Some(latest) = self.visible_points.back_mut() {
            latest.focal_weight = focal_weight;
        }

        let focal_total: f64 = self.visible_points.iter().map(|p| p.focal_weight).sum();

        // Only points before the immediate predecessor can be confused with
        // the latest one
        let nearest_dist = self
            .visible_points
            .iter()
            .take(n - 2)
            .map(|p| self.distance(&curr, p))
            .min_by(f64::total_cmp);

        let overlap_bonus = nearest_dist.map_or(1.0, |dist| {
            ReadingEvaluator::overlap_bonus(dist, &self.config)
        });

        focal_total * focal_weight * overlap_bonus
    }

    /// Difficulty of determining the timing of visible points, i.e. timing
    /// changes without corresponding spacing changes.
    fn rhythmic_reading(&mut self) -> f64 {
        let n = self.visible_points.len();

        if n < 3 {
            return 0.0;
        }

        let curr = self.visible_points[n - 1];
        let prev = self.visible_points[n - 2];
        let prev_prev = self.visible_points[n - 3];

        let distance_change_weight = ReadingEvaluator::distance_change_weight(
            self.distance(&curr, &prev),
            self.distance(&prev, &prev_prev),
            &self.config,
        );

        let delay_change_weight = ReadingEvaluator::delay_change_weight(
            curr.offset - prev.offset,
            prev.offset - prev_prev.offset,
            &self.config,
        );

        let rhythmic_focal_weight = distance_change_weight * delay_change_weight;

        if let Some(latest) = self.visible_points.back_mut() {
            latest.rhythmic_focal_weight = rhythmic_focal_weight;
        }

        let rhythmic_focal_total: f64 = self
            .visible_points
            .iter()
            .map(|p| p.rhythmic_focal_weight)
            .sum();

        rhythmic_focal_total * rhythmic_focal_weight
    }

    fn calculate_latest(&mut self) {
        if self.visible_points.len() < 2 {
            // Nothing to read yet
            return;
        }

        let aim_reading = self.aim_reading() * self.config.aim_reading_weight;
        let rhythmic_reading = self.rhythmic_reading() * self.config.rhythmic_reading_weight;

        let Some(latest) = self.visible_points.back_mut() else {
            return;
        };

        let speed_bonus = ReadingEvaluator::speed_bonus(latest.approach_window, &self.config);

        latest.aim_reading = aim_reading;
        latest.rhythmic_reading = rhythmic_reading;
        latest.speed_bonus = speed_bonus;
        latest.difficulty = speed_bonus * (aim_reading + rhythmic_reading);
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::new_validated(ReadingConfig::default())
    }
}

impl Skill for Reading {
    type Point = ReadingPoint;

    const KIND: SkillKind = SkillKind::Reading;

    fn process_relevant(&mut self, idx: usize, event: &TimedEvent) {
        let delta_time = self
            .calculated_points
            .last()
            .map_or(0.0, |prev| (event.offset - prev.offset).max(0.0));

        let point = ReadingPoint {
            idx,
            offset: event.offset,
            delta_time,
            pos: event.pos,
            radius: event.radius,
            approach_window: event.approach_window,
            ..Default::default()
        };

        self.update_visible_points(point, event.visible_from());
        self.calculate_latest();

        if let Some(latest) = self.visible_points.back() {
            self.calculated_points.push(*latest);
        }
    }

    fn calculated_points(&self) -> &[ReadingPoint] {
        &self.calculated_points
    }

    fn skill_multiplier(&self) -> f64 {
        self.config.skill_multiplier
    }

    fn reset(&mut self) {
        self.visible_points.clear();
        self.calculated_points.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::model::event::EventKind;

    use super::*;

    fn circle(offset: f64, x: f64, y: f64) -> TimedEvent {
        TimedEvent {
            offset,
            pos: Vec2::new(x, y),
            radius: 52.0,
            approach_window: 600.0,
            hit_window: 50.0,
            kind: EventKind::Circle,
        }
    }

    #[test]
    fn single_visible_point_is_trivial() {
        let mut reading = Reading::default();
        reading.process(0, &circle(0.0, 0.0, 0.0));

        // Far enough apart that the first point is gone when the second appears
        reading.process(1, &circle(1000.0, 300.0, 0.0));

        assert_eq!(reading.visible_count(), 1);
        assert!(reading
            .calculated_points()
            .iter()
            .all(|point| point.difficulty.abs() < f64::EPSILON));
    }

    #[test]
    fn two_visible_points_have_no_rhythm() {
        let config = ReadingConfig::default();
        let mut reading = Reading::new(config).unwrap();

        reading.process(0, &circle(0.0, 0.0, 0.0));
        reading.process(1, &circle(300.0, 200.0, 0.0));

        let point = reading.calculated_points()[1];
        assert!(point.rhythmic_reading.abs() < f64::EPSILON);

        let focal_weight = ReadingEvaluator::focal_weight(200.0, &config);
        let speed_bonus = ReadingEvaluator::speed_bonus(600.0, &config);

        assert!((point.focal_weight - focal_weight).abs() < 1e-12);
        assert!((point.aim_reading - focal_weight * focal_weight).abs() < 1e-12);
        assert!((point.difficulty - speed_bonus * focal_weight * focal_weight).abs() < 1e-12);
    }

    #[test]
    fn overlap_with_older_point_is_rewarded() {
        let config = ReadingConfig::default();

        let mut overlapping = Reading::new(config).unwrap();
        overlapping.process(0, &circle(0.0, 0.0, 0.0));
        overlapping.process(1, &circle(150.0, 200.0, 0.0));
        overlapping.process(2, &circle(300.0, 10.0, 0.0));

        let mut separated = Reading::new(config).unwrap();
        separated.process(0, &circle(0.0, 0.0, 0.0));
        separated.process(1, &circle(150.0, 200.0, 0.0));
        separated.process(2, &circle(300.0, 200.0, 200.0));

        let overlapping = overlapping.calculated_points()[2];
        let separated = separated.calculated_points()[2];

        let focal_total = overlapping.focal_weight
            + ReadingEvaluator::focal_weight(200.0, &config);
        let expected = focal_total
            * overlapping.focal_weight
            * ReadingEvaluator::overlap_bonus(10.0, &config);

        assert!((overlapping.aim_reading - expected).abs() < 1e-9);
        assert!(overlapping.aim_reading / overlapping.focal_weight.powi(2) > 1.0);
        assert!(separated.aim_reading > 0.0);
    }

    #[test]
    fn timing_change_without_spacing_change() {
        let mut reading = Reading::default();

        reading.process(0, &circle(0.0, 0.0, 0.0));
        reading.process(1, &circle(100.0, 100.0, 0.0));
        reading.process(2, &circle(300.0, 200.0, 0.0));

        let point = reading.calculated_points()[2];
        assert!(point.rhythmic_focal_weight > 0.99);
        assert!(point.rhythmic_reading > 0.99);

        let mut steady = Reading::default();

        steady.process(0, &circle(0.0, 0.0, 0.0));
        steady.process(1, &circle(100.0, 100.0, 0.0));
        steady.process(2, &circle(201.0, 200.0, 0.0));

        let point = steady.calculated_points()[2];
        assert!(point.rhythmic_focal_weight.abs() < f64::EPSILON);
        assert!(point.rhythmic_reading.abs() < f64::EPSILON);
    }

    #[test]
    fn evicts_points_that_are_no_longer_visible() {
        let mut reading = Reading::default();

        for i in 0..10 {
            reading.process(i, &circle(i as f64 * 200.0, 0.0, 0.0));
        }

        // Visible from 1200 onwards: 1200, 1400, 1600, 1800
        assert_eq!(reading.visible_count(), 4);
    }

    #[test]
    fn rejects_zero_rhythm_harshness() {
        let config = ReadingConfig {
            rhythm_distance_harshness: 0.0,
            ..Default::default()
        };

        assert!(matches!(
            Reading::new(config),
            Err(ConfigError::NotPositive { .. })
        ));

        let config = ReadingConfig {
            rhythm_delay_harshness: 0.0,
            ..Default::default()
        };

        assert!(matches!(
            Reading::new(config),
            Err(ConfigError::NotPositive { .. })
        ));
    }

    #[test]
    fn stacked_pair_then_jump_stays_finite() {
        let mut reading = Reading::default();

        reading.process(0, &circle(0.0, 0.0, 0.0));
        reading.process(1, &circle(100.0, 0.0, 0.0));
        reading.process(2, &circle(200.0, 100.0, 0.0));

        let point = reading.calculated_points()[2];
        assert!(point.rhythmic_focal_weight.abs() < f64::EPSILON);
        assert!(point.difficulty.is_finite());

        let mut reading = Reading::default();

        reading.process(0, &circle(0.0, 0.0, 0.0));
        reading.process(1, &circle(0.0, 100.0, 0.0));
        reading.process(2, &circle(200.0, 200.0, 0.0));

        let point = reading.calculated_points()[2];
        assert!((point.rhythmic_focal_weight - 1.0).abs() < 1e-12);
        assert!(point.difficulty.is_finite());
        assert!(reading.value().is_finite());
    }

    #[test]
    fn shorter_approach_is_harder() {
        let mut slow = Reading::default();
        let mut fast = Reading::default();

        for i in 0..4 {
            let mut event = circle(i as f64 * 150.0, i as f64 * 120.0, 0.0);
            slow.process(i, &event);

            event.approach_window = 450.0;
            fast.process(i, &event);
        }

        assert!(fast.value() > slow.value());
    }
}
