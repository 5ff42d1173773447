use crate::{
    difficulty::evaluators::SnapFlowEvaluator,
    error::ConfigError,
    model::event::TimedEvent,
    util::{context::ContextWindow, difficulty::retention, vector::Vec2},
};

use super::{
    exertion::{Action, ExertionConfig, ExertionPool},
    DifficultyPoint, Skill, SkillKind,
};

/// Tunables of the [`Aiming`] skill.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AimingConfig {
    pub skill_multiplier: f64,
    pub exertion: ExertionConfig,
    /// Volatility below which motion is considered a full snap.
    pub snap_force_threshold: f64,
    /// Volatility above which motion is considered a full flow.
    pub flow_force_threshold: f64,
    /// Fraction of the snap force volatility that recovers per second.
    pub snap_force_volatility_recovery_rate: f64,
}

impl AimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_non_negative("skill_multiplier", self.skill_multiplier)?;
        self.exertion.validate()?;
        ConfigError::check_finite("snap_force_threshold", self.snap_force_threshold)?;
        ConfigError::check_finite("flow_force_threshold", self.flow_force_threshold)?;
        ConfigError::check_recovery_rate(
            "snap_force_volatility_recovery_rate",
            self.snap_force_volatility_recovery_rate,
        )?;

        if self.snap_force_threshold >= self.flow_force_threshold {
            return Err(ConfigError::Thresholds {
                snap: self.snap_force_threshold,
                flow: self.flow_force_threshold,
            });
        }

        Ok(())
    }
}

impl Default for AimingConfig {
    fn default() -> Self {
        Self {
            skill_multiplier: 10.0,
            exertion: ExertionConfig {
                max_speed_recovery_rate: 0.85,
                max_stamina_recovery_rate: 0.7,
                exertion_normaliser: 0.5,
                speed_weight: 0.002,
                stamina_weight: 0.001,
                min_imprecision: 1.0,
            },
            snap_force_threshold: 6.0,
            flow_force_threshold: 16.0,
            snap_force_volatility_recovery_rate: 0.9,
        }
    }
}

/// An event as seen by the [`Aiming`] skill.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimPoint {
    pub idx: usize,
    pub offset: f64,
    pub delta_time: f64,
    pub difficulty: f64,
    pub pos: Vec2,
    /// Movement from the previous point onto this one.
    pub incoming_force: Vec2,
    pub target_radius: f64,
    pub energy_exerted: f64,
    pub imprecision: f64,
    pub snappiness: f64,
    pub snap_force_volatility: f64,
    pub speed: f64,
    pub stamina: f64,
}

impl DifficultyPoint for AimPoint {
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

/// Difficulty of moving the cursor between events.
#[derive(Clone, Debug)]
pub struct Aiming {
    config: AimingConfig,
    exertion: ExertionPool,
    curr_points: ContextWindow<AimPoint, 1>,
    previous_stopping_force: Option<Vec2>,
    snap_force_volatility: f64,
    calculated_points: Vec<AimPoint>,
}

impl Aiming {
    pub fn new(config: AimingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::new_validated(config))
    }

    fn new_validated(config: AimingConfig) -> Self {
        Self {
            config,
            exertion: ExertionPool::new_validated(config.exertion),
            curr_points: ContextWindow::new(),
            previous_stopping_force: None,
            snap_force_volatility: 0.0,
            calculated_points: Vec::with_capacity(256),
        }
    }

    pub const fn config(&self) -> &AimingConfig {
        &self.config
    }

    pub const fn snap_force_volatility(&self) -> f64 {
        self.snap_force_volatility
    }

    /// Recover volatility over `delta_time`, then determine the snappiness
    /// of the incoming motion and add its direction changes onto the
    /// volatility.
    fn update_volatility(&mut self, incoming_force: Vec2, delta_time: f64) -> f64 {
        self.snap_force_volatility *= retention(
            self.config.snap_force_volatility_recovery_rate,
            delta_time,
        );

        let snappiness = SnapFlowEvaluator::snappiness(
            self.snap_force_volatility,
            self.config.snap_force_threshold,
            self.config.flow_force_threshold,
        );

        let moving_force = incoming_force;
        let stopping_force = -incoming_force;

        if let Some(ref previous_stopping_force) = self.previous_stopping_force {
            self.snap_force_volatility +=
                SnapFlowEvaluator::direction_change(&moving_force, previous_stopping_force);
        }

        self.snap_force_volatility +=
            SnapFlowEvaluator::direction_change(&stopping_force, &moving_force);

        self.previous_stopping_force = Some(stopping_force);

        snappiness
    }
}

impl Default for Aiming {
    fn default() -> Self {
        Self::new_validated(AimingConfig::default())
    }
}

impl Skill for Aiming {
    type Point = AimPoint;

    const KIND: SkillKind = SkillKind::Aiming;

    fn process_relevant(&mut self, idx: usize, event: &TimedEvent) {
        let (delta_time, incoming_force) = match self.curr_points.latest() {
            Some(prev) => ((event.offset - prev.offset).max(0.0), event.pos - prev.pos),
            None => (0.0, Vec2::ZERO),
        };

        let is_first = self.curr_points.is_empty();
        let snappiness = self.update_volatility(incoming_force, delta_time);

        let energy_exerted =
            SnapFlowEvaluator::energy(&incoming_force, &-incoming_force, snappiness);

        let imprecision = SnapFlowEvaluator::imprecision(
            incoming_force.length(),
            event.radius,
            delta_time,
            snappiness,
        );

        let exertion = self.exertion.exert(Action {
            energy_exerted,
            imprecision,
            semantic_bonus: 0.0,
            delta_time,
        });

        let point = AimPoint {
            idx,
            offset: event.offset,
            delta_time,
            // Motion requires a predecessor
            difficulty: if is_first { 0.0 } else { exertion.difficulty },
            pos: event.pos,
            incoming_force,
            target_radius: event.radius,
            energy_exerted,
            imprecision,
            snappiness,
            snap_force_volatility: self.snap_force_volatility,
            speed: exertion.speed,
            stamina: exertion.stamina,
        };

        self.curr_points.push(point);
        self.calculated_points.push(point);
    }

    fn calculated_points(&self) -> &[AimPoint] {
        &self.calculated_points
    }

    fn skill_multiplier(&self) -> f64 {
        self.config.skill_multiplier
    }

    fn reset(&mut self) {
        self.exertion.reset();
        self.curr_points.clear();
        self.previous_stopping_force = None;
        self.snap_force_volatility = 0.0;
        self.calculated_points.clear();
    }
}
