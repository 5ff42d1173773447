use crate::{error::ConfigError, model::event::TimedEvent, util::context::ContextWindow};

use super::{
    exertion::{Action, ExertionConfig, ExertionPool},
    DifficultyPoint, Skill, SkillKind,
};

/// Tunables of the [`Clicking`] skill.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClickingConfig {
    pub skill_multiplier: f64,
    pub exertion: ExertionConfig,
}

impl ClickingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_non_negative("skill_multiplier", self.skill_multiplier)?;

        self.exertion.validate()
    }
}

impl Default for ClickingConfig {
    fn default() -> Self {
        Self {
            skill_multiplier: 10.0,
            exertion: ExertionConfig {
                max_speed_recovery_rate: 0.7,
                max_stamina_recovery_rate: 0.3,
                exertion_normaliser: 10.0,
                speed_weight: 0.05,
                stamina_weight: 0.02,
                min_imprecision: 1.0,
            },
        }
    }
}

/// An event as seen by the [`Clicking`] skill.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickPoint {
    pub idx: usize,
    pub offset: f64,
    pub delta_time: f64,
    pub difficulty: f64,
    pub hit_window: f64,
    pub speed: f64,
    pub stamina: f64,
}

impl DifficultyPoint for ClickPoint {
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

/// Difficulty of keeping up with the tapping cadence.
#[derive(Clone, Debug)]
pub struct Clicking {
    config: ClickingConfig,
    exertion: ExertionPool,
    curr_points: ContextWindow<ClickPoint, 1>,
    calculated_points: Vec<ClickPoint>,
}

impl Clicking {
    // A press is the same amount of work no matter where it happens
    const ENERGY_PER_PRESS: f64 = 1.0;

    pub fn new(config: ClickingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::new_validated(config))
    }

    fn new_validated(config: ClickingConfig) -> Self {
        Self {
            config,
            exertion: ExertionPool::new_validated(config.exertion),
            curr_points: ContextWindow::new(),
            calculated_points: Vec::with_capacity(256),
        }
    }

    pub const fn config(&self) -> &ClickingConfig {
        &self.config
    }
}

impl Default for Clicking {
    fn default() -> Self {
        Self::new_validated(ClickingConfig::default())
    }
}

impl Skill for Clicking {
    type Point = ClickPoint;

    const KIND: SkillKind = SkillKind::Clicking;

    fn process_relevant(&mut self, idx: usize, event: &TimedEvent) {
        let prev = self.curr_points.latest();
        let is_first = prev.is_none();
        let delta_time = prev.map_or(0.0, |prev| (event.offset - prev.offset).max(0.0));

        let exertion = self.exertion.exert(Action {
            energy_exerted: Self::ENERGY_PER_PRESS,
            imprecision: event.hit_window,
            semantic_bonus: 0.0,
            delta_time,
        });

        let point = ClickPoint {
            idx,
            offset: event.offset,
            delta_time,
            difficulty: if is_first { 0.0 } else { exertion.difficulty },
            hit_window: event.hit_window,
            speed: exertion.speed,
            stamina: exertion.stamina,
        };

        self.curr_points.push(point);
        self.calculated_points.push(point);
    }

    fn calculated_points(&self) -> &[ClickPoint] {
        &self.calculated_points
    }

    fn skill_multiplier(&self) -> f64 {
        self.config.skill_multiplier
    }

    fn reset(&mut self) {
        self.exertion.reset();
        self.curr_points.clear();
        self.calculated_points.clear();
    }
}
