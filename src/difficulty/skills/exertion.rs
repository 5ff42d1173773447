use crate::{error::ConfigError, util::difficulty::retention};

/// Tunables of an [`ExertionPool`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExertionConfig {
    /// Maximum fraction of the speed pool that recovers per second.
    pub max_speed_recovery_rate: f64,
    /// Maximum fraction of the stamina pool that recovers per second.
    pub max_stamina_recovery_rate: f64,
    /// How strongly the rate of exertion throttles recovery.
    pub exertion_normaliser: f64,
    pub speed_weight: f64,
    pub stamina_weight: f64,
    /// Lower bound for imprecision before it is inverted.
    pub min_imprecision: f64,
}

impl ExertionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_recovery_rate("max_speed_recovery_rate", self.max_speed_recovery_rate)?;
        ConfigError::check_recovery_rate(
            "max_stamina_recovery_rate",
            self.max_stamina_recovery_rate,
        )?;
        ConfigError::check_non_negative("exertion_normaliser", self.exertion_normaliser)?;
        ConfigError::check_non_negative("speed_weight", self.speed_weight)?;
        ConfigError::check_non_negative("stamina_weight", self.stamina_weight)?;
        ConfigError::check_positive("min_imprecision", self.min_imprecision)
    }
}

impl Default for ExertionConfig {
    fn default() -> Self {
        Self {
            max_speed_recovery_rate: 0.7,
            max_stamina_recovery_rate: 0.3,
            exertion_normaliser: 1.0,
            speed_weight: 1.0,
            stamina_weight: 1.0,
            min_imprecision: 1.0,
        }
    }
}

/// What a single action contributes to an [`ExertionPool`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Action {
    pub energy_exerted: f64,
    /// Time window in milliseconds within which the action succeeds.
    pub imprecision: f64,
    pub semantic_bonus: f64,
    pub delta_time: f64,
}

/// Pool state and resulting difficulty after an [`Action`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Exertion {
    pub difficulty: f64,
    pub speed: f64,
    pub stamina: f64,
}

/// Speed and stamina strain with exertion-dependent recovery.
#[derive(Clone, Debug)]
pub struct ExertionPool {
    config: ExertionConfig,
    speed: f64,
    stamina: f64,
}

impl ExertionPool {
    pub fn new(config: ExertionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::new_validated(config))
    }

    pub(crate) const fn new_validated(config: ExertionConfig) -> Self {
        Self {
            config,
            speed: 0.0,
            stamina: 0.0,
        }
    }

    pub const fn config(&self) -> &ExertionConfig {
        &self.config
    }

    pub const fn speed(&self) -> f64 {
        self.speed
    }

    pub const fn stamina(&self) -> f64 {
        self.stamina
    }

    /// Add the action's energy onto both pools, let them recover over the
    /// action's delta time, and compute its difficulty.
    pub fn exert(&mut self, action: Action) -> Exertion {
        let Action {
            energy_exerted,
            imprecision,
            semantic_bonus,
            delta_time,
        } = action;

        self.speed += energy_exerted;
        self.stamina += energy_exerted;

        let throttle = self.throttle(energy_exerted, delta_time);

        self.speed *= retention(
            self.config.max_speed_recovery_rate * throttle,
            delta_time,
        );
        self.stamina *= retention(
            self.config.max_stamina_recovery_rate * throttle,
            delta_time,
        );

        let imprecision = imprecision.max(self.config.min_imprecision);

        let difficulty = imprecision.recip()
            * (1.0 + semantic_bonus)
            * (1.0 + self.speed * self.config.speed_weight)
            * (1.0 + self.stamina * self.config.stamina_weight);

        Exertion {
            difficulty,
            speed: self.speed,
            stamina: self.stamina,
        }
    }

    /// Factor in `[0, 1]` by which the recovery rate is reduced; the faster
    /// energy is exerted, the less recovers.
    fn throttle(&self, energy_exerted: f64, delta_time: f64) -> f64 {
        let exertion_rate = if delta_time > 0.0 {
            energy_exerted / delta_time
        } else if energy_exerted > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        if exertion_rate <= 0.0 || self.config.exertion_normaliser <= 0.0 {
            return 1.0;
        }

        f64::exp(-exertion_rate * self.config.exertion_normaliser)
    }

    pub fn reset(&mut self) {
        self.speed = 0.0;
        self.stamina = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unweighted() -> ExertionConfig {
        ExertionConfig {
            speed_weight: 0.0,
            stamina_weight: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn difficulty_is_inverse_imprecision_without_weights() {
        let mut pool = ExertionPool::new(unweighted()).unwrap();

        let exertion = pool.exert(Action {
            energy_exerted: 1.0,
            imprecision: 50.0,
            semantic_bonus: 0.0,
            delta_time: 200.0,
        });

        assert!((exertion.difficulty - 0.02).abs() < 1e-12);
    }

    #[test]
    fn pools_recover_with_throttled_rate() {
        let config = ExertionConfig {
            max_speed_recovery_rate: 0.5,
            max_stamina_recovery_rate: 0.2,
            exertion_normaliser: 100.0,
            ..Default::default()
        };

        let mut pool = ExertionPool::new(config).unwrap();

        let exertion = pool.exert(Action {
            energy_exerted: 2.0,
            imprecision: 100.0,
            semantic_bonus: 0.0,
            delta_time: 1000.0,
        });

        let throttle = f64::exp(-2.0 / 1000.0 * 100.0);
        let speed = 2.0 * (1.0 - 0.5 * throttle);
        let stamina = 2.0 * (1.0 - 0.2 * throttle);

        assert!((exertion.speed - speed).abs() < 1e-12);
        assert!((exertion.stamina - stamina).abs() < 1e-12);

        let difficulty = 0.01 * (1.0 + speed) * (1.0 + stamina);
        assert!((exertion.difficulty - difficulty).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_time_does_not_recover() {
        let mut pool = ExertionPool::new(ExertionConfig::default()).unwrap();

        let exertion = pool.exert(Action {
            energy_exerted: 3.0,
            imprecision: 0.0,
            semantic_bonus: 0.0,
            delta_time: 0.0,
        });

        assert!((exertion.speed - 3.0).abs() < 1e-12);
        assert!((exertion.stamina - 3.0).abs() < 1e-12);
        assert!(exertion.difficulty.is_finite());
    }

    #[test]
    fn reset_empties_pools() {
        let mut pool = ExertionPool::new(ExertionConfig::default()).unwrap();

        pool.exert(Action {
            energy_exerted: 1.0,
            imprecision: 10.0,
            semantic_bonus: 0.0,
            delta_time: 100.0,
        });
        assert!(pool.speed() > 0.0);

        pool.reset();
        assert!(pool.speed().abs() < f64::EPSILON);
        assert!(pool.stamina().abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_full_recovery() {
        let config = ExertionConfig {
            max_speed_recovery_rate: 1.0,
            ..Default::default()
        };

        assert!(matches!(
            ExertionPool::new(config),
            Err(ConfigError::RecoveryRate { .. })
        ));
    }
}
