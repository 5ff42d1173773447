use thiserror::Error;

/// A configuration that was rejected on construction.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("recovery rate `{name}` must lie within [0, 1), got {value}")]
    RecoveryRate { name: &'static str, value: f64 },
    #[error("`{name}` must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("`{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("snap force threshold ({snap}) must be below flow force threshold ({flow})")]
    Thresholds { snap: f64, flow: f64 },
}

impl ConfigError {
    pub(crate) fn check_recovery_rate(name: &'static str, value: f64) -> Result<(), Self> {
        if (0.0..1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::RecoveryRate { name, value })
        }
    }

    pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::Negative { name, value })
        }
    }

    pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NotFinite { name, value })
        }
    }

    pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive { name, value })
        }
    }
}

/// The reason a calculation did not happen.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalculateError {
    #[error("no events to calculate; set a map or events first")]
    MissingEvents,
}
