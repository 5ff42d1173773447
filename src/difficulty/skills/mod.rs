use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{error::ConfigError, model::event::TimedEvent};

use self::{
    aiming::{Aiming, AimingConfig},
    clicking::{Clicking, ClickingConfig},
    reading::{Reading, ReadingConfig},
};

pub mod aiming;
pub mod clicking;
pub mod exertion;
pub mod reading;

/// Base weight by which consecutive difficulties decay.
pub const DECAY_WEIGHT: f64 = 0.9;

/// Milliseconds of delay after which the decay index advances by one.
pub const DECAY_INTERVAL: f64 = 400.0;

/// The skills that a map's difficulty is composed of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    Aiming,
    Clicking,
    Reading,
}

impl Display for SkillKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Aiming => "aiming",
            Self::Clicking => "clicking",
            Self::Reading => "reading",
        };

        f.write_str(name)
    }
}

/// The difficulty of a single event within the context of one skill.
pub trait DifficultyPoint {
    /// Index of the source event.
    fn idx(&self) -> usize;

    fn offset(&self) -> f64;

    /// Milliseconds since the previous point of the same skill.
    fn delta_time(&self) -> f64;

    fn difficulty(&self) -> f64;
}

/// A skill consumes events one by one and rates each of them.
pub trait Skill {
    type Point: DifficultyPoint + Copy;

    const KIND: SkillKind;

    /// Whether the skill considers the event at all.
    ///
    /// Spinners have no position or size and are irrelevant by default.
    fn is_relevant(event: &TimedEvent) -> bool {
        !event.is_spinner()
    }

    /// Rate an event that is known to be relevant.
    fn process_relevant(&mut self, idx: usize, event: &TimedEvent);

    /// Process the event with index `idx` if it is relevant.
    fn process(&mut self, idx: usize, event: &TimedEvent) {
        if Self::is_relevant(event) {
            self.process_relevant(idx, event);
        }
    }

    /// Process all events in order.
    fn process_all(&mut self, events: &[TimedEvent]) {
        for (idx, event) in events.iter().enumerate() {
            self.process(idx, event);
        }
    }

    /// All points processed since the last reset.
    fn calculated_points(&self) -> &[Self::Point];

    /// Scales the value onto a range that is comparable across skills.
    fn skill_multiplier(&self) -> f64;

    /// Aggregated rating of all calculated points.
    fn value(&self) -> f64 {
        difficulty_value(self.calculated_points(), self.skill_multiplier())
    }

    /// Clear all state of the skill.
    fn reset(&mut self);
}

/// Fold per-event difficulties into a single rating.
///
/// Difficulties are weighted in descending order with a decay that advances
/// by each point's delay so temporally dense peaks suppress each other less
/// than sparse ones.
pub fn difficulty_value<P: DifficultyPoint>(points: &[P], skill_multiplier: f64) -> f64 {
    let mut sorted: Vec<_> = points
        .iter()
        .map(|point| (point.difficulty(), point.delta_time()))
        .collect();

    sorted.sort_by(|(a, _), (b, _)| b.total_cmp(a));

    let mut total = 0.0;
    let mut i = 0.0;

    for (difficulty, delta_time) in sorted {
        total += difficulty * DECAY_WEIGHT.powf(i);
        i += delta_time / DECAY_INTERVAL;
    }

    total.sqrt() * skill_multiplier
}

/// All skills that are run over a map.
#[derive(Clone, Debug)]
pub struct Skills {
    pub aiming: Aiming,
    pub clicking: Clicking,
    pub reading: Reading,
}

impl Skills {
    pub fn new(
        aiming: AimingConfig,
        clicking: ClickingConfig,
        reading: ReadingConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            aiming: Aiming::new(aiming)?,
            clicking: Clicking::new(clicking)?,
            reading: Reading::new(reading)?,
        })
    }

    /// Run every skill over all events.
    pub fn process_all(&mut self, events: &[TimedEvent]) {
        let Self {
            aiming,
            clicking,
            reading,
        } = self;

        #[cfg(feature = "parallel")]
        {
            rayon::join(
                || aiming.process_all(events),
                || {
                    rayon::join(
                        || clicking.process_all(events),
                        || reading.process_all(events),
                    )
                },
            );
        }

        #[cfg(not(feature = "parallel"))]
        {
            aiming.process_all(events);
            clicking.process_all(events);
            reading.process_all(events);
        }
    }

    pub fn reset(&mut self) {
        self.aiming.reset();
        self.clicking.reset();
        self.reading.reset();
    }

    /// Aggregated value of each skill.
    pub fn values(&self) -> [(SkillKind, f64); 3] {
        [
            (Aiming::KIND, self.aiming.value()),
            (Clicking::KIND, self.clicking.value()),
            (Reading::KIND, self.reading.value()),
        ]
    }
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            aiming: Aiming::default(),
            clicking: Clicking::default(),
            reading: Reading::default(),
        }
    }
}
