use std::{borrow::Cow, collections::BTreeMap};

use crate::{
    error::{CalculateError, ConfigError},
    model::{event::TimedEvent, map::EventMap, mods::GameMods},
};

use self::skills::{
    aiming::AimingConfig, clicking::ClickingConfig, reading::ReadingConfig, DifficultyPoint,
    Skill, Skills,
};

pub mod evaluators;
pub mod skills;

/// How the skill values are folded into the overall difficulty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombinationStrategy {
    /// Sum of the aggregated skill values.
    #[default]
    Sum,
    /// Per event, the skills' difficulties are weighted by their squared
    /// multipliers and summed up; the overall difficulty is the square root
    /// of the hardest event.
    PeakCurve,
}

/// Configuration of all skills and their combination.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalculatorConfig {
    pub aiming: AimingConfig,
    pub clicking: ClickingConfig,
    pub reading: ReadingConfig,
    pub combination: CombinationStrategy,
}

impl CalculatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aiming.validate()?;
        self.clicking.validate()?;

        self.reading.validate()
    }
}

/// The result of a difficulty calculation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyAttributes {
    /// Aggregated value of the aiming skill.
    pub aiming: f64,
    /// Aggregated value of the clicking skill.
    pub clicking: f64,
    /// Aggregated value of the reading skill.
    pub reading: f64,
    /// The overall difficulty.
    pub difficulty: f64,
    /// The amount of events that were processed.
    pub n_events: usize,
}

/// The difficulty of a single event for each skill.
///
/// A skill that skipped the event has no difficulty for it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDifficulty {
    /// Index of the event.
    pub idx: usize,
    pub offset: f64,
    pub aiming: Option<f64>,
    pub clicking: Option<f64>,
    pub reading: Option<f64>,
}

#[derive(Clone, Debug)]
enum EventSource {
    Map(EventMap),
    /// Events that already have modifiers applied.
    Events(Box<[TimedEvent]>),
}

/// Calculator for the difficulty of a sequence of events.
///
/// # Example
///
/// ```
/// use circle_skills::{DifficultyCalculator, TimedEvent, Vec2};
///
/// let events: Vec<_> = (0..8)
///     .map(|i| TimedEvent {
///         offset: f64::from(i) * 250.0,
///         pos: Vec2::new(f64::from(i % 2) * 200.0, 192.0),
///         radius: 30.0,
///         approach_window: 600.0,
///         hit_window: 50.0,
///         ..Default::default()
///     })
///     .collect();
///
/// let mut calc = DifficultyCalculator::new();
/// calc.set_events(events);
///
/// let attrs = calc.calculate().unwrap();
/// assert!(attrs.difficulty > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct DifficultyCalculator {
    source: Option<EventSource>,
    mods: GameMods,
    skills: Skills,
    combination: CombinationStrategy,
}

impl DifficultyCalculator {
    /// Create a new calculator with default configuration.
    pub fn new() -> Self {
        Self {
            source: None,
            mods: GameMods::NONE,
            skills: Skills::default(),
            combination: CombinationStrategy::default(),
        }
    }

    /// Create a new calculator with the given configuration.
    pub fn with_config(config: CalculatorConfig) -> Result<Self, ConfigError> {
        let CalculatorConfig {
            aiming,
            clicking,
            reading,
            combination,
        } = config;

        Ok(Self {
            source: None,
            mods: GameMods::NONE,
            skills: Skills::new(aiming, clicking, reading)?,
            combination,
        })
    }

    /// Use the objects of a map as source of events.
    ///
    /// The current modifiers are applied onto the map's objects on each
    /// calculation.
    pub fn set_map(&mut self, map: EventMap) {
        self.reset();
        self.source = Some(EventSource::Map(map));
    }

    /// Use events that already have modifiers applied.
    ///
    /// Events are ordered by their offset.
    pub fn set_events(&mut self, events: impl Into<Vec<TimedEvent>>) {
        let mut events = events.into();
        events.sort_by(|a, b| a.offset.total_cmp(&b.offset));

        self.reset();
        self.source = Some(EventSource::Events(events.into_boxed_slice()));
    }

    /// Specify mods.
    ///
    /// Mods only affect events that stem from a map.
    pub fn set_mods(&mut self, mods: impl Into<GameMods>) {
        #[cfg(feature = "tracing")]
        if matches!(self.source, Some(EventSource::Events(_))) {
            tracing::warn!("Mods are ignored for events that already have mods applied");
        }

        self.reset();
        self.mods = mods.into();
    }

    pub const fn mods(&self) -> GameMods {
        self.mods
    }

    pub const fn combination(&self) -> CombinationStrategy {
        self.combination
    }

    /// Clear the state of all skills.
    pub fn reset(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Resetting skills");

        self.skills.reset();
    }

    /// Run all skills over the events of the current source.
    pub fn calculate(&mut self) -> Result<DifficultyAttributes, CalculateError> {
        self.reset();

        let events = match self.source {
            Some(EventSource::Map(ref map)) => Cow::Owned(map.events(&self.mods)),
            Some(EventSource::Events(ref events)) => Cow::Borrowed(events.as_ref()),
            None => return Err(CalculateError::MissingEvents),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Starting difficulty calculation over {} events", events.len());

        self.skills.process_all(&events);

        let [(_, aiming), (_, clicking), (_, reading)] = self.skills.values();

        let attrs = DifficultyAttributes {
            aiming,
            clicking,
            reading,
            difficulty: self.difficulty(),
            n_events: events.len(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Finished difficulty calculation: aiming={}, clicking={}, reading={}, difficulty={}",
            attrs.aiming,
            attrs.clicking,
            attrs.reading,
            attrs.difficulty
        );

        Ok(attrs)
    }

    /// The overall difficulty of the last calculation.
    pub fn difficulty(&self) -> f64 {
        match self.combination {
            CombinationStrategy::Sum => self
                .skills
                .values()
                .iter()
                .map(|&(_kind, value)| {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("{_kind} value: {value}");

                    value
                })
                .sum(),
            CombinationStrategy::PeakCurve => {
                let aiming = self.skills.aiming.skill_multiplier().powi(2);
                let clicking = self.skills.clicking.skill_multiplier().powi(2);
                let reading = self.skills.reading.skill_multiplier().powi(2);

                let peak = self
                    .event_difficulties()
                    .iter()
                    .map(|event| {
                        event.aiming.unwrap_or(0.0) * aiming
                            + event.clicking.unwrap_or(0.0) * clicking
                            + event.reading.unwrap_or(0.0) * reading
                    })
                    .fold(0.0, f64::max);

                peak.sqrt()
            }
        }
    }

    /// The skills in their state after the last calculation.
    pub const fn skills(&self) -> &Skills {
        &self.skills
    }

    /// Difficulties of the last calculation grouped by event.
    ///
    /// Events that no skill considered are omitted.
    pub fn event_difficulties(&self) -> Vec<EventDifficulty> {
        fn entry<'a, P: DifficultyPoint>(
            events: &'a mut BTreeMap<usize, EventDifficulty>,
            point: &P,
        ) -> &'a mut EventDifficulty {
            events
                .entry(point.idx())
                .or_insert_with(|| EventDifficulty {
                    idx: point.idx(),
                    offset: point.offset(),
                    ..Default::default()
                })
        }

        let mut events = BTreeMap::new();

        for point in self.skills.aiming.calculated_points() {
            entry(&mut events, point).aiming = Some(point.difficulty);
        }

        for point in self.skills.clicking.calculated_points() {
            entry(&mut events, point).clicking = Some(point.difficulty);
        }

        for point in self.skills.reading.calculated_points() {
            entry(&mut events, point).reading = Some(point.difficulty);
        }

        events.into_values().collect()
    }
}

impl Default for DifficultyCalculator {
    fn default() -> Self {
        Self::new()
    }
}
