//! Skill-based difficulty calculation for circle clicking games.
//!
//! A map is a time-ordered sequence of [`TimedEvent`]s. Each event is rated by
//! three independent skills:
//!
//! - [`Aiming`]: moving the cursor between events, split into snap and flow
//!   motion
//! - [`Clicking`]: keeping up with the tapping cadence
//! - [`Reading`]: identifying position and timing of all visible events
//!
//! Every skill folds its per-event difficulties into a single value and the
//! [`DifficultyCalculator`] combines those into the overall difficulty.
//!
//! # Usage
//!
//! ```no_run
//! use circle_skills::{DifficultyCalculator, EventMap, GameModsLegacy};
//!
//! let map = EventMap::from_path("./resources/map.osu").unwrap();
//!
//! let mut calc = DifficultyCalculator::new();
//! calc.set_map(map);
//! calc.set_mods(GameModsLegacy::HardRock | GameModsLegacy::DoubleTime);
//!
//! let attrs = calc.calculate().unwrap();
//!
//! println!(
//!     "aiming={} clicking={} reading={} overall={}",
//!     attrs.aiming, attrs.clicking, attrs.reading, attrs.difficulty
//! );
//! ```
//!
//! # Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features enabled |
//! | `parallel` | Run the skills of a calculation on separate threads | [`rayon`]
//! | `serde` | Implement `Serialize` and `Deserialize` for configs, events, and results | [`serde`]
//! | `tracing` | Log calculation progress and warnings | [`tracing`]
//!
//! [`rayon`]: https://docs.rs/rayon
//! [`serde`]: https://docs.rs/serde
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links, rustdoc::missing_crate_level_docs)]
#![warn(
    clippy::missing_const_for_fn,
    clippy::pedantic,
    unused_qualifications
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_field_names,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::similar_names,
    clippy::struct_excessive_bools
)]

pub mod difficulty;
pub mod error;
pub mod model;
pub mod util;

#[doc(inline)]
pub use self::{
    difficulty::{
        skills::{
            aiming::{AimPoint, Aiming, AimingConfig},
            clicking::{ClickPoint, Clicking, ClickingConfig},
            exertion::ExertionConfig,
            reading::{Reading, ReadingConfig, ReadingPoint},
            DifficultyPoint, Skill, SkillKind, Skills,
        },
        CalculatorConfig, CombinationStrategy, DifficultyAttributes, DifficultyCalculator,
        EventDifficulty,
    },
    error::{CalculateError, ConfigError},
    model::{
        event::{EventKind, TimedEvent},
        map::{EventMap, MapObject, MapSettings},
        mods::{GameMods, GameModsLegacy},
    },
    util::vector::{Vec2, Vector},
};
