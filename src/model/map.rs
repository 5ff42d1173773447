use std::{io, path::Path};

use rosu_map::{
    section::hit_objects::{HitObject, HitObjectKind},
    util::Pos,
    Beatmap,
};

use crate::util::vector::Vec2;

use super::{
    event::{EventKind, TimedEvent},
    mods::GameMods,
};

/// A map object before any modifier is applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: EventKind,
}

impl From<&HitObject> for MapObject {
    fn from(h: &HitObject) -> Self {
        let (pos, kind) = match h.kind {
            HitObjectKind::Circle(ref circle) => (circle.pos, EventKind::Circle),
            HitObjectKind::Slider(ref slider) => (slider.pos, EventKind::Slider),
            HitObjectKind::Spinner(ref spinner) => (spinner.pos, EventKind::Spinner),
            // Hold notes have no meaningful position so treat them like spinners
            HitObjectKind::Hold(_) => (Pos::default(), EventKind::Spinner),
        };

        Self {
            pos,
            start_time: h.start_time,
            kind,
        }
    }
}

/// Base difficulty settings of a map.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapSettings {
    pub circle_size: f64,
    pub approach_rate: f64,
    pub overall_difficulty: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            circle_size: 5.0,
            approach_rate: 5.0,
            overall_difficulty: 5.0,
        }
    }
}

/// The source of [`TimedEvent`]s: map objects and settings that still need
/// modifiers applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventMap {
    objects: Vec<MapObject>,
    settings: MapSettings,
}

impl EventMap {
    /// Objects are ordered by their start time.
    pub fn new(mut objects: Vec<MapObject>, settings: MapSettings) -> Self {
        objects.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        Self { objects, settings }
    }

    /// Parse a `.osu` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let map: Beatmap = rosu_map::from_path(path)?;

        Ok(Self::from(&map))
    }

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    pub const fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Apply `mods` onto each object.
    pub fn events(&self, mods: &GameMods) -> Vec<TimedEvent> {
        let clock_rate = mods.clock_rate();
        let radius = mods.radius(self.settings.circle_size);
        let approach_window = mods.approach_window(self.settings.approach_rate);
        let hit_window = mods.hit_window(self.settings.overall_difficulty);

        self.objects
            .iter()
            .map(|obj| {
                let pos = Vec2::from(obj.pos);

                TimedEvent {
                    offset: obj.start_time / clock_rate,
                    pos: Vec2::new(pos.x(), mods.reflect_y(pos.y())),
                    radius,
                    approach_window,
                    hit_window,
                    kind: obj.kind,
                }
            })
            .collect()
    }
}

impl From<&Beatmap> for EventMap {
    fn from(map: &Beatmap) -> Self {
        let settings = MapSettings {
            circle_size: f64::from(map.circle_size),
            approach_rate: f64::from(map.approach_rate),
            overall_difficulty: f64::from(map.overall_difficulty),
        };

        let objects = map.hit_objects.iter().map(MapObject::from).collect();

        Self::new(objects, settings)
    }
}

#[cfg(test)]
mod tests {
    use rosu_mods::GameModsLegacy;

    use super::*;

    fn object(x: f32, y: f32, start_time: f64, kind: EventKind) -> MapObject {
        MapObject {
            pos: Pos::new(x, y),
            start_time,
            kind,
        }
    }

    #[test]
    fn orders_objects() {
        let map = EventMap::new(
            vec![
                object(0.0, 0.0, 300.0, EventKind::Circle),
                object(0.0, 0.0, 100.0, EventKind::Slider),
            ],
            MapSettings::default(),
        );

        assert!((map.objects()[0].start_time - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn applies_mods() {
        let map = EventMap::new(
            vec![
                object(100.0, 100.0, 0.0, EventKind::Circle),
                object(200.0, 50.0, 600.0, EventKind::Spinner),
            ],
            MapSettings {
                circle_size: 4.0,
                approach_rate: 9.0,
                overall_difficulty: 8.0,
            },
        );

        let mods = GameMods::new(GameModsLegacy::HardRock | GameModsLegacy::DoubleTime);
        let events = map.events(&mods);

        assert_eq!(events.len(), 2);
        assert!((events[1].offset - 400.0).abs() < 1e-9);
        assert!((events[0].pos.y() - 284.0).abs() < 1e-9);
        assert!((events[0].approach_window - 300.0).abs() < 1e-9);
        assert!(events[1].is_spinner());

        let nomod = map.events(&GameMods::NONE);
        assert!(events[0].radius < nomod[0].radius);
        assert!(events[0].hit_window < nomod[0].hit_window);
    }
}
